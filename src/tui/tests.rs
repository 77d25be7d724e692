// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::KeyCode;
use rstest::{fixture, rstest};

use super::hints::gen_labels;
use super::testing::HeadlessTui;
use super::NODE_HINT_CHARS;
use crate::api::ApiError;
use crate::controller::{DialogMode, Mutation, Outcome, Request};
use crate::model::{MemberId, MemberPayload, MemberRef, SearchResult, TreeNode};

fn id(value: u64) -> MemberId {
    MemberId::from_number(value)
}

fn alice_and_bob() -> Vec<TreeNode> {
    vec![TreeNode::new(id(1), "Alice")
        .with_email("alice@example.test")
        .with_phone("555-0100")
        .with_child(TreeNode::new(id(2), "Bob").with_upline(id(1)))]
}

fn payload(name: &str, upline: Option<MemberId>) -> MemberPayload {
    MemberPayload {
        name: name.to_owned(),
        email: String::new(),
        phone: String::new(),
        upline_id: upline,
    }
}

fn loaded(forest: Vec<TreeNode>) -> HeadlessTui {
    let mut tui = HeadlessTui::new(100, 30);
    assert_eq!(tui.take_requests(), vec![Request::FetchTree]);
    tui.deliver(Outcome::TreeLoaded(Ok(forest)));
    assert!(tui.take_requests().is_empty());
    tui
}

#[fixture]
fn empty() -> HeadlessTui {
    loaded(Vec::new())
}

#[fixture]
fn populated() -> HeadlessTui {
    loaded(alice_and_bob())
}

fn open_edit(tui: &mut HeadlessTui, label: &str) {
    let (column, row) = tui.find(label).expect("label on screen");
    tui.click(column, row);
    assert!(tui.mode().is_editing(), "click on {label} did not open the editor");
}

#[test]
fn shows_loading_until_first_fetch_completes() {
    let mut tui = HeadlessTui::new(80, 20);
    tui.draw();
    assert!(tui.screen().contains("Loading tree..."));
    assert_eq!(tui.take_requests(), vec![Request::FetchTree]);

    tui.deliver(Outcome::TreeLoaded(Ok(alice_and_bob())));
    let screen = tui.screen();
    assert!(!screen.contains("Loading tree..."));
    assert!(screen.contains("(A) Alice"));
    assert!(screen.contains("(B) Bob"));
}

#[rstest]
fn empty_tree_adds_root_member_from_keyboard(mut empty: HeadlessTui) {
    let screen = empty.screen();
    assert!(screen.contains("[a] Add Root Member"));
    assert!(screen.contains("No members yet"));

    empty.press(KeyCode::Char('a'));
    assert_eq!(empty.mode(), &DialogMode::AddingRoot);
    assert!(empty.screen().contains("Add Root Member"));

    empty.type_text("Alice");
    assert_eq!(empty.form().name, "Alice");
    empty.press(KeyCode::Enter);
    assert_eq!(
        empty.take_requests(),
        vec![Request::Create { payload: payload("Alice", None) }]
    );

    empty.deliver(Outcome::MutationFinished { mutation: Mutation::Create, result: Ok(()) });
    assert_eq!(empty.mode(), &DialogMode::Closed);
    assert_eq!(empty.take_requests(), vec![Request::FetchTree]);
    assert_eq!(empty.toast().as_deref(), Some("Member created successfully."));
}

#[rstest]
fn blank_name_does_not_submit(mut empty: HeadlessTui) {
    empty.press(KeyCode::Char('a'));
    empty.type_text("   ");
    empty.press(KeyCode::Enter);
    assert!(empty.take_requests().is_empty());
    assert_eq!(empty.mode(), &DialogMode::AddingRoot);
    assert_eq!(empty.toast().as_deref(), Some("Name is required."));
}

#[rstest]
fn add_root_is_refused_once_the_tree_has_members(mut populated: HeadlessTui) {
    populated.press(KeyCode::Char('a'));
    assert_eq!(populated.mode(), &DialogMode::Closed);
    assert_eq!(populated.toast().as_deref(), Some("The tree already has a root member."));
}

#[rstest]
fn escape_closes_dialog_without_requests(mut empty: HeadlessTui) {
    empty.press(KeyCode::Char('a'));
    empty.type_text("Alice");
    empty.press(KeyCode::Esc);
    assert_eq!(empty.mode(), &DialogMode::Closed);
    assert!(empty.take_requests().is_empty());

    empty.press(KeyCode::Char('a'));
    assert_eq!(empty.form().name, "");
}

#[rstest]
fn clicking_a_label_opens_the_editor(mut populated: HeadlessTui) {
    open_edit(&mut populated, "Bob");
    assert_eq!(populated.form().name, "Bob");
    let screen = populated.screen();
    assert!(screen.contains("Edit Member"));
    assert!(screen.contains("Downlines: 0"));
}

#[rstest]
fn clicking_a_circle_folds_and_unfolds(mut populated: HeadlessTui) {
    let (column, row) = populated.find("(A)").expect("alice");
    populated.click(column, row);
    let screen = populated.screen();
    assert!(!screen.contains("Bob"));
    assert!(screen.contains('+'));
    assert_eq!(populated.mode(), &DialogMode::Closed);

    let (column, row) = populated.find("(A)").expect("alice");
    populated.click(column, row);
    assert!(populated.screen().contains("(B) Bob"));
}

#[rstest]
fn reloading_the_tree_unfolds_collapsed_members(mut populated: HeadlessTui) {
    let (column, row) = populated.find("(A)").expect("alice");
    populated.click(column, row);
    assert!(!populated.screen().contains("Bob"));

    populated.press(KeyCode::Char('r'));
    assert_eq!(populated.take_requests(), vec![Request::FetchTree]);
    populated.deliver(Outcome::TreeLoaded(Ok(alice_and_bob())));
    let screen = populated.screen();
    assert!(screen.contains("(A) Alice"));
    assert!(screen.contains("(B) Bob"));
}

#[rstest]
fn clicks_outside_nodes_are_ignored(mut populated: HeadlessTui) {
    populated.click(0, 0);
    populated.click(99, 29);
    assert_eq!(populated.mode(), &DialogMode::Closed);
    assert!(populated.screen().contains("(B) Bob"));
}

#[rstest]
fn open_hints_jump_to_members(mut populated: HeadlessTui) {
    let labels = gen_labels(2, NODE_HINT_CHARS);

    populated.press(KeyCode::Char('f'));
    assert!(populated.screen().contains("Open:_"));
    populated.type_text(&labels[1].to_ascii_lowercase());
    assert!(populated.mode().is_editing());
    assert_eq!(populated.form().name, "Bob");

    populated.press(KeyCode::Esc);
    populated.press(KeyCode::Char('f'));
    populated.type_text(&labels[0]);
    assert_eq!(populated.form().name, "Alice");
}

#[rstest]
fn fold_hints_only_target_members_with_downlines(mut populated: HeadlessTui) {
    let labels = gen_labels(1, NODE_HINT_CHARS);
    populated.press(KeyCode::Char('z'));
    populated.type_text(&labels[0]);
    assert!(!populated.screen().contains("Bob"));
    assert_eq!(populated.mode(), &DialogMode::Closed);
}

#[rstest]
fn unknown_hint_cancels_with_toast(mut populated: HeadlessTui) {
    populated.press(KeyCode::Char('f'));
    populated.press(KeyCode::Char('x'));
    assert_eq!(populated.toast().as_deref(), Some("No hint 'X'"));
    assert_eq!(populated.mode(), &DialogMode::Closed);
}

#[rstest]
fn hints_on_empty_tree_report_nothing_in_view(mut empty: HeadlessTui) {
    empty.press(KeyCode::Char('f'));
    assert_eq!(empty.toast().as_deref(), Some("No members in view."));
}

#[rstest]
fn edit_submit_keeps_the_upline(mut populated: HeadlessTui) {
    open_edit(&mut populated, "Bob");
    populated.press(KeyCode::Backspace);
    populated.type_text("by");
    populated.press(KeyCode::Enter);
    assert_eq!(
        populated.take_requests(),
        vec![Request::Update { id: id(2), payload: payload("Boby", Some(id(1))) }]
    );
}

#[rstest]
fn add_downline_button_targets_the_edited_member(mut populated: HeadlessTui) {
    open_edit(&mut populated, "Alice");
    // Name, Email, Phone, Submit, then Add Downline.
    for _ in 0..4 {
        populated.press(KeyCode::Tab);
    }
    populated.press(KeyCode::Enter);
    assert!(matches!(populated.mode(), DialogMode::AddingChild { .. }));
    assert!(populated.screen().contains("Upline: Alice"));

    populated.type_text("Carol");
    populated.press(KeyCode::Enter);
    assert_eq!(
        populated.take_requests(),
        vec![Request::Create { payload: payload("Carol", Some(id(1))) }]
    );
}

#[rstest]
fn delete_with_downlines_after_confirmation(mut populated: HeadlessTui) {
    open_edit(&mut populated, "Alice");
    populated.press(KeyCode::BackTab);
    populated.press(KeyCode::BackTab);
    populated.press(KeyCode::Enter);
    assert!(populated.is_confirming_delete());
    let screen = populated.screen();
    assert!(screen.contains("Delete Only"));
    assert!(screen.contains("Delete + Downlines"));

    populated.press(KeyCode::Tab);
    populated.press(KeyCode::Enter);
    assert_eq!(populated.take_requests(), vec![Request::CascadeDelete { id: id(1) }]);

    populated.deliver(Outcome::MutationFinished {
        mutation: Mutation::CascadeDelete,
        result: Ok(()),
    });
    assert_eq!(populated.mode(), &DialogMode::Closed);
    assert_eq!(populated.take_requests(), vec![Request::FetchTree]);
}

#[rstest]
fn escape_backs_out_of_delete_confirmation(mut populated: HeadlessTui) {
    open_edit(&mut populated, "Bob");
    populated.press(KeyCode::BackTab);
    populated.press(KeyCode::BackTab);
    populated.press(KeyCode::Enter);
    assert!(populated.is_confirming_delete());

    populated.press(KeyCode::Esc);
    assert!(!populated.is_confirming_delete());
    assert!(populated.mode().is_editing());
    assert!(populated.take_requests().is_empty());
}

#[rstest]
fn failed_mutation_keeps_dialog_and_shows_server_message(mut populated: HeadlessTui) {
    open_edit(&mut populated, "Bob");
    populated.press(KeyCode::Enter);
    assert_eq!(populated.take_requests().len(), 1);

    populated.deliver(Outcome::MutationFinished {
        mutation: Mutation::Update,
        result: Err(ApiError::Status { status: 409, message: Some("Email taken".to_owned()) }),
    });
    assert!(populated.mode().is_editing());
    assert_eq!(populated.toast().as_deref(), Some("Email taken"));
    assert!(populated.screen().contains("Email taken"));
}

#[rstest]
fn search_highlights_and_centers_the_first_match(mut populated: HeadlessTui) {
    populated.press(KeyCode::Char('/'));
    populated.type_text("bob");
    populated.press(KeyCode::Enter);
    assert_eq!(populated.search_query(), "bob");
    assert_eq!(
        populated.take_requests(),
        vec![Request::Search { query: "bob".to_owned() }]
    );

    populated.deliver(Outcome::SearchFinished(Ok(vec![SearchResult {
        id: id(2),
        name: "Bob".to_owned(),
        upline: Some(MemberRef { id: id(1), name: "Alice".to_owned() }),
        downlines: Vec::new(),
    }])));

    assert_eq!(populated.highlighted_id().as_deref(), Some("2"));
    let screen = populated.screen();
    assert!(screen.contains("Search Result"));
    assert!(screen.contains("Upline: Alice"));
    assert_eq!(
        populated.node_center_on_screen(&id(2)),
        Some(populated.tree_area_center())
    );
}

#[rstest]
fn search_escape_keeps_previous_query(mut populated: HeadlessTui) {
    populated.press(KeyCode::Char('/'));
    populated.type_text("ali");
    populated.press(KeyCode::Esc);
    assert_eq!(populated.search_query(), "");
    assert!(populated.take_requests().is_empty());
}

#[rstest]
fn empty_search_result_shows_toast(mut populated: HeadlessTui) {
    populated.press(KeyCode::Char('/'));
    populated.type_text("zed");
    populated.press(KeyCode::Enter);
    populated.deliver(Outcome::SearchFinished(Ok(Vec::new())));
    assert_eq!(populated.highlighted_id(), None);
    assert_eq!(populated.toast().as_deref(), Some("No members found."));
    assert!(!populated.screen().contains("Search Result"));
}

#[rstest]
fn failed_reload_keeps_tree_and_reports(mut populated: HeadlessTui) {
    populated.press(KeyCode::Char('r'));
    assert_eq!(populated.take_requests(), vec![Request::FetchTree]);

    populated.deliver(Outcome::TreeLoaded(Err(ApiError::Transport("refused".to_owned()))));
    let toast = populated.toast().expect("toast");
    assert!(toast.starts_with("Failed to load tree"), "unexpected toast: {toast}");
    assert!(populated.screen().contains("(B) Bob"));
}

#[rstest]
fn panning_moves_and_home_resets(mut populated: HeadlessTui) {
    let start = populated.pan();
    populated.press(KeyCode::Char('l'));
    populated.press(KeyCode::Char('J'));
    assert_eq!(populated.pan(), (start.0 + 1, start.1 + 10));

    populated.press(KeyCode::Home);
    assert_eq!(populated.pan(), (0, 0));
    populated.press(KeyCode::Char('c'));
    assert_eq!(populated.pan(), start);
}

#[rstest]
fn panning_stops_at_the_tree_edge(mut populated: HeadlessTui) {
    for _ in 0..10 {
        populated.press(KeyCode::PageUp);
    }
    // The tree area is 25 rows tall; its last row still shows the tree's first row.
    assert_eq!(populated.pan().1, -24);

    for _ in 0..20 {
        populated.press(KeyCode::Char('L'));
    }
    let clamped = populated.pan();
    assert!(clamped.0 > 0);
    populated.press(KeyCode::Char('l'));
    assert_eq!(populated.pan(), clamped);
}

#[rstest]
fn help_overlay_toggles(mut populated: HeadlessTui) {
    populated.press(KeyCode::Char('?'));
    assert!(populated.screen().contains("--- Tree ---"));
    populated.press(KeyCode::Esc);
    assert!(!populated.screen().contains("--- Tree ---"));
}

#[rstest]
fn q_and_ctrl_c_quit(mut populated: HeadlessTui) {
    assert!(populated.press(KeyCode::Char('q')));

    let mut other = loaded(Vec::new());
    other.press_ctrl('c');
    assert!(other.should_quit());
}

#[rstest]
fn typing_q_in_a_dialog_does_not_quit(mut empty: HeadlessTui) {
    empty.press(KeyCode::Char('a'));
    assert!(!empty.press(KeyCode::Char('q')));
    assert_eq!(empty.form().name, "q");
}
