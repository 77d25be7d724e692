// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{
    Controller, DeleteScope, DialogMode, Mutation, Notice, NoticeLevel, Outcome, Request,
};
use crate::api::ApiError;
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

fn loaded(forest: Vec<TreeNode>) -> Controller {
    let mut controller = Controller::new();
    assert_eq!(controller.start(), Request::FetchTree);
    assert_eq!(controller.apply(Outcome::TreeLoaded(Ok(forest))), None);
    controller
}

#[fixture]
fn empty() -> Controller {
    loaded(Vec::new())
}

#[fixture]
fn populated() -> Controller {
    loaded(alice_and_bob())
}

fn error_notices(controller: &mut Controller) -> Vec<String> {
    controller
        .take_notices()
        .into_iter()
        .filter(|notice| notice.level == NoticeLevel::Error)
        .map(|notice| notice.message)
        .collect()
}

#[rstest]
fn empty_tree_offers_add_root_and_creates_root_member(mut empty: Controller) {
    assert!(empty.can_add_root());
    assert!(empty.open_add_root());
    assert_eq!(empty.mode(), &DialogMode::AddingRoot);
    assert_eq!(empty.mode().title(), "Add Root Member");
    assert_eq!(empty.mode().submit_label(), "Add Member");

    empty.form_mut().name = "Alice".to_owned();
    let request = empty.submit().expect("create request");
    assert_eq!(
        request,
        Request::Create {
            payload: MemberPayload {
                name: "Alice".to_owned(),
                email: String::new(),
                phone: String::new(),
                upline_id: None,
            }
        }
    );

    let follow_up = empty.apply(Outcome::MutationFinished {
        mutation: Mutation::Create,
        result: Ok(()),
    });
    assert_eq!(follow_up, Some(Request::FetchTree));
    assert_eq!(empty.mode(), &DialogMode::Closed);

    empty.apply(Outcome::TreeLoaded(Ok(vec![TreeNode::new(id(1), "Alice")])));
    assert!(!empty.can_add_root());
}

#[rstest]
fn add_root_is_rejected_once_the_tree_has_members(mut populated: Controller) {
    assert!(!populated.can_add_root());
    assert!(!populated.open_add_root());
    assert_eq!(populated.mode(), &DialogMode::Closed);
}

#[rstest]
fn editing_prefills_form_and_counts_downlines(mut populated: Controller) {
    assert!(populated.open_edit(&id(1)));
    assert!(populated.mode().is_editing());
    assert_eq!(populated.mode().title(), "Edit Member");
    assert_eq!(populated.mode().submit_label(), "Save Changes");
    assert_eq!(populated.form().name, "Alice");
    assert_eq!(populated.form().email, "alice@example.test");
    assert_eq!(populated.form().phone, "555-0100");
    assert_eq!(populated.downline_count(), Some(1));
    assert_eq!(populated.selected_node().map(|node| node.id.clone()), Some(id(1)));
}

#[rstest]
fn open_edit_ignores_unknown_ids(mut populated: Controller) {
    assert!(!populated.open_edit(&id(99)));
    assert_eq!(populated.mode(), &DialogMode::Closed);
}

#[rstest]
fn add_downline_clears_form_and_targets_the_edited_node(mut populated: Controller) {
    populated.open_edit(&id(1));
    assert!(populated.start_add_downline());
    assert!(matches!(populated.mode(), DialogMode::AddingChild { upline } if upline.id == id(1)));
    assert_eq!(populated.mode().title(), "Add Downline");
    assert_eq!(populated.form().name, "");
    assert_eq!(populated.form().email, "");

    populated.form_mut().name = "Bob".to_owned();
    let request = populated.submit().expect("create request");
    let Request::Create { payload } = request else {
        panic!("expected create, got {request:?}");
    };
    assert_eq!(payload.name, "Bob");
    assert_eq!(payload.upline_id, Some(id(1)));
}

#[rstest]
fn add_downline_requires_edit_mode(mut populated: Controller) {
    assert!(!populated.start_add_downline());
    populated.open_add_root();
    assert!(!populated.start_add_downline());
}

#[rstest]
fn update_preserves_existing_upline(mut populated: Controller) {
    populated.open_edit(&id(2));
    populated.form_mut().email = "bob@example.test".to_owned();
    let request = populated.submit().expect("update request");
    assert_eq!(
        request,
        Request::Update {
            id: id(2),
            payload: MemberPayload {
                name: "Bob".to_owned(),
                email: "bob@example.test".to_owned(),
                phone: String::new(),
                upline_id: Some(id(1)),
            }
        }
    );
}

#[rstest]
fn update_of_a_root_sends_null_upline(mut populated: Controller) {
    populated.open_edit(&id(1));
    let Some(Request::Update { payload, .. }) = populated.submit() else {
        panic!("expected update request");
    };
    assert_eq!(payload.upline_id, None);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_name_never_builds_a_request(mut populated: Controller, #[case] name: &str) {
    populated.open_edit(&id(1));
    populated.form_mut().name = name.to_owned();
    assert_eq!(populated.submit(), None);
    assert_eq!(error_notices(&mut populated), vec!["Name is required.".to_owned()]);
    assert!(populated.mode().is_editing(), "dialog stays open for correction");
}

#[rstest]
fn submit_without_dialog_is_a_no_op(mut populated: Controller) {
    assert_eq!(populated.submit(), None);
    assert!(populated.take_notices().is_empty());
}

#[rstest]
#[case(DeleteScope::MemberOnly, Request::Delete { id: MemberId::from_number(1) })]
#[case(DeleteScope::WithDownlines, Request::CascadeDelete { id: MemberId::from_number(1) })]
fn delete_goes_through_confirmation(
    mut populated: Controller,
    #[case] scope: DeleteScope,
    #[case] expected: Request,
) {
    populated.open_edit(&id(1));
    assert_eq!(populated.confirm_delete(scope), None, "confirmation must be requested first");

    assert!(populated.request_delete());
    assert!(populated.is_confirming_delete());
    assert_eq!(
        populated.delete_prompt().as_deref(),
        Some("This member has 1 downline. What do you want to do?")
    );

    assert_eq!(populated.confirm_delete(scope), Some(expected));
    assert!(!populated.is_confirming_delete());
    assert!(populated.mode().is_editing(), "edit dialog closes only after success");
}

#[rstest]
fn delete_prompt_pluralizes(mut populated: Controller) {
    populated.open_edit(&id(2));
    populated.request_delete();
    assert_eq!(
        populated.delete_prompt().as_deref(),
        Some("This member has 0 downlines. What do you want to do?")
    );
}

#[rstest]
fn cancelling_confirmation_keeps_edit_dialog(mut populated: Controller) {
    populated.open_edit(&id(1));
    populated.request_delete();
    populated.cancel_delete();
    assert!(!populated.is_confirming_delete());
    assert!(populated.mode().is_editing());
}

#[rstest]
fn request_delete_requires_edit_mode(mut empty: Controller) {
    empty.open_add_root();
    assert!(!empty.request_delete());
}

#[rstest]
#[case(Mutation::Create)]
#[case(Mutation::Update)]
#[case(Mutation::Delete)]
#[case(Mutation::CascadeDelete)]
fn successful_mutation_closes_dialog_and_refetches_once(
    mut populated: Controller,
    #[case] mutation: Mutation,
) {
    populated.open_edit(&id(1));
    let follow_up = populated.apply(Outcome::MutationFinished { mutation, result: Ok(()) });
    assert_eq!(follow_up, Some(Request::FetchTree));
    assert_eq!(populated.mode(), &DialogMode::Closed);
    assert!(!populated.is_confirming_delete());
    assert_eq!(
        populated.take_notices(),
        vec![Notice {
            level: NoticeLevel::Success,
            message: mutation.success_message().to_owned()
        }]
    );
}

#[rstest]
#[case(
    Mutation::Create,
    ApiError::Status { status: 409, message: Some("Email already used".to_owned()) },
    "Email already used"
)]
#[case(Mutation::Update, ApiError::Status { status: 500, message: None }, "An error occurred.")]
#[case(
    Mutation::Delete,
    ApiError::Status { status: 404, message: None },
    "Failed to delete member."
)]
#[case(
    Mutation::CascadeDelete,
    ApiError::Status { status: 500, message: Some(String::new()) },
    "Failed to delete subtree."
)]
#[case(
    Mutation::Create,
    ApiError::Transport("connection refused".to_owned()),
    "Network or server error occurred."
)]
#[case(
    Mutation::Delete,
    ApiError::Transport("timed out".to_owned()),
    "Failed to delete member. Network or server error."
)]
#[case(
    Mutation::CascadeDelete,
    ApiError::Transport("timed out".to_owned()),
    "Failed to delete subtree. Network or server error."
)]
fn failed_mutation_keeps_dialog_open_and_reports(
    mut populated: Controller,
    #[case] mutation: Mutation,
    #[case] err: ApiError,
    #[case] expected: &str,
) {
    populated.open_edit(&id(1));
    let follow_up = populated.apply(Outcome::MutationFinished { mutation, result: Err(err) });
    assert_eq!(follow_up, None);
    assert!(populated.mode().is_editing());
    assert_eq!(error_notices(&mut populated), vec![expected.to_owned()]);
}

#[rstest]
#[case("")]
#[case("  \t")]
fn blank_search_is_a_no_op(mut populated: Controller, #[case] query: &str) {
    assert_eq!(populated.search(query), None);
}

#[rstest]
fn search_sends_the_query_as_typed(mut populated: Controller) {
    assert_eq!(populated.search(" Bob "), Some(Request::Search { query: " Bob ".to_owned() }));
}

#[rstest]
fn search_highlights_first_result_and_summarizes_it(mut populated: Controller) {
    let results = vec![
        SearchResult {
            id: id(2),
            name: "Bob".to_owned(),
            upline: Some(MemberRef { id: id(1), name: "Alice".to_owned() }),
            downlines: Vec::new(),
        },
        SearchResult { id: id(7), name: "Bobby".to_owned(), upline: None, downlines: Vec::new() },
    ];
    assert_eq!(populated.apply(Outcome::SearchFinished(Ok(results))), None);

    assert_eq!(populated.highlighted_id(), Some("2"));
    assert_eq!(populated.pending_focus(), Some(&id(2)));
    let summary = populated.search_summary().expect("summary");
    assert_eq!(summary.name, "Bob");
    assert_eq!(summary.upline.as_deref(), Some("Alice"));
    assert_eq!(summary.downlines, None);

    assert_eq!(populated.take_pending_focus(), Some(id(2)));
    assert_eq!(populated.take_pending_focus(), None);
}

#[rstest]
fn search_summary_joins_downline_names(mut populated: Controller) {
    let results = vec![SearchResult {
        id: id(1),
        name: "Alice".to_owned(),
        upline: None,
        downlines: vec![
            MemberRef { id: id(2), name: "Bob".to_owned() },
            MemberRef { id: id(3), name: "Cara".to_owned() },
        ],
    }];
    populated.apply(Outcome::SearchFinished(Ok(results)));
    let summary = populated.search_summary().expect("summary");
    assert_eq!(summary.upline, None);
    assert_eq!(summary.downlines.as_deref(), Some("Bob, Cara"));
}

#[rstest]
fn empty_search_clears_highlight_and_results(mut populated: Controller) {
    populated.apply(Outcome::SearchFinished(Ok(vec![SearchResult {
        id: id(2),
        name: "Bob".to_owned(),
        upline: None,
        downlines: Vec::new(),
    }])));
    populated.take_pending_focus();

    populated.apply(Outcome::SearchFinished(Ok(Vec::new())));
    assert_eq!(populated.highlighted_id(), None);
    assert!(populated.search_results().is_empty());
    assert_eq!(populated.search_summary(), None);
    assert_eq!(populated.pending_focus(), None);
    assert_eq!(error_notices(&mut populated), vec!["No members found.".to_owned()]);
}

#[rstest]
fn failed_search_reports_and_keeps_previous_results(mut populated: Controller) {
    populated.apply(Outcome::SearchFinished(Ok(vec![SearchResult {
        id: id(2),
        name: "Bob".to_owned(),
        upline: None,
        downlines: Vec::new(),
    }])));
    populated.apply(Outcome::SearchFinished(Err(ApiError::Transport("boom".to_owned()))));
    assert_eq!(populated.highlighted_id(), Some("2"));
    assert_eq!(error_notices(&mut populated), vec!["Failed to perform search.".to_owned()]);
}

#[test]
fn failed_fetch_is_reported_and_keeps_previous_tree() {
    let mut controller = loaded(alice_and_bob());
    let rev = controller.tree_rev();
    controller.apply(Outcome::TreeLoaded(Err(ApiError::Transport("refused".to_owned()))));
    assert_eq!(controller.forest().len(), 1);
    assert_eq!(controller.tree_rev(), rev);
    let errors = error_notices(&mut controller);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Failed to load tree:"), "unexpected notice: {}", errors[0]);
}

#[test]
fn first_failed_fetch_still_marks_tree_loaded() {
    let mut controller = Controller::new();
    assert!(!controller.is_loaded());
    controller.apply(Outcome::TreeLoaded(Err(ApiError::Transport("refused".to_owned()))));
    assert!(controller.is_loaded());
    assert!(controller.can_add_root());
}

#[test]
fn each_fetch_bumps_tree_revision() {
    let mut controller = Controller::new();
    let before = controller.tree_rev();
    controller.apply(Outcome::TreeLoaded(Ok(alice_and_bob())));
    controller.apply(Outcome::TreeLoaded(Ok(alice_and_bob())));
    assert_eq!(controller.tree_rev(), before + 2);
}

#[rstest]
fn cancel_resets_form_and_mode(mut populated: Controller) {
    populated.open_edit(&id(1));
    populated.request_delete();
    populated.cancel_dialog();
    assert_eq!(populated.mode(), &DialogMode::Closed);
    assert!(!populated.is_confirming_delete());
    assert_eq!(populated.form().name, "");
}
