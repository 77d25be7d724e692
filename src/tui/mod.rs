// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The interactive shell (ratatui + crossterm) around [`Controller`]: a pannable tree viewport
//! with hint jumps and mouse hits, the search bar and summary panel, member dialogs and toasts.

use std::{
    collections::BTreeSet,
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tokio::runtime::Handle;

use crate::api::MemberApi;
use crate::controller::{
    Controller, DeleteScope, DialogMode, NoticeLevel, Outcome, Request, SearchSummary,
};
use crate::dispatch::Dispatcher;
use crate::focus::Viewport;
use crate::layout::{layout_forest, TreeLayout, TreeLayoutConfig};
use crate::model::{FormField, MemberId};
use crate::render::{render_tree, HitArea, TreeRender};

mod hints;

const NODE_COLOR: Color = Color::Blue;
const MATCH_COLOR: Color = Color::Green;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const NODE_HINT_CHARS: &str = "ASDFJKLEWCMPGH";
const TOAST_TTL: Duration = Duration::from_secs(3);
const PAN_PAGE: i32 = 10;
const SUMMARY_WIDTH: u16 = 34;

/// Runs the interactive terminal UI until the user quits.
///
/// Requests are spawned on `runtime`; this function blocks the calling thread.
pub fn run(api: Arc<dyn MemberApi>, runtime: Handle) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut dispatcher = Dispatcher::new(api, runtime);
    let mut app = App::new(TreeLayoutConfig::default());

    while !app.should_quit {
        while let Some(outcome) = dispatcher.try_next() {
            app.apply_outcome(outcome);
        }
        for request in app.take_requests() {
            dispatcher.dispatch(request);
        }

        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());
    let (header_area, search_area, main_area, footer_area) = (rows[0], rows[1], rows[2], rows[3]);

    frame.render_widget(Paragraph::new(header_line(app)), header_area);
    frame.render_widget(Paragraph::new(search_bar_line(app)), search_area);
    if app.search_mode == SearchMode::Editing {
        let cursor_x = search_area
            .x
            .saturating_add(SEARCH_PREFIX.chars().count() as u16)
            .saturating_add(app.search_draft.chars().count() as u16)
            .min(search_area.right().saturating_sub(1));
        frame.set_cursor_position((cursor_x, search_area.y));
    }

    let summary = app.controller.search_summary();
    let (tree_area, summary_area) = match &summary {
        Some(_) if main_area.width > SUMMARY_WIDTH * 2 => {
            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(SUMMARY_WIDTH)])
                .split(main_area);
            (panes[0], Some(panes[1]))
        }
        _ => (main_area, None),
    };

    let block = Block::default().borders(Borders::ALL).title(" Members ");
    let inner = block.inner(tree_area);
    frame.render_widget(block, tree_area);
    app.tree_area = inner;
    app.ensure_render();
    app.settle_view(inner.width, inner.height);

    if app.controller.is_loaded() && app.controller.forest().is_empty() {
        let empty = Paragraph::new("No members yet. Press [a] to add the root member.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
    } else {
        frame.render_widget(Paragraph::new(tree_text(app, inner.width, inner.height)), inner);
    }

    if let (Some(summary), Some(area)) = (summary, summary_area) {
        render_summary(frame, &summary, area);
    }

    if app.toast.as_ref().is_some_and(|toast| toast.expires_at <= Instant::now()) {
        app.toast = None;
    }
    frame.render_widget(Paragraph::new(footer_line(app)), footer_area);

    if app.controller.mode().is_open() {
        render_dialog(frame, app, main_area);
        if app.controller.is_confirming_delete() {
            render_confirm(frame, app, main_area);
        }
    }

    if app.show_help {
        render_help(frame, app, main_area);
    }
}

// Header, footer, panel, dialog and help rendering helpers.
include!("chrome.rs");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchMode {
    Inactive,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HintKind {
    /// Acts like a click on the label: opens the edit dialog.
    Open,
    /// Acts like a click on the circle: toggles collapse.
    Collapse,
}

#[derive(Debug, Clone)]
struct HintTarget {
    label: String,
    id: MemberId,
    x: usize,
    y: usize,
}

#[derive(Debug, Clone, Default)]
enum HintMode {
    #[default]
    Inactive,
    Awaiting {
        kind: HintKind,
        typed: String,
        targets: Vec<HintTarget>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogButton {
    Submit,
    AddDownline,
    Delete,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogFocus {
    Field(FormField),
    Button(DialogButton),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmChoice {
    DeleteOnly,
    DeleteWithDownlines,
    Cancel,
}

impl ConfirmChoice {
    const ALL: [Self; 3] = [Self::DeleteOnly, Self::DeleteWithDownlines, Self::Cancel];

    fn label(self) -> &'static str {
        match self {
            Self::DeleteOnly => "Delete Only",
            Self::DeleteWithDownlines => "Delete + Downlines",
            Self::Cancel => "Cancel",
        }
    }
}

struct Toast {
    message: String,
    level: NoticeLevel,
    expires_at: Instant,
}

struct App {
    controller: Controller,
    outbox: Vec<Request>,
    layout_config: TreeLayoutConfig,
    collapsed: BTreeSet<MemberId>,
    tree_rev: u64,
    layout: TreeLayout,
    render: TreeRender,
    render_dirty: bool,
    pan_x: i32,
    pan_y: i32,
    viewport_width: u16,
    viewport_height: u16,
    tree_area: Rect,
    center_on_next_draw: bool,
    search_mode: SearchMode,
    search_query: String,
    search_draft: String,
    hint_mode: HintMode,
    dialog_focus: DialogFocus,
    confirm_choice: ConfirmChoice,
    show_help: bool,
    help_scroll: u16,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(layout_config: TreeLayoutConfig) -> Self {
        let mut controller = Controller::new();
        let initial = controller.start();
        Self {
            tree_rev: controller.tree_rev(),
            controller,
            outbox: vec![initial],
            layout_config,
            collapsed: BTreeSet::new(),
            layout: TreeLayout::default(),
            render: TreeRender::default(),
            render_dirty: true,
            pan_x: 0,
            pan_y: 0,
            viewport_width: 0,
            viewport_height: 0,
            tree_area: Rect::default(),
            center_on_next_draw: true,
            search_mode: SearchMode::Inactive,
            search_query: String::new(),
            search_draft: String::new(),
            hint_mode: HintMode::Inactive,
            dialog_focus: DialogFocus::Field(FormField::Name),
            confirm_choice: ConfirmChoice::DeleteOnly,
            show_help: false,
            help_scroll: 0,
            toast: None,
            should_quit: false,
        }
    }

    fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    fn queue(&mut self, request: Option<Request>) {
        if let Some(request) = request {
            self.outbox.push(request);
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        let follow_up = self.controller.apply(outcome);
        self.queue(follow_up);
        self.sync_from_controller();
    }

    /// Pulls notices and tree changes out of the controller after a transition.
    fn sync_from_controller(&mut self) {
        if let Some(notice) = self.controller.take_notices().pop() {
            self.set_toast(notice.level, notice.message);
        }

        if self.controller.tree_rev() != self.tree_rev {
            self.tree_rev = self.controller.tree_rev();
            self.collapsed.clear();
            self.hint_mode = HintMode::Inactive;
            self.render_dirty = true;
            self.center_on_next_draw = true;
        }

        if !self.controller.mode().is_open() {
            self.dialog_focus = DialogFocus::Field(FormField::Name);
        }
    }

    fn ensure_render(&mut self) {
        if !self.render_dirty {
            return;
        }
        self.render_dirty = false;
        self.layout = layout_forest(self.controller.forest(), &self.collapsed, &self.layout_config);
        self.render = match render_tree(&self.layout) {
            Ok(render) => render,
            Err(err) => {
                log::warn!("tree render failed: {err}");
                self.set_toast(NoticeLevel::Error, format!("Failed to draw tree: {err}"));
                TreeRender::default()
            }
        };
    }

    /// Applies deferred view changes once the current layout is known.
    fn settle_view(&mut self, width: u16, height: u16) {
        self.viewport_width = width;
        self.viewport_height = height;
        if width == 0 || height == 0 {
            return;
        }

        if self.center_on_next_draw && self.controller.is_loaded() {
            self.center_on_next_draw = false;
            self.center_tree();
        }

        if let Some(id) = self.controller.take_pending_focus() {
            if let Some((pan_x, pan_y)) = self.viewport().centered_on(&self.render, &id) {
                self.pan_x = pan_x;
                self.pan_y = pan_y;
            } else {
                log::debug!("search match {id} is not rendered; keeping the view");
            }
        }
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            pan_x: self.pan_x,
            pan_y: self.pan_y,
            width: self.viewport_width,
            height: self.viewport_height,
        }
    }

    /// Centers the whole tree horizontally; short trees are centered vertically too.
    fn center_tree(&mut self) {
        let render_width = i32::try_from(self.render.width()).unwrap_or(i32::MAX);
        let render_height = i32::try_from(self.render.height()).unwrap_or(i32::MAX);
        let width = i32::from(self.viewport_width);
        let height = i32::from(self.viewport_height);
        self.pan_x = (render_width - width) / 2;
        self.pan_y = if render_height < height {
            (render_height - height) / 2
        } else {
            0
        };
    }

    fn set_toast(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the app should quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                KeyCode::Down | KeyCode::Char('j') => {
                    self.help_scroll = self.help_scroll.saturating_add(1);
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.help_scroll = self.help_scroll.saturating_sub(1);
                }
                KeyCode::Home => self.help_scroll = 0,
                _ => {}
            }
            return false;
        }

        if self.controller.mode().is_open() {
            self.handle_dialog_key(code);
            return false;
        }

        if self.search_mode == SearchMode::Editing {
            self.handle_search_edit_key(code);
            return false;
        }

        if self.handle_hint_key(code) {
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => {
                self.show_help = true;
                self.help_scroll = 0;
            }
            KeyCode::Char('/') => self.enter_search_mode(),
            KeyCode::Char('a') => self.open_add_root(),
            KeyCode::Char('r') => {
                let request = self.controller.refresh();
                self.outbox.push(request);
            }
            KeyCode::Char('f') => self.enter_hint_mode(HintKind::Open),
            KeyCode::Char('z') => self.enter_hint_mode(HintKind::Collapse),
            KeyCode::Char('c') => self.center_tree(),
            KeyCode::Up | KeyCode::Char('k') => self.pan_y = self.pan_y.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.pan_y = self.pan_y.saturating_add(1),
            KeyCode::Left | KeyCode::Char('h') => self.pan_x = self.pan_x.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => self.pan_x = self.pan_x.saturating_add(1),
            KeyCode::Char('K') | KeyCode::PageUp => {
                self.pan_y = self.pan_y.saturating_sub(PAN_PAGE);
            }
            KeyCode::Char('J') | KeyCode::PageDown => {
                self.pan_y = self.pan_y.saturating_add(PAN_PAGE);
            }
            KeyCode::Char('H') => self.pan_x = self.pan_x.saturating_sub(PAN_PAGE),
            KeyCode::Char('L') => self.pan_x = self.pan_x.saturating_add(PAN_PAGE),
            KeyCode::Home => {
                self.pan_x = 0;
                self.pan_y = 0;
            }
            _ => {}
        }
        self.clamp_pan();

        false
    }

    /// Keeps at least one row and column of the tree inside the viewport.
    fn clamp_pan(&mut self) {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return;
        }
        let max_x = i32::try_from(self.render.width()).unwrap_or(i32::MAX).saturating_sub(1);
        let max_y = i32::try_from(self.render.height()).unwrap_or(i32::MAX).saturating_sub(1);
        let min_x = 1 - i32::from(self.viewport_width);
        let min_y = 1 - i32::from(self.viewport_height);
        self.pan_x = self.pan_x.clamp(min_x, max_x.max(min_x));
        self.pan_y = self.pan_y.clamp(min_y, max_y.max(min_y));
    }

    fn open_add_root(&mut self) {
        if !self.controller.is_loaded() {
            return;
        }
        if self.controller.open_add_root() {
            self.dialog_focus = DialogFocus::Field(FormField::Name);
        } else {
            self.set_toast(NoticeLevel::Info, "The tree already has a root member.");
        }
    }

    fn open_node(&mut self, id: &MemberId) {
        if self.controller.open_edit(id) {
            self.dialog_focus = DialogFocus::Field(FormField::Name);
        }
    }

    fn toggle_collapse(&mut self, id: &MemberId) {
        let has_children = self
            .layout
            .placement(id)
            .is_some_and(|placement| placement.is_folded() || !placement.children().is_empty());
        if !has_children {
            return;
        }
        if !self.collapsed.remove(id) {
            self.collapsed.insert(id.clone());
        }
        self.render_dirty = true;
    }

    fn enter_search_mode(&mut self) {
        self.hint_mode = HintMode::Inactive;
        self.search_mode = SearchMode::Editing;
        self.search_draft = self.search_query.clone();
    }

    fn handle_search_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.search_mode = SearchMode::Inactive,
            KeyCode::Enter => {
                self.search_mode = SearchMode::Inactive;
                self.search_query = self.search_draft.clone();
                let request = self.controller.search(&self.search_query);
                self.queue(request);
            }
            KeyCode::Backspace => {
                self.search_draft.pop();
            }
            KeyCode::Char(ch) => self.search_draft.push(ch),
            _ => {}
        }
    }

    fn enter_hint_mode(&mut self, kind: HintKind) {
        self.ensure_render();
        let targets = self.hint_targets(kind);
        if targets.is_empty() {
            self.set_toast(NoticeLevel::Info, "No members in view.");
            return;
        }
        self.hint_mode = HintMode::Awaiting {
            kind,
            typed: String::new(),
            targets,
        };
    }

    fn hint_targets(&self, kind: HintKind) -> Vec<HintTarget> {
        let visible = self
            .layout
            .placements()
            .iter()
            .filter(|placement| {
                kind == HintKind::Open
                    || placement.is_folded()
                    || !placement.children().is_empty()
            })
            .filter(|placement| self.is_in_view(placement.x(), placement.y()))
            .collect::<Vec<_>>();
        let labels = hints::gen_labels(visible.len(), NODE_HINT_CHARS);
        visible
            .into_iter()
            .zip(labels)
            .map(|(placement, label)| HintTarget {
                label,
                id: placement.id().clone(),
                x: placement.x(),
                y: placement.y(),
            })
            .collect()
    }

    fn is_in_view(&self, x: usize, y: usize) -> bool {
        self.to_view(x, y).is_some()
    }

    /// Converts render coordinates to viewport cells.
    fn to_view(&self, x: usize, y: usize) -> Option<(usize, usize)> {
        let vx = i64::try_from(x).ok()? - i64::from(self.pan_x);
        let vy = i64::try_from(y).ok()? - i64::from(self.pan_y);
        let vx = usize::try_from(vx).ok()?;
        let vy = usize::try_from(vy).ok()?;
        (vx < usize::from(self.viewport_width) && vy < usize::from(self.viewport_height))
            .then_some((vx, vy))
    }

    fn handle_hint_key(&mut self, code: KeyCode) -> bool {
        let HintMode::Awaiting {
            kind,
            mut typed,
            targets,
        } = std::mem::take(&mut self.hint_mode)
        else {
            return false;
        };

        match code {
            KeyCode::Esc => {}
            KeyCode::Char(ch) => {
                typed.push(ch.to_ascii_uppercase());
                let hit = targets
                    .iter()
                    .find(|target| target.label.eq_ignore_ascii_case(&typed))
                    .map(|target| target.id.clone());
                if let Some(id) = hit {
                    match kind {
                        HintKind::Open => self.open_node(&id),
                        HintKind::Collapse => self.toggle_collapse(&id),
                    }
                } else if hints::matching(targets.iter().map(|t| t.label.as_str()), &typed)
                    .is_empty()
                {
                    self.set_toast(NoticeLevel::Info, format!("No hint '{typed}'"));
                } else {
                    self.hint_mode = HintMode::Awaiting {
                        kind,
                        typed,
                        targets,
                    };
                }
            }
            _ => {
                self.hint_mode = HintMode::Awaiting {
                    kind,
                    typed,
                    targets,
                };
            }
        }
        true
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }
        if self.show_help
            || self.controller.mode().is_open()
            || self.search_mode == SearchMode::Editing
        {
            return;
        }
        self.click(mouse.column, mouse.row);
    }

    fn click(&mut self, column: u16, row: u16) {
        let area = self.tree_area;
        if column < area.x || row < area.y || column >= area.right() || row >= area.bottom() {
            return;
        }
        let x = i32::from(column - area.x).saturating_add(self.pan_x);
        let y = i32::from(row - area.y).saturating_add(self.pan_y);
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        let Some((id, hit)) = self.render.hit_test(x, y).map(|(id, hit)| (id.clone(), hit)) else {
            return;
        };

        self.hint_mode = HintMode::Inactive;
        match hit {
            HitArea::Circle => self.toggle_collapse(&id),
            HitArea::Label => self.open_node(&id),
        }
    }

    fn dialog_buttons(&self) -> Vec<DialogButton> {
        let mut buttons = vec![DialogButton::Submit];
        if self.controller.mode().is_editing() {
            buttons.extend([DialogButton::AddDownline, DialogButton::Delete]);
        }
        buttons.push(DialogButton::Cancel);
        buttons
    }

    fn dialog_ring(&self) -> Vec<DialogFocus> {
        FormField::ALL
            .into_iter()
            .map(DialogFocus::Field)
            .chain(self.dialog_buttons().into_iter().map(DialogFocus::Button))
            .collect()
    }

    fn cycle_dialog_focus(&mut self, step: isize) {
        let ring = self.dialog_ring();
        let pos = ring.iter().position(|focus| *focus == self.dialog_focus).unwrap_or(0);
        let next = (pos as isize + step).rem_euclid(ring.len() as isize) as usize;
        self.dialog_focus = ring[next];
    }

    fn handle_dialog_key(&mut self, code: KeyCode) {
        if self.controller.is_confirming_delete() {
            self.handle_confirm_key(code);
            return;
        }

        match code {
            KeyCode::Esc => {
                self.controller.cancel_dialog();
                self.sync_from_controller();
            }
            KeyCode::Tab | KeyCode::Down => self.cycle_dialog_focus(1),
            KeyCode::BackTab | KeyCode::Up => self.cycle_dialog_focus(-1),
            KeyCode::Enter => match self.dialog_focus {
                DialogFocus::Field(_) => self.submit_dialog(),
                DialogFocus::Button(button) => self.activate_dialog_button(button),
            },
            KeyCode::Backspace => {
                if let DialogFocus::Field(field) = self.dialog_focus {
                    self.controller.form_mut().field_mut(field).pop();
                }
            }
            KeyCode::Char(ch) => {
                if let DialogFocus::Field(field) = self.dialog_focus {
                    self.controller.form_mut().field_mut(field).push(ch);
                }
            }
            _ => {}
        }
    }

    fn submit_dialog(&mut self) {
        let request = self.controller.submit();
        self.queue(request);
        self.sync_from_controller();
    }

    fn activate_dialog_button(&mut self, button: DialogButton) {
        match button {
            DialogButton::Submit => self.submit_dialog(),
            DialogButton::AddDownline => {
                if self.controller.start_add_downline() {
                    self.dialog_focus = DialogFocus::Field(FormField::Name);
                }
            }
            DialogButton::Delete => {
                if self.controller.request_delete() {
                    self.confirm_choice = ConfirmChoice::DeleteOnly;
                }
            }
            DialogButton::Cancel => {
                self.controller.cancel_dialog();
                self.sync_from_controller();
            }
        }
    }

    fn handle_confirm_key(&mut self, code: KeyCode) {
        let pos = ConfirmChoice::ALL
            .iter()
            .position(|choice| *choice == self.confirm_choice)
            .unwrap_or(0);
        let len = ConfirmChoice::ALL.len();
        match code {
            KeyCode::Esc => self.controller.cancel_delete(),
            KeyCode::Tab | KeyCode::Right | KeyCode::Down => {
                self.confirm_choice = ConfirmChoice::ALL[(pos + 1) % len];
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Up => {
                self.confirm_choice = ConfirmChoice::ALL[(pos + len - 1) % len];
            }
            KeyCode::Enter => {
                let scope = match self.confirm_choice {
                    ConfirmChoice::DeleteOnly => DeleteScope::MemberOnly,
                    ConfirmChoice::DeleteWithDownlines => DeleteScope::WithDownlines,
                    ConfirmChoice::Cancel => {
                        self.controller.cancel_delete();
                        return;
                    }
                };
                let request = self.controller.confirm_delete(scope);
                self.queue(request);
            }
            _ => {}
        }
    }
}

/// The visible window of the rendered tree with node, match and hint styling.
fn tree_text(app: &App, width: u16, height: u16) -> Text<'static> {
    let (width, height) = (usize::from(width), usize::from(height));
    let mut grid = vec![vec![(' ', Style::default()); width]; height];

    let first_row = usize::try_from(app.pan_y.max(0)).unwrap_or(0);
    for (y, line) in app.render.lines().iter().enumerate().skip(first_row).take(height) {
        for (x, ch) in line.chars().enumerate() {
            if let Some((vx, vy)) = app.to_view(x, y) {
                grid[vy][vx].0 = ch;
            }
        }
    }

    let highlighted = app.controller.highlighted_id();
    for (id, spans) in app.render.nodes() {
        let is_match = highlighted == Some(id.as_str());
        let (y, x0, x1) = spans.circle;
        for x in x0..=x1 {
            if let Some((vx, vy)) = app.to_view(x, y) {
                grid[vy][vx].1 = node_circle_style(is_match);
            }
        }
        if is_match {
            if let Some(&(y, x0, x1)) = spans.label.first() {
                for x in x0..=x1 {
                    if let Some((vx, vy)) = app.to_view(x, y) {
                        grid[vy][vx].1 =
                            Style::default().fg(MATCH_COLOR).add_modifier(Modifier::BOLD);
                    }
                }
            }
        }
    }

    if let HintMode::Awaiting { typed, targets, .. } = &app.hint_mode {
        for target in targets.iter().filter(|target| target.label.starts_with(typed.as_str())) {
            for (offset, ch) in target.label.chars().enumerate() {
                if let Some((vx, vy)) = app.to_view(target.x + offset, target.y) {
                    grid[vy][vx] = (ch, hint_style());
                }
            }
        }
    }

    Text::from(grid.into_iter().map(cells_to_line).collect::<Vec<_>>())
}

fn cells_to_line(cells: Vec<(char, Style)>) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    let mut current = String::new();
    let mut current_style = Style::default();
    for (ch, style) in cells {
        if style != current_style && !current.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut current), current_style));
        }
        current_style = style;
        current.push(ch);
    }
    if !current.is_empty() {
        spans.push(Span::styled(current, current_style));
    }
    Line::from(spans)
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}


#[cfg(test)]
mod tests;
