// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Selection, form and mutation state for the member tree view.
//!
//! [`Controller`] is the single owner of every piece of interactive state (the fetched forest,
//! dialog mode, form fields, delete confirmation, search results and highlight). Each user event
//! is one transition method. Transitions never perform I/O; when a transition needs the API it
//! returns a [`Request`] for the caller to dispatch, and the matching [`Outcome`] is fed back
//! through [`Controller::apply`].

use crate::api::ApiError;
use crate::model::{
    count_downlines, find_node, FormState, MemberId, MemberPayload, SearchResult, TreeNode,
};

/// An API call the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    FetchTree,
    Search { query: String },
    Create { payload: MemberPayload },
    Update { id: MemberId, payload: MemberPayload },
    Delete { id: MemberId },
    CascadeDelete { id: MemberId },
}

impl Request {
    /// The mutation kind for write requests.
    pub fn mutation(&self) -> Option<Mutation> {
        match self {
            Self::FetchTree | Self::Search { .. } => None,
            Self::Create { .. } => Some(Mutation::Create),
            Self::Update { .. } => Some(Mutation::Update),
            Self::Delete { .. } => Some(Mutation::Delete),
            Self::CascadeDelete { .. } => Some(Mutation::CascadeDelete),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
    CascadeDelete,
}

impl Mutation {
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Create => "Member created successfully.",
            Self::Update => "Member updated.",
            Self::Delete => "Member deleted.",
            Self::CascadeDelete => "Member and all downlines deleted.",
        }
    }

    /// Shown when the server rejects the call without a usable `message`.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::Create | Self::Update => "An error occurred.",
            Self::Delete => "Failed to delete member.",
            Self::CascadeDelete => "Failed to delete subtree.",
        }
    }

    pub fn network_message(self) -> &'static str {
        match self {
            Self::Create | Self::Update => "Network or server error occurred.",
            Self::Delete => "Failed to delete member. Network or server error.",
            Self::CascadeDelete => "Failed to delete subtree. Network or server error.",
        }
    }

    /// User-facing message for a failed call.
    pub fn failure_message(self, err: &ApiError) -> String {
        if let Some(message) = err.server_message() {
            return message.to_owned();
        }
        if err.is_server_reported() {
            self.fallback_message().to_owned()
        } else {
            self.network_message().to_owned()
        }
    }
}

/// The result of a dispatched [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    TreeLoaded(Result<Vec<TreeNode>, ApiError>),
    SearchFinished(Result<Vec<SearchResult>, ApiError>),
    MutationFinished { mutation: Mutation, result: Result<(), ApiError> },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogMode {
    #[default]
    Closed,
    AddingRoot,
    AddingChild {
        upline: TreeNode,
    },
    Editing {
        node: TreeNode,
        downlines: usize,
    },
}

impl DialogMode {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Closed => "",
            Self::AddingRoot => "Add Root Member",
            Self::AddingChild { .. } => "Add Downline",
            Self::Editing { .. } => "Edit Member",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Save Changes"
        } else {
            "Add Member"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    MemberOnly,
    WithDownlines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient message for the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Lines of the search summary panel for the first result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSummary {
    pub name: String,
    pub upline: Option<String>,
    pub downlines: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Controller {
    forest: Vec<TreeNode>,
    loaded: bool,
    tree_rev: u64,
    mode: DialogMode,
    confirming_delete: bool,
    form: FormState,
    highlighted_id: Option<String>,
    search_results: Vec<SearchResult>,
    pending_focus: Option<MemberId>,
    notices: Vec<Notice>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial load.
    pub fn start(&mut self) -> Request {
        Request::FetchTree
    }

    pub fn refresh(&mut self) -> Request {
        Request::FetchTree
    }

    pub fn forest(&self) -> &[TreeNode] {
        &self.forest
    }

    /// `false` until the first fetch has completed (successfully or not).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Bumped on every successful fetch; view state keyed to the old tree must be dropped.
    pub fn tree_rev(&self) -> u64 {
        self.tree_rev
    }

    pub fn mode(&self) -> &DialogMode {
        &self.mode
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// The node the dialog is about: the edited node, or the upline of a new downline.
    pub fn selected_node(&self) -> Option<&TreeNode> {
        match &self.mode {
            DialogMode::Editing { node, .. } => Some(node),
            DialogMode::AddingChild { upline } => Some(upline),
            DialogMode::Closed | DialogMode::AddingRoot => None,
        }
    }

    pub fn downline_count(&self) -> Option<usize> {
        match &self.mode {
            DialogMode::Editing { downlines, .. } => Some(*downlines),
            _ => None,
        }
    }

    pub fn highlighted_id(&self) -> Option<&str> {
        self.highlighted_id.as_deref()
    }

    pub fn search_results(&self) -> &[SearchResult] {
        &self.search_results
    }

    /// "Add Root Member" is only offered while the tree is empty.
    pub fn can_add_root(&self) -> bool {
        self.forest.is_empty()
    }

    pub fn open_add_root(&mut self) -> bool {
        if !self.can_add_root() {
            return false;
        }
        self.mode = DialogMode::AddingRoot;
        self.confirming_delete = false;
        self.form.clear();
        true
    }

    /// Opens the edit dialog for `id`, prefilled from the last fetched tree.
    pub fn open_edit(&mut self, id: &MemberId) -> bool {
        let Some(node) = find_node(&self.forest, id) else {
            return false;
        };
        let node = node.clone();
        self.form = FormState::from_node(&node);
        self.mode = DialogMode::Editing { downlines: count_downlines(&node), node };
        self.confirming_delete = false;
        true
    }

    /// Switches the edit dialog to adding a downline under the edited node.
    pub fn start_add_downline(&mut self) -> bool {
        let DialogMode::Editing { node, .. } = &self.mode else {
            return false;
        };
        self.mode = DialogMode::AddingChild { upline: node.clone() };
        self.confirming_delete = false;
        self.form.clear();
        true
    }

    pub fn cancel_dialog(&mut self) {
        self.close_dialog();
    }

    /// Validates the form and builds the create/update call for the current mode.
    pub fn submit(&mut self) -> Option<Request> {
        let upline_id = match &self.mode {
            DialogMode::Closed => return None,
            DialogMode::AddingRoot => None,
            DialogMode::AddingChild { upline } => Some(upline.id.clone()),
            DialogMode::Editing { node, .. } => node.upline_id().cloned(),
        };

        let Some(payload) = self.form.to_payload(upline_id) else {
            self.notify(NoticeLevel::Error, "Name is required.");
            return None;
        };

        match &self.mode {
            DialogMode::Editing { node, .. } => {
                Some(Request::Update { id: node.id.clone(), payload })
            }
            _ => Some(Request::Create { payload }),
        }
    }

    /// Asks for confirmation before deleting the edited node.
    pub fn request_delete(&mut self) -> bool {
        if !self.mode.is_editing() {
            return false;
        }
        self.confirming_delete = true;
        true
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    pub fn delete_prompt(&self) -> Option<String> {
        let downlines = self.downline_count()?;
        let plural = if downlines == 1 { "" } else { "s" };
        Some(format!("This member has {downlines} downline{plural}. What do you want to do?"))
    }

    pub fn confirm_delete(&mut self, scope: DeleteScope) -> Option<Request> {
        if !self.confirming_delete {
            return None;
        }
        let DialogMode::Editing { node, .. } = &self.mode else {
            return None;
        };
        let id = node.id.clone();
        self.confirming_delete = false;
        Some(match scope {
            DeleteScope::MemberOnly => Request::Delete { id },
            DeleteScope::WithDownlines => Request::CascadeDelete { id },
        })
    }

    /// Blank queries are ignored.
    pub fn search(&mut self, query: &str) -> Option<Request> {
        if query.trim().is_empty() {
            return None;
        }
        Some(Request::Search { query: query.to_owned() })
    }

    pub fn search_summary(&self) -> Option<SearchSummary> {
        let first = self.search_results.first()?;
        let downlines = (!first.downlines.is_empty()).then(|| {
            first
                .downlines
                .iter()
                .map(|downline| downline.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        });
        Some(SearchSummary {
            name: first.name.clone(),
            upline: first.upline.as_ref().map(|upline| upline.name.clone()),
            downlines,
        })
    }

    /// The node the view should center on once the next layout has settled.
    pub fn pending_focus(&self) -> Option<&MemberId> {
        self.pending_focus.as_ref()
    }

    pub fn take_pending_focus(&mut self) -> Option<MemberId> {
        self.pending_focus.take()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Applies a finished request. Returns the follow-up request, if any.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Request> {
        match outcome {
            Outcome::TreeLoaded(Ok(forest)) => {
                self.forest = forest;
                self.loaded = true;
                self.tree_rev = self.tree_rev.wrapping_add(1);
                None
            }
            Outcome::TreeLoaded(Err(err)) => {
                self.loaded = true;
                self.notify(NoticeLevel::Error, format!("Failed to load tree: {err}"));
                None
            }
            Outcome::SearchFinished(Ok(results)) => {
                if results.is_empty() {
                    self.search_results.clear();
                    self.highlighted_id = None;
                    self.pending_focus = None;
                    self.notify(NoticeLevel::Error, "No members found.");
                    return None;
                }
                let first = results[0].id.clone();
                self.highlighted_id = Some(first.to_string());
                self.pending_focus = Some(first);
                self.search_results = results;
                None
            }
            Outcome::SearchFinished(Err(_)) => {
                self.notify(NoticeLevel::Error, "Failed to perform search.");
                None
            }
            Outcome::MutationFinished { mutation, result: Ok(()) } => {
                self.notify(NoticeLevel::Success, mutation.success_message());
                self.close_dialog();
                Some(Request::FetchTree)
            }
            Outcome::MutationFinished { mutation, result: Err(err) } => {
                self.notify(NoticeLevel::Error, mutation.failure_message(&err));
                None
            }
        }
    }

    fn close_dialog(&mut self) {
        self.mode = DialogMode::Closed;
        self.confirming_delete = false;
        self.form.clear();
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice { level, message: message.into() });
    }
}

#[cfg(test)]
mod tests;
