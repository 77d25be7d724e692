// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Member-tree API client.
//!
//! `MemberApi` is the seam between the TUI and the remote CRUD service. The HTTP implementation
//! lives in [`http`]; tests swap in recording fakes.

use async_trait::async_trait;

use crate::model::{MemberId, MemberPayload, SearchResult, TreeNode};

mod error;
pub mod http;

pub use error::ApiError;
pub use http::HttpMemberApi;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";

#[async_trait]
pub trait MemberApi: Send + Sync {
    /// `GET /members/tree`
    async fn fetch_tree(&self) -> Result<Vec<TreeNode>, ApiError>;

    /// `GET /members?q=<query>`
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError>;

    /// `POST /members`
    async fn create_member(&self, payload: &MemberPayload) -> Result<(), ApiError>;

    /// `PUT /members/{id}`
    async fn update_member(&self, id: &MemberId, payload: &MemberPayload) -> Result<(), ApiError>;

    /// `DELETE /members/{id}`; what happens to the member's downlines is up to the server.
    async fn delete_member(&self, id: &MemberId) -> Result<(), ApiError>;

    /// `DELETE /members/cascade/{id}`; removes the member and its whole subtree.
    async fn delete_member_cascade(&self, id: &MemberId) -> Result<(), ApiError>;
}
