// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Member tree data model.
//!
//! The forest returned by the API is the render model; the client never edits it in place.

pub mod form;
pub mod ids;
pub mod member;

pub use form::{FormField, FormState};
pub use ids::{IdError, MemberId};
pub use member::{
    count_downlines, find_node, forest_len, Member, MemberPayload, MemberRef, NodeAttributes,
    SearchResult, TreeNode,
};
