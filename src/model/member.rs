// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::MemberId;

/// A member record as the API stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub upline_id: Option<MemberId>,
    #[serde(default)]
    pub children: Vec<Member>,
}

/// Request body for create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub upline_id: Option<MemberId>,
}

/// Contact attributes carried by a tree node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAttributes {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub upline_id: Option<MemberId>,
}

/// One node of the render model returned by `GET /members/tree`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: MemberId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: NodeAttributes,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attributes: NodeAttributes::default(),
            children: Vec::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.attributes.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.attributes.phone = Some(phone.into());
        self
    }

    pub fn with_upline(mut self, upline_id: MemberId) -> Self {
        self.attributes.upline_id = Some(upline_id);
        self
    }

    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn email(&self) -> &str {
        self.attributes.email.as_deref().unwrap_or("")
    }

    pub fn phone(&self) -> &str {
        self.attributes.phone.as_deref().unwrap_or("")
    }

    pub fn upline_id(&self) -> Option<&MemberId> {
        self.attributes.upline_id.as_ref()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Uppercased first letter of the name, `?` when the name is empty.
    pub fn initial(&self) -> char {
        self.name.chars().next().and_then(|ch| ch.to_uppercase().next()).unwrap_or('?')
    }
}

/// Number of descendants below `node` (the node itself is not counted).
pub fn count_downlines(node: &TreeNode) -> usize {
    node.children.iter().map(|child| 1 + count_downlines(child)).sum()
}

/// Depth-first lookup of a node by id across a forest.
pub fn find_node<'a>(forest: &'a [TreeNode], id: &MemberId) -> Option<&'a TreeNode> {
    for root in forest {
        if &root.id == id {
            return Some(root);
        }
        if let Some(found) = find_node(&root.children, id) {
            return Some(found);
        }
    }
    None
}

/// Total number of nodes in a forest.
pub fn forest_len(forest: &[TreeNode]) -> usize {
    forest.iter().map(|root| 1 + count_downlines(root)).sum()
}

/// `{id, name}` reference used by search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    pub id: MemberId,
    pub name: String,
}

/// One hit of `GET /members?q=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub upline: Option<MemberRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub downlines: Vec<MemberRef>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
