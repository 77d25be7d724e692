// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::MemberId;
use super::member::{MemberPayload, TreeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Email, FormField::Phone];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }
}

/// Transient dialog fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl FormState {
    pub fn from_node(node: &TreeNode) -> Self {
        Self {
            name: node.name.clone(),
            email: node.email().to_owned(),
            phone: node.phone().to_owned(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
        }
    }

    pub fn has_valid_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Builds the request body, or `None` when the name is blank.
    pub fn to_payload(&self, upline_id: Option<MemberId>) -> Option<MemberPayload> {
        if !self.has_valid_name() {
            return None;
        }
        Some(MemberPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            upline_id,
        })
    }
}
