// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The identifier of a member as handed out by the API.
///
/// The API may encode ids as JSON numbers or strings. The original encoding is kept so an id can
/// be sent back verbatim (e.g. as an `uplineId`), while equality, ordering and hashing use the
/// stringified form. Ids appear as URL path segments (`/members/{id}`), so they must be non-empty
/// and must not contain `/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "IdRepr", into = "IdRepr")]
pub struct MemberId {
    repr: IdRepr,
    key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(serde_json::Number),
    Text(String),
}

impl MemberId {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        Self::try_from(IdRepr::Text(value.into()))
    }

    pub fn from_number(value: u64) -> Self {
        Self {
            key: value.to_string(),
            repr: IdRepr::Number(value.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.repr, IdRepr::Number(_))
    }
}

impl TryFrom<IdRepr> for MemberId {
    type Error = IdError;

    fn try_from(repr: IdRepr) -> Result<Self, Self::Error> {
        let key = match &repr {
            IdRepr::Number(number) => number.to_string(),
            IdRepr::Text(text) => text.clone(),
        };
        validate_id_segment(&key)?;
        Ok(Self { repr, key })
    }
}

impl From<MemberId> for IdRepr {
    fn from(id: MemberId) -> Self {
        id.repr
    }
}

impl From<u64> for MemberId {
    fn from(value: u64) -> Self {
        Self::from_number(value)
    }
}

impl PartialEq for MemberId {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for MemberId {}

impl PartialOrd for MemberId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MemberId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Hash for MemberId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl AsRef<str> for MemberId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for MemberId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("member id must not be empty")]
    Empty,
    #[error("member id must not contain '/'")]
    ContainsSlash,
}

fn validate_id_segment(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains('/') {
        return Err(IdError::ContainsSlash);
    }
    Ok(())
}
