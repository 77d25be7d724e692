// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Failure of a single API call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is the `message` field of the JSON error body, if any.
    #[error("server responded with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid API url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// The server-provided message of a non-2xx response.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => {
                message.as_deref().map(str::trim).filter(|message| !message.is_empty())
            }
            _ => None,
        }
    }

    /// `true` when the server answered; `false` for transport-level failures.
    pub fn is_server_reported(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn server_message_ignores_blank_messages() {
        let err = ApiError::Status { status: 400, message: Some("  ".to_owned()) };
        assert_eq!(err.server_message(), None);
        let err = ApiError::Status { status: 409, message: Some("Name taken".to_owned()) };
        assert_eq!(err.server_message(), Some("Name taken"));
        assert!(err.is_server_reported());
    }

    #[test]
    fn transport_errors_have_no_server_message() {
        let err = ApiError::Transport("connection refused".to_owned());
        assert_eq!(err.server_message(), None);
        assert!(!err.is_server_reported());
    }
}
