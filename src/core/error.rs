// src/core/error.rs
//! Error surface of the Net API client

use reqwest::StatusCode;
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx answer. The message comes from the server's error envelope
    /// when it has one, otherwise it is `HTTP <status>`.
    #[error("{message}")]
    RequestFailed { status: StatusCode, message: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request body: {0}")]
    Body(#[source] serde_json::Error),

    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            ApiError::Transport { source, .. } => source.status(),
            _ => None,
        }
    }

    /// The remote service rejected (or never saw) a credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_displays_bare_message() {
        let err = ApiError::RequestFailed {
            status: StatusCode::UNAUTHORIZED,
            message: "Missing token".to_string(),
        };
        assert_eq!(err.to_string(), "Missing token");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_status_only_for_http_failures() {
        let err = ApiError::InvalidHeader {
            name: "x bad".to_string(),
            reason: "invalid header name".to_string(),
        };
        assert_eq!(err.status(), None);
        assert!(!err.is_unauthorized());
    }
}
