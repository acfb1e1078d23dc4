// src/error.rs

use thiserror::Error;

/// Generic message used when the backend rejects a request without a usable `detail`.
pub const OPERATION_FAILED: &str = "operation failed";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid client configuration. No request was sent.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP 401 on an authenticated call. The session has already been cleared.
    #[error("session expired, please log in again")]
    Unauthorized,

    /// Non-2xx response other than 401.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("cannot reach backend at {host}: {source}")]
    Network {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("{0} is not supported")]
    Unsupported(&'static str),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Text shown inline on a page.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network { host, .. } => {
                format!("cannot connect to the backend at {host}, please check it is running")
            }
            other => other.to_string(),
        }
    }
}
