use thiserror::Error;

/// Errors raised by `ApiClient` calls.
///
/// Variants that come from a call carry the caller-supplied message, which
/// is also what they display as, so call sites can show them directly.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response not covered by the call's `FetchMode`
    #[error("{message}")]
    Request {
        status: reqwest::StatusCode,
        message: String,
        body: String,
    },

    /// Strict-mode 401. The stored credential has already been evicted.
    #[error("{message}")]
    AuthExpired { message: String },

    /// The request never produced a response
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
}

/// Maximum length for error response bodies kept in errors
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// HTTP status behind this error, if the server answered
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            ApiError::AuthExpired { .. } => Some(reqwest::StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired { .. })
    }
}
