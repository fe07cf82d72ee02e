//! Client error model.

use thiserror::Error;

/// Result type used across the client layer.
pub type ClientResult<T> = Result<T, ClientError>;

/// Structured code some backends attach to "feature is off" responses.
pub const FEATURE_DISABLED_CODE: &str = "feature_disabled";

/// Error produced while talking to the auth backend.
///
/// `Clone` because mutation sets keep the last error in shared state while
/// also handing it back to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Non-2xx response. `message` is the body's `message` field or the
    /// status text.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The request could not be built (bad URL, invalid identifier...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// HTTP status, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error means "the backend has this feature switched off".
    ///
    /// Prefers the structured `code`; falls back to matching the message
    /// wording (`"disabled"` / `"Invite"`) for backends that send none.
    pub fn is_feature_disabled(&self) -> bool {
        match self {
            Self::Http { code: Some(code), .. } if code == FEATURE_DISABLED_CODE => true,
            Self::Http { message, .. } => {
                message.contains("disabled") || message.contains("Invite")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_server_message() {
        let err = ClientError::http(404, "User not found");
        assert_eq!(err.to_string(), "User not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn feature_disabled_by_wording() {
        assert!(ClientError::http(403, "Invites are disabled").is_feature_disabled());
        assert!(ClientError::http(404, "Invite system not configured").is_feature_disabled());
        assert!(!ClientError::http(500, "internal error").is_feature_disabled());
    }

    #[test]
    fn feature_disabled_by_code() {
        let err = ClientError::Http {
            status: 404,
            message: "Not Found".to_string(),
            code: Some(FEATURE_DISABLED_CODE.to_string()),
        };
        assert!(err.is_feature_disabled());
    }

    #[test]
    fn network_errors_are_never_feature_disabled() {
        assert!(!ClientError::network("connection refused (disabled host)").is_feature_disabled());
    }
}
