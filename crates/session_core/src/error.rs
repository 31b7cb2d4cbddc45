use serde::Deserialize;
use thiserror::Error;

/// Failure to read claims out of a session token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token format")]
    Format,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
}

/// Failure reported by a key-value backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to encode value for {key}: {reason}")]
    Encode { key: String, reason: String },
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to remove {key}: {reason}")]
    Remove { key: String, reason: String },
}

/// Failure returned by an [`AuthApi`](crate::AuthApi) implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (network down, timeout, abort).
    #[error("{0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("Request failed with status code {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    /// The response arrived but could not be decoded.
    #[error("{0}")]
    Decode(String),
}

impl ApiError {
    /// Best human-readable text for this error: the server-provided message
    /// when there is one, otherwise the error's own text.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        if let Self::Rejected {
            message: Some(message),
            ..
        } = self
        {
            let trimmed = message.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }

        let text = self.to_string();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Login or registration did not produce a session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthFailure {
    pub message: String,
}

impl AuthFailure {
    pub(crate) fn from_api(err: &ApiError, fallback: &str) -> Self {
        Self {
            message: err
                .user_message()
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct ServerErrorBody {
    message: Option<String>,
}

/// Extracts the `message` field from a JSON error body, if any.
#[must_use]
pub fn message_from_body(body: &str) -> Option<String> {
    let parsed: ServerErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_status_text() {
        let err = ApiError::Rejected {
            status: 401,
            message: Some("Invalid email or password".to_string()),
        };
        assert_eq!(
            err.user_message().as_deref(),
            Some("Invalid email or password")
        );
    }

    #[test]
    fn rejected_without_message_uses_status_text() {
        let err = ApiError::Rejected {
            status: 500,
            message: Some("   ".to_string()),
        };
        assert_eq!(
            err.user_message().as_deref(),
            Some("Request failed with status code 500")
        );
    }

    #[test]
    fn empty_transport_text_falls_back() {
        let failure = AuthFailure::from_api(&ApiError::Transport(String::new()), "Login failed");
        assert_eq!(failure.message, "Login failed");
    }

    #[test]
    fn message_from_body_reads_json_message() {
        assert_eq!(
            message_from_body(r#"{"message":" Account locked ","status":423}"#).as_deref(),
            Some("Account locked")
        );
        assert_eq!(message_from_body(r#"{"error":"nope"}"#), None);
        assert_eq!(message_from_body("<html>bad gateway</html>"), None);
        assert_eq!(message_from_body(r#"{"message":""}"#), None);
    }
}
