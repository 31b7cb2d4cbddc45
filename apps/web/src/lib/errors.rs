use session_core::ApiError;
use std::fmt;

#[derive(Clone, Debug)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    /// Non-2xx response. `message` is the server's `message` field when it sent one.
    Http {
        status: u16,
        message: Option<String>,
    },
    Parse(String),
    Serialization(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http {
                message: Some(message),
                ..
            } => formatter.write_str(message),
            AppError::Http {
                status,
                message: None,
            } => write!(formatter, "Request failed with status code {status}"),
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => write!(formatter, "Request error: {message}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Http { status, message } => ApiError::Rejected { status, message },
            AppError::Parse(message) => ApiError::Decode(message),
            AppError::Timeout(message) | AppError::Network(message) => {
                ApiError::Transport(message)
            }
            other @ (AppError::Config(_) | AppError::Serialization(_)) => {
                ApiError::Transport(other.to_string())
            }
        }
    }
}
