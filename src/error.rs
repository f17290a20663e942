use thiserror::Error;

/// Unified error taxonomy for the image service.
///
/// Every failure a handler or middleware can produce is one of these variants,
/// and all of them funnel through a single `IntoResponse` implementation in
/// [`crate::server::handlers`] that maps kind to status code and a structured
/// JSON body. No error leaves the service untranslated.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Malformed input: empty folder name, disallowed file extension,
    /// or a path component that would escape the static root.
    #[error("{0}")]
    Validation(String),

    /// Request rejected by the user-agent deny-list.
    #[error("{0}")]
    BotBlocked(String),

    /// The requested folder or file does not exist under the static root.
    #[error("{0}")]
    NotFound(String),

    /// The client disconnected before the response completed. Not a server
    /// error; mapped to 499 and logged at debug level.
    #[error("client closed the connection")]
    ConnectionReset,

    /// Catch-all for unexpected failures (I/O, deny-list parse errors, ...).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Stable error kind identifier used in the JSON error body.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::BotBlocked(_) => "bot_blocked",
            ApiError::NotFound(_) => "not_found",
            ApiError::ConnectionReset => "connection_reset",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ApiError::NotFound("resource not found".to_string()),
            std::io::ErrorKind::ConnectionReset => ApiError::ConnectionReset,
            _ => ApiError::Internal(format!("I/O error: {}", err)),
        }
    }
}
