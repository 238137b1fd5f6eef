use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("no screen-reading session is connected")]
    Unavailable,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("internal platform error: {message}")]
    Internal {
        message: String,
        /// Diagnostic detail from the underlying platform call, kept for logging.
        detail: Option<String>,
    },
}

impl AutomationError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            detail: None,
        }
    }

    pub fn internal_with_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            detail: Some(detail.into()),
        }
    }
}
