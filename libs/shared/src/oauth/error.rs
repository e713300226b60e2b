//! OAuth error types

use thiserror::Error;

/// Errors that can occur during the GitHub sign-in flow
///
/// `Canceled` and `Timeout` display as the bare words `"Canceled"` and
/// `"Timeout"`; executors that only report strings map back to these
/// variants through [`OAuthError::from_message`].
#[derive(Error, Debug)]
pub enum OAuthError {
    /// The user backed out of the authorization flow
    #[error("Canceled")]
    Canceled,

    /// The authorization flow did not complete in time
    #[error("Timeout")]
    Timeout,

    /// The flow succeeded but did not deliver both tokens
    #[error("No token received.")]
    MissingCredentials,

    /// Any other failure reported by the executor
    #[error("{0}")]
    Failed(String),

    /// The loopback callback listener could not be started
    #[error("Could not start local callback server: {0}")]
    CallbackServer(String),

    /// File or socket I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl OAuthError {
    /// Build an error from an executor's textual failure
    pub fn from_message(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        match msg.as_str() {
            "Canceled" => Self::Canceled,
            "Timeout" => Self::Timeout,
            _ => Self::Failed(msg),
        }
    }

    /// Create a callback server error
    pub fn callback_server(msg: impl Into<String>) -> Self {
        Self::CallbackServer(msg.into())
    }

    /// Whether the failure means "the user backed out" rather than an error
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Canceled | Self::Timeout)
    }
}

/// Result type alias for OAuth operations
pub type OAuthResult<T> = Result<T, OAuthError>;
