use keepsake_rules::ContentError;
use thiserror::Error;

/// Errors raised while setting the server up.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("PORT must be a number between 1 and 65535, got '{0}'")]
    InvalidPort(String),

    #[error("site content is invalid: {0}")]
    Content(#[from] ContentError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
