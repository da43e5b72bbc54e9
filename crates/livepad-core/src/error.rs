use crate::compiler::CompileFailure;
use crate::store::CacheKey;
use thiserror::Error;

/// Error returned by the save and serve operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The saved source did not compile. The store was not touched.
    #[error("{0}")]
    Compile(CompileFailure),

    /// Nothing stored and no default for this name.
    #[error("not found: {key}")]
    NotFound { key: CacheKey },

    /// Anything that is not a user error. Never reported as a 4xx.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl Error {
    #[must_use]
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Whether the caller caused this error.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Compile(_) | Self::NotFound { .. })
    }
}
