//! Command directory port for bulk definition uploads.

use crate::interaction::domain::{CommandDefinition, DestinationId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for command directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// External service that stores the command definitions users can invoke.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandDirectory: Send + Sync {
    /// Replaces every definition in one scope with `definitions`.
    ///
    /// `destination` is `None` for the global scope.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the upload is rejected or the
    /// directory cannot be reached.
    async fn bulk_overwrite(
        &self,
        definitions: &[CommandDefinition],
        destination: Option<DestinationId>,
    ) -> DirectoryResult<()>;
}

/// Errors returned by command directory adapters.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// The directory rejected the definitions.
    #[error("command directory rejected the upload: {0}")]
    Rejected(String),

    /// Transport-level failure.
    #[error("command directory unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a transport error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
