//! In-memory command directory.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::interaction::{
    domain::{CommandDefinition, DestinationId},
    ports::{CommandDirectory, DirectoryError, DirectoryResult},
};

/// One recorded bulk upload.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryUpload {
    /// Target destination, `None` for the global scope.
    pub destination: Option<DestinationId>,
    /// Uploaded definitions.
    pub definitions: Vec<CommandDefinition>,
}

/// Thread-safe directory that keeps the latest definitions per scope and a
/// log of every upload.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommandDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    scopes: BTreeMap<Option<DestinationId>, Vec<CommandDefinition>>,
    uploads: Vec<DirectoryUpload>,
    rejection: Option<String>,
}

impl InMemoryCommandDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory that rejects every upload with `reason`.
    #[must_use]
    pub fn rejecting(reason: impl Into<String>) -> Self {
        let directory = Self::default();
        directory
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .rejection = Some(reason.into());
        directory
    }

    /// Returns every accepted upload in call order.
    #[must_use]
    pub fn uploads(&self) -> Vec<DirectoryUpload> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .uploads
            .clone()
    }

    /// Returns the definitions currently stored for a scope.
    #[must_use]
    pub fn definitions(&self, destination: Option<DestinationId>) -> Vec<CommandDefinition> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .scopes
            .get(&destination)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl CommandDirectory for InMemoryCommandDirectory {
    async fn bulk_overwrite(
        &self,
        definitions: &[CommandDefinition],
        destination: Option<DestinationId>,
    ) -> DirectoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DirectoryError::unavailable(std::io::Error::other(err.to_string())))?;

        if let Some(reason) = &state.rejection {
            return Err(DirectoryError::Rejected(reason.clone()));
        }

        state.scopes.insert(destination, definitions.to_vec());
        state.uploads.push(DirectoryUpload {
            destination,
            definitions: definitions.to_vec(),
        });
        Ok(())
    }
}
