//! Responder port for sending initial responses through the endpoint.

use crate::interaction::domain::{Interaction, InteractionResponse};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for responder operations.
pub type ResponderResult<T> = Result<T, ResponderError>;

/// Delivers initial responses to the event source out of band.
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Sends the initial response for `interaction`.
    ///
    /// # Errors
    ///
    /// Returns [`ResponderError::Transport`] when delivery fails.
    async fn create_response(
        &self,
        interaction: &Interaction,
        response: &InteractionResponse,
    ) -> ResponderResult<()>;
}

/// Errors returned when responding to an interaction.
#[derive(Debug, Clone, Error)]
pub enum ResponderError {
    /// The interaction already received its initial response.
    #[error("interaction {0} already has an initial response")]
    AlreadyResponded(String),

    /// The inline response receiver is gone (timed out or dropped).
    #[error("inline response channel for interaction {0} is closed")]
    Closed(String),

    /// No responder is configured for endpoint responses.
    #[error("no responder configured for interaction {0}")]
    Unavailable(String),

    /// Transport-level failure.
    #[error("failed to deliver interaction response: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl ResponderError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
