//! Responder that records responses instead of sending them.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::interaction::{
    domain::{Interaction, InteractionResponse, Snowflake},
    ports::{InteractionResponder, ResponderError, ResponderResult},
};

/// Thread-safe responder keeping every response in delivery order.
#[derive(Debug, Clone, Default)]
pub struct RecordingResponder {
    responses: Arc<Mutex<Vec<(Snowflake, InteractionResponse)>>>,
}

impl RecordingResponder {
    /// Creates an empty responder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded `(interaction id, response)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`ResponderError::Transport`] when the record is poisoned.
    pub fn responses(&self) -> ResponderResult<Vec<(Snowflake, InteractionResponse)>> {
        let responses = self
            .responses
            .lock()
            .map_err(|err| ResponderError::transport(std::io::Error::other(err.to_string())))?;
        Ok(responses.clone())
    }

    /// Returns the response recorded for `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ResponderError::Transport`] when the record is poisoned.
    pub fn response_for(&self, id: Snowflake) -> ResponderResult<Option<InteractionResponse>> {
        Ok(self
            .responses()?
            .into_iter()
            .find_map(|(recorded, response)| (recorded == id).then_some(response)))
    }
}

#[async_trait]
impl InteractionResponder for RecordingResponder {
    async fn create_response(
        &self,
        interaction: &Interaction,
        response: &InteractionResponse,
    ) -> ResponderResult<()> {
        let mut responses = self
            .responses
            .lock()
            .map_err(|err| ResponderError::transport(std::io::Error::other(err.to_string())))?;
        responses.push((interaction.id, response.clone()));
        Ok(())
    }
}
