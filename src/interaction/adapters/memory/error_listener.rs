//! Error listener that collects what it observes.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

use crate::interaction::{
    domain::{DispatchError, InteractionContext},
    ports::InteractionErrorListener,
};

/// Collects every unrecovered dispatch error with the handler label it was
/// raised for.
#[derive(Debug, Clone, Default)]
pub struct CollectingErrorListener {
    errors: Arc<Mutex<Vec<(String, DispatchError)>>>,
}

impl CollectingErrorListener {
    /// Creates an empty listener.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected `(label, error)` pairs in arrival order.
    #[must_use]
    pub fn errors(&self) -> Vec<(String, DispatchError)> {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl InteractionErrorListener for CollectingErrorListener {
    async fn on_interaction_error(&self, context: &InteractionContext, error: &DispatchError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((context.label().to_owned(), error.clone()));
    }
}
