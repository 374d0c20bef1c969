//! Global listener for dispatch errors no hook recovered from.

use crate::interaction::domain::{DispatchError, InteractionContext};
use async_trait::async_trait;

/// Receives the global interaction error event.
///
/// A registered listener counts as handling every error delivered to it.
#[async_trait]
pub trait InteractionErrorListener: Send + Sync {
    /// Observes an unrecovered dispatch error.
    async fn on_interaction_error(&self, context: &InteractionContext, error: &DispatchError);
}
