//! Per-dispatch interaction context handed to handlers and checks.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use super::{Interaction, InteractionResponse, OptionChoice};
use crate::interaction::ports::{InteractionResponder, ResponderError, ResponderResult};

/// Cheap-to-clone handle around one received interaction.
///
/// The context decides where the initial response goes: through an inline
/// channel back to the event-receive call (webhook mode) or through the
/// configured [`InteractionResponder`] (endpoint mode).
#[derive(Clone)]
pub struct InteractionContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    interaction: Interaction,
    delivery: ResponseDelivery,
}

enum ResponseDelivery {
    Inline(Mutex<Option<oneshot::Sender<InteractionResponse>>>),
    Endpoint {
        responder: Arc<dyn InteractionResponder>,
        responded: AtomicBool,
    },
    Detached,
}

impl InteractionContext {
    /// Creates a context that answers through the returned receiver.
    #[must_use]
    pub fn inline(interaction: Interaction) -> (Self, oneshot::Receiver<InteractionResponse>) {
        let (sender, receiver) = oneshot::channel();
        let context = Self::from_parts(
            interaction,
            ResponseDelivery::Inline(Mutex::new(Some(sender))),
        );
        (context, receiver)
    }

    /// Creates a context that answers through `responder`.
    #[must_use]
    pub fn endpoint(interaction: Interaction, responder: Arc<dyn InteractionResponder>) -> Self {
        Self::from_parts(
            interaction,
            ResponseDelivery::Endpoint {
                responder,
                responded: AtomicBool::new(false),
            },
        )
    }

    /// Creates a context that cannot respond.
    #[must_use]
    pub fn detached(interaction: Interaction) -> Self {
        Self::from_parts(interaction, ResponseDelivery::Detached)
    }

    fn from_parts(interaction: Interaction, delivery: ResponseDelivery) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                interaction,
                delivery,
            }),
        }
    }

    /// Returns a context sharing this interaction that never holds the
    /// inline response channel.
    ///
    /// Endpoint and detached contexts are shared as they are; an inline
    /// context is replaced by a detached one so observers cannot keep the
    /// event-receive call waiting.
    #[must_use]
    pub fn observer(&self) -> Self {
        match self.inner.delivery {
            ResponseDelivery::Inline(_) => Self::detached(self.inner.interaction.clone()),
            ResponseDelivery::Endpoint { .. } | ResponseDelivery::Detached => self.clone(),
        }
    }

    /// Returns the received interaction.
    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.inner.interaction
    }

    /// Returns the invoked command name, or the custom-id for component and
    /// modal interactions.
    #[must_use]
    pub fn label(&self) -> &str {
        let data = &self.inner.interaction.data;
        data.custom_id.as_deref().unwrap_or(&data.name)
    }

    /// Sends the initial response.
    ///
    /// # Errors
    ///
    /// Returns [`ResponderError::AlreadyResponded`] once a response has been
    /// delivered, [`ResponderError::Closed`] when the inline receiver is gone,
    /// [`ResponderError::Unavailable`] for a detached context, or the
    /// responder's transport error. A failed delivery may be retried.
    pub async fn create_response(&self, response: InteractionResponse) -> ResponderResult<()> {
        let interaction = &self.inner.interaction;
        match &self.inner.delivery {
            ResponseDelivery::Inline(slot) => {
                let sender = slot
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner)
                    .take()
                    .ok_or_else(|| ResponderError::AlreadyResponded(interaction.id.to_string()))?;
                sender
                    .send(response)
                    .map_err(|_| ResponderError::Closed(interaction.id.to_string()))
            }
            ResponseDelivery::Endpoint {
                responder,
                responded,
            } => {
                if responded.swap(true, Ordering::AcqRel) {
                    return Err(ResponderError::AlreadyResponded(interaction.id.to_string()));
                }
                let delivered = responder.create_response(interaction, &response).await;
                if delivered.is_err() {
                    responded.store(false, Ordering::Release);
                }
                delivered
            }
            ResponseDelivery::Detached => {
                Err(ResponderError::Unavailable(interaction.id.to_string()))
            }
        }
    }

    /// Responds with a plain text message.
    ///
    /// # Errors
    ///
    /// See [`InteractionContext::create_response`].
    pub async fn respond(&self, content: impl Into<String> + Send) -> ResponderResult<()> {
        self.create_response(InteractionResponse::message(content))
            .await
    }

    /// Answers an autocomplete request with suggestions.
    ///
    /// # Errors
    ///
    /// See [`InteractionContext::create_response`].
    pub async fn suggest(&self, choices: &[OptionChoice]) -> ResponderResult<()> {
        self.create_response(InteractionResponse::autocomplete(choices))
            .await
    }
}

impl fmt::Debug for InteractionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delivery = match self.inner.delivery {
            ResponseDelivery::Inline(_) => "inline",
            ResponseDelivery::Endpoint { .. } => "endpoint",
            ResponseDelivery::Detached => "detached",
        };
        f.debug_struct("InteractionContext")
            .field("interaction", &self.inner.interaction.id)
            .field("kind", &self.inner.interaction.kind)
            .field("delivery", &delivery)
            .finish()
    }
}
