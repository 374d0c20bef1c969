//! Event-receive entry point tying the registry, router, and invoker
//! together.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::interaction::{
    config::ClientConfig,
    domain::{
        AutocompleteCallback, AutocompleteKey, BoxFuture, ComponentCallback, Interaction,
        InteractionContext, InteractionKind, InteractionResponse, RegisteredCommand,
        RegistryError, Snowflake,
    },
    ports::{
        CommandDirectory, DirectoryResult, EntityCache, InteractionErrorListener,
        InteractionResponder,
    },
};

use super::{CommandRegistry, ExportedCommands, Invoker, router};

type ContextPredicate = dyn Fn(&InteractionContext) -> bool + Send + Sync;

/// Errors returned while waiting for an interaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WaitError {
    /// No matching interaction arrived in time.
    #[error("no matching interaction within {0:?}")]
    Timeout(Duration),

    /// The client was dropped while waiting.
    #[error("interaction client closed")]
    Closed,
}

/// Receives interactions and dispatches them to registered handlers.
///
/// Registration takes `&mut self` and is meant for startup; dispatch only
/// needs `&self`.
///
/// # Examples
///
/// ```
/// use switchboard::interaction::config::ClientConfig;
/// use switchboard::interaction::domain::{CommandBuilder, HandlerError};
/// use switchboard::interaction::services::InteractionClient;
///
/// let mut client = InteractionClient::new(ClientConfig::webhook());
/// let ping = CommandBuilder::slash("ping", "Check latency")
///     .build(|context, _arguments| async move {
///         context.respond("pong").await?;
///         Ok::<_, HandlerError>(())
///     })
///     .expect("valid command");
/// client.add_command(ping).expect("first registration");
/// assert!(client.registry().command("ping").is_some());
/// ```
pub struct InteractionClient {
    registry: CommandRegistry,
    invoker: Invoker,
    responder: Option<Arc<dyn InteractionResponder>>,
    config: ClientConfig,
    interactions: broadcast::Sender<InteractionContext>,
}

impl InteractionClient {
    /// Creates a client with an empty registry.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let registry = config
            .destination_override
            .map_or_else(CommandRegistry::new, CommandRegistry::with_destination_override);
        let (interactions, _) = broadcast::channel(config.wait_channel_capacity.max(1));
        Self {
            registry,
            invoker: Invoker::new(),
            responder: None,
            config,
            interactions,
        }
    }

    /// Sends endpoint-mode responses through `responder`.
    #[must_use]
    pub fn with_responder(mut self, responder: Arc<dyn InteractionResponder>) -> Self {
        self.responder = Some(responder);
        self
    }

    /// Resolves entity options through `cache` when events lack resolved
    /// data.
    #[must_use]
    pub fn with_entity_cache(mut self, cache: Arc<dyn EntityCache>) -> Self {
        self.invoker = self.invoker.with_entity_cache(cache);
        self
    }

    /// Delivers unrecovered dispatch errors to `listener`.
    #[must_use]
    pub fn with_error_listener(mut self, listener: Arc<dyn InteractionErrorListener>) -> Self {
        self.invoker = self.invoker.with_error_listener(listener);
        self
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the registry.
    #[must_use]
    pub const fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Registers a command.
    ///
    /// # Errors
    ///
    /// See [`CommandRegistry::add_command`].
    pub fn add_command(&mut self, command: RegisteredCommand) -> Result<(), RegistryError> {
        self.registry.add_command(command)
    }

    /// Unregisters a command.
    ///
    /// # Errors
    ///
    /// See [`CommandRegistry::remove_command`].
    pub fn remove_command(
        &mut self,
        command: &RegisteredCommand,
    ) -> Result<RegisteredCommand, RegistryError> {
        self.registry.remove_command(command)
    }

    /// Registers a component callback.
    ///
    /// # Errors
    ///
    /// See [`CommandRegistry::add_callback`].
    pub fn add_callback(&mut self, callback: ComponentCallback) -> Result<(), RegistryError> {
        self.registry.add_callback(callback)
    }

    /// Unregisters a component callback.
    ///
    /// # Errors
    ///
    /// See [`CommandRegistry::remove_callback`].
    pub fn remove_callback(&mut self, custom_id: &str) -> Result<ComponentCallback, RegistryError> {
        self.registry.remove_callback(custom_id)
    }

    /// Registers an autocomplete callback.
    ///
    /// # Errors
    ///
    /// See [`CommandRegistry::add_autocomplete`].
    pub fn add_autocomplete(&mut self, callback: AutocompleteCallback) -> Result<(), RegistryError> {
        self.registry.add_autocomplete(callback)
    }

    /// Unregisters an autocomplete callback.
    ///
    /// # Errors
    ///
    /// See [`CommandRegistry::remove_autocomplete`].
    pub fn remove_autocomplete(
        &mut self,
        key: &AutocompleteKey,
    ) -> Result<AutocompleteCallback, RegistryError> {
        self.registry.remove_autocomplete(key)
    }

    /// Rebuilds the upload-ready definition lists.
    #[must_use]
    pub fn export(&self) -> ExportedCommands {
        self.registry.export()
    }

    /// Handles one received interaction.
    ///
    /// In webhook mode the initial response is awaited and returned, bounded
    /// by the configured timeout; pings are answered with a pong directly.
    /// In endpoint mode handlers respond through the responder port and
    /// this returns `None` once the handler is scheduled. Unroutable events
    /// are dropped.
    pub async fn on_event(&self, interaction: Interaction) -> Option<InteractionResponse> {
        let webhook = !self.config.respond_via_endpoint;
        if interaction.kind == InteractionKind::Ping {
            return webhook.then(InteractionResponse::pong);
        }

        if !webhook {
            drop(self.dispatch(interaction));
            return None;
        }

        let (context, receiver) = InteractionContext::inline(interaction);
        let id = context.interaction().id;
        self.dispatch_context(context)?;
        self.await_inline_response(id, receiver).await
    }

    /// Routes an interaction and schedules its handler, answering through the
    /// responder port when one is configured.
    ///
    /// Returns the handle of the scheduled work, or `None` when nothing
    /// matched.
    #[must_use = "the handle is the only way to await the scheduled handler"]
    pub fn dispatch(&self, interaction: Interaction) -> Option<JoinHandle<()>> {
        let context = match &self.responder {
            Some(responder) => InteractionContext::endpoint(interaction, Arc::clone(responder)),
            None => InteractionContext::detached(interaction),
        };
        self.dispatch_context(context)
    }

    fn dispatch_context(&self, context: InteractionContext) -> Option<JoinHandle<()>> {
        if self.interactions.receiver_count() > 0
            && self.interactions.send(context.observer()).is_err()
        {
            tracing::debug!("interaction waiters left before delivery");
        }

        let interaction = context.interaction();
        let Some(target) = router::resolve(&self.registry, interaction) else {
            tracing::debug!(
                interaction = %interaction.id,
                kind = ?interaction.kind,
                label = context.label(),
                "dropping unroutable interaction"
            );
            return None;
        };
        tracing::debug!(
            interaction = %interaction.id,
            handler = %target.label(),
            "dispatching interaction"
        );
        Some(self.invoker.invoke(target, context.clone()))
    }

    async fn await_inline_response(
        &self,
        id: Snowflake,
        receiver: oneshot::Receiver<InteractionResponse>,
    ) -> Option<InteractionResponse> {
        let limit = self.config.initial_response_timeout;
        match tokio::time::timeout(limit, receiver).await {
            Ok(Ok(response)) => Some(response),
            Ok(Err(_)) => {
                tracing::debug!(interaction = %id, "handler finished without an initial response");
                None
            }
            Err(_) => {
                tracing::warn!(interaction = %id, timeout = ?limit, "initial response timed out");
                None
            }
        }
    }

    /// Uploads every exported definition list to `directory`.
    ///
    /// The global list is uploaded only when non-empty; each destination gets
    /// its own call. Returns what was uploaded.
    ///
    /// # Errors
    ///
    /// Returns the first [`DirectoryError`](crate::interaction::ports::DirectoryError);
    /// lists after the failing one are not uploaded.
    pub async fn register_commands(
        &self,
        directory: &dyn CommandDirectory,
    ) -> DirectoryResult<ExportedCommands> {
        let exported = self.export();
        if !exported.global.is_empty() {
            directory.bulk_overwrite(&exported.global, None).await?;
            tracing::info!(count = exported.global.len(), "uploaded global commands");
        }
        for (destination, definitions) in &exported.scoped {
            directory
                .bulk_overwrite(definitions, Some(*destination))
                .await?;
            tracing::info!(
                count = definitions.len(),
                destination = %destination,
                "uploaded destination commands"
            );
        }
        Ok(exported)
    }

    /// Waits for the next interaction accepted by `predicate`.
    ///
    /// The subscription starts when this is called, not when the future is
    /// first polled. Dropping the future cancels the wait. Webhook
    /// interactions reach waiters detached, so only the handler can answer
    /// them inline.
    pub fn wait_interaction<P>(
        &self,
        timeout: Option<Duration>,
        predicate: P,
    ) -> BoxFuture<Result<InteractionContext, WaitError>>
    where
        P: Fn(&InteractionContext) -> bool + Send + Sync + 'static,
    {
        let accepts: Box<ContextPredicate> = Box::new(predicate);
        let mut receiver = self.interactions.subscribe();
        Box::pin(async move {
            let wait = async {
                loop {
                    match receiver.recv().await {
                        Ok(context) if accepts(&context) => return Ok(context),
                        Ok(_) => {}
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::debug!(skipped, "interaction waiter lagged");
                        }
                        Err(RecvError::Closed) => return Err(WaitError::Closed),
                    }
                }
            };
            match timeout {
                Some(limit) => tokio::time::timeout(limit, wait)
                    .await
                    .unwrap_or(Err(WaitError::Timeout(limit))),
                None => wait.await,
            }
        })
    }
}

impl std::fmt::Debug for InteractionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionClient")
            .field("registry", &self.registry)
            .field("invoker", &self.invoker)
            .field("responder", &self.responder.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
