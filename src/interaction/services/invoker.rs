//! Argument preparation, guarding, and scheduling of handler bodies.
//!
//! [`Invoker::invoke`] never blocks on the handler and never returns its
//! failure. Every dispatch error runs through the recovery chain instead:
//! owner hook, handler hook, global listener, then a last-resort log.

use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::interaction::{
    domain::{
        Arguments, Check, Connector, DispatchError, ErrorHook, Handler, HandlerSignature,
        Interaction, InteractionContext, InteractionDataOption, Owner, Snowflake,
    },
    ports::{EntityCache, InteractionErrorListener},
};

use super::router::DispatchTarget;

/// Schedules resolved handlers and funnels their failures into the
/// recovery chain.
#[derive(Clone, Default)]
pub struct Invoker {
    entity_cache: Option<Arc<dyn EntityCache>>,
    error_listener: Option<Arc<dyn InteractionErrorListener>>,
}

/// Everything a scheduled handler needs, detached from the registry.
#[derive(Clone)]
struct Invocation {
    label: String,
    handler: Arc<dyn Handler>,
    arguments: Result<Arguments, DispatchError>,
    checks: Vec<Check>,
    owner: Option<Arc<dyn Owner>>,
    on_error: Option<ErrorHook>,
}

impl Invoker {
    /// Creates an invoker without an entity cache or error listener.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consults `cache` for entities missing from an event's resolved data.
    #[must_use]
    pub fn with_entity_cache(mut self, cache: Arc<dyn EntityCache>) -> Self {
        self.entity_cache = Some(cache);
        self
    }

    /// Delivers errors no hook recovered from to `listener`.
    #[must_use]
    pub fn with_error_listener(mut self, listener: Arc<dyn InteractionErrorListener>) -> Self {
        self.error_listener = Some(listener);
        self
    }

    /// Prepares arguments and schedules the handler for `target`.
    ///
    /// Returns as soon as the work is spawned. The handle resolves once the
    /// handler and any recovery hooks have finished; dropping it does not
    /// cancel anything.
    #[must_use = "the handle is the only way to await the scheduled handler"]
    pub fn invoke(&self, target: DispatchTarget<'_>, context: InteractionContext) -> JoinHandle<()> {
        let invocation = self.prepare(target, context.interaction());
        let invoker = self.clone();
        tokio::spawn(async move {
            let outcome = invocation.run(&context).await;
            if let Err(error) = outcome {
                invoker.recover(&invocation, &context, &error).await;
            }
        })
    }

    fn prepare(&self, target: DispatchTarget<'_>, interaction: &Interaction) -> Invocation {
        let label = target.label();
        match target {
            DispatchTarget::Command { command, options } => {
                let arguments =
                    self.collect_arguments(interaction, options, command.connector());
                Invocation {
                    arguments: validate(command.signature(), &label, arguments),
                    label,
                    handler: command.handler(),
                    checks: command.checks().to_vec(),
                    owner: command.owner().cloned(),
                    on_error: command.error_hook().cloned(),
                }
            }
            DispatchTarget::Component(callback) => Invocation {
                label,
                handler: callback.handler(),
                arguments: Ok(Arguments::new()),
                checks: callback.checks().to_vec(),
                owner: callback.owner().cloned(),
                on_error: callback.error_hook().cloned(),
            },
            DispatchTarget::Autocomplete { callback, options } => Invocation {
                arguments: Ok(self.collect_arguments(interaction, options, &Connector::new())),
                label,
                handler: callback.handler(),
                checks: Vec::new(),
                owner: callback.owner().cloned(),
                on_error: callback.error_hook().cloned(),
            },
        }
    }

    /// Flattens supplied options into handler arguments, resolving entity
    /// references and renaming through `connector`.
    fn collect_arguments(
        &self,
        interaction: &Interaction,
        options: &[InteractionDataOption],
        connector: &Connector,
    ) -> Arguments {
        options
            .iter()
            .map(|option| {
                let raw = option.value.clone().unwrap_or(Value::Null);
                let value = if option.kind.resolves_entity() {
                    self.resolve_entity(interaction, raw)
                } else {
                    raw
                };
                (connector.rename(&option.name).to_owned(), value)
            })
            .collect()
    }

    /// Replaces an entity identifier with the entity itself when the event's
    /// resolved data or the entity cache knows it.
    fn resolve_entity(&self, interaction: &Interaction, raw: Value) -> Value {
        let id = match &raw {
            Value::String(id) => id.clone(),
            Value::Number(id) => id.to_string(),
            _ => return raw,
        };

        if let Some(entity) = interaction
            .data
            .resolved
            .as_ref()
            .and_then(|resolved| resolved.get(&id))
        {
            return entity.clone();
        }

        if let Some(cache) = &self.entity_cache
            && let Ok(snowflake) = id.parse::<Snowflake>()
            && let Some(entity) = cache.get(snowflake)
        {
            return entity;
        }

        raw
    }

    /// Runs the recovery chain, stopping at the first hook that handles the
    /// error.
    async fn recover(
        &self,
        invocation: &Invocation,
        context: &InteractionContext,
        error: &DispatchError,
    ) {
        if let Some(owner) = &invocation.owner
            && owner.on_error(context, error).await
        {
            return;
        }
        if let Some(hook) = &invocation.on_error
            && hook(context, error)
        {
            return;
        }
        if let Some(listener) = &self.error_listener {
            listener.on_interaction_error(context, error).await;
            return;
        }
        tracing::error!(
            handler = %invocation.label,
            %error,
            "exception while executing interaction handler"
        );
    }
}

impl Invocation {
    /// Runs the guards and the handler body in their own task so a panic in
    /// either surfaces as an error.
    async fn run(&self, context: &InteractionContext) -> Result<(), DispatchError> {
        let arguments = self.arguments.clone()?;
        let guarded = self.clone();
        let task_context = context.clone();
        let body = tokio::spawn(async move { guarded.execute(task_context, arguments).await });

        match body.await {
            Ok(outcome) => outcome,
            Err(join_error) if join_error.is_panic() => Err(DispatchError::Panicked {
                target: self.label.clone(),
            }),
            Err(_) => Err(DispatchError::Cancelled {
                target: self.label.clone(),
            }),
        }
    }

    /// Evaluates the owner gate, then each check in order, then calls the
    /// handler.
    async fn execute(
        &self,
        context: InteractionContext,
        arguments: Arguments,
    ) -> Result<(), DispatchError> {
        let check_failed = || DispatchError::CheckFailed {
            target: self.label.clone(),
        };

        if let Some(owner) = &self.owner
            && !owner.check(&context).await
        {
            tracing::debug!(
                handler = %self.label,
                owner = owner.name(),
                "owner check rejected interaction"
            );
            return Err(check_failed());
        }
        for check in &self.checks {
            if !check.evaluate(&context).await {
                tracing::debug!(handler = %self.label, "check rejected interaction");
                return Err(check_failed());
            }
        }

        self.handler
            .call(context, arguments)
            .await
            .map_err(|error| DispatchError::Handler {
                target: self.label.clone(),
                error,
            })
    }
}

fn validate(
    signature: &HandlerSignature,
    label: &str,
    arguments: Arguments,
) -> Result<Arguments, DispatchError> {
    signature.validate(label, &arguments)?;
    Ok(arguments)
}

impl std::fmt::Debug for Invoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invoker")
            .field("entity_cache", &self.entity_cache.is_some())
            .field("error_listener", &self.error_listener.is_some())
            .finish()
    }
}
