//! Component and autocomplete callbacks.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::{
    Arguments, Check, DispatchError, ErrorHook, Handler, HandlerResult, InteractionContext, Owner,
    handler_fn,
};

/// Handler for component and modal interactions, keyed by custom-id.
///
/// Incoming custom-ids match the key exactly or by prefix, so a callback
/// registered as `vote:` also receives `vote:yes` and `vote:no`.
#[derive(Clone)]
pub struct ComponentCallback {
    custom_id: String,
    handler: Arc<dyn Handler>,
    checks: Vec<Check>,
    owner: Option<Arc<dyn Owner>>,
    on_error: Option<ErrorHook>,
}

impl ComponentCallback {
    /// Creates a callback for `custom_id` from an async closure.
    #[must_use]
    pub fn new<F, Fut>(custom_id: impl Into<String>, handler: F) -> Self
    where
        F: Fn(InteractionContext, Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::with_handler(custom_id, handler_fn(handler))
    }

    /// Creates a callback for `custom_id` from a shared handler.
    #[must_use]
    pub fn with_handler(custom_id: impl Into<String>, handler: Arc<dyn Handler>) -> Self {
        Self {
            custom_id: custom_id.into(),
            handler,
            checks: Vec::new(),
            owner: None,
            on_error: None,
        }
    }

    /// Adds a guard predicate.
    #[must_use]
    pub fn with_check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Attaches an owner.
    #[must_use]
    pub fn with_owner(mut self, owner: Arc<dyn Owner>) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Attaches a recovery hook.
    #[must_use]
    pub fn with_error_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&InteractionContext, &DispatchError) -> bool + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Returns the registered custom-id or prefix.
    #[must_use]
    pub fn custom_id(&self) -> &str {
        &self.custom_id
    }

    /// Returns the handler.
    #[must_use]
    pub fn handler(&self) -> Arc<dyn Handler> {
        Arc::clone(&self.handler)
    }

    /// Returns the guard predicates.
    #[must_use]
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Returns the owner, if any.
    #[must_use]
    pub fn owner(&self) -> Option<&Arc<dyn Owner>> {
        self.owner.as_ref()
    }

    /// Returns the recovery hook, if any.
    #[must_use]
    pub fn error_hook(&self) -> Option<&ErrorHook> {
        self.on_error.as_ref()
    }
}

impl fmt::Debug for ComponentCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentCallback")
            .field("custom_id", &self.custom_id)
            .field("checks", &self.checks.len())
            .finish_non_exhaustive()
    }
}

/// Composite key addressing one autocompletable option.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AutocompleteKey {
    /// Top-level command name.
    pub command: String,
    /// Subcommand group name.
    pub subcommand_group: Option<String>,
    /// Subcommand name.
    pub subcommand: Option<String>,
    /// Focused option name.
    pub option: String,
}

impl AutocompleteKey {
    /// Creates a key for an option of a bare command.
    #[must_use]
    pub fn new(command: impl Into<String>, option: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            subcommand_group: None,
            subcommand: None,
            option: option.into(),
        }
    }

    /// Narrows the key to a subcommand.
    #[must_use]
    pub fn in_subcommand(mut self, subcommand: impl Into<String>) -> Self {
        self.subcommand = Some(subcommand.into());
        self
    }

    /// Narrows the key to a subcommand group.
    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.subcommand_group = Some(group.into());
        self
    }

    /// Returns the lookup string, `command:group:subcommand:option`, with
    /// absent segments left empty.
    #[must_use]
    pub fn composite(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.command,
            self.subcommand_group.as_deref().unwrap_or_default(),
            self.subcommand.as_deref().unwrap_or_default(),
            self.option
        )
    }
}

impl fmt::Display for AutocompleteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.composite())
    }
}

/// Handler producing suggestions for one focused option.
#[derive(Clone)]
pub struct AutocompleteCallback {
    key: AutocompleteKey,
    handler: Arc<dyn Handler>,
    owner: Option<Arc<dyn Owner>>,
    on_error: Option<ErrorHook>,
}

impl AutocompleteCallback {
    /// Creates a callback for `key` from an async closure.
    #[must_use]
    pub fn new<F, Fut>(key: AutocompleteKey, handler: F) -> Self
    where
        F: Fn(InteractionContext, Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::with_handler(key, handler_fn(handler))
    }

    /// Creates a callback for `key` from a shared handler.
    #[must_use]
    pub fn with_handler(key: AutocompleteKey, handler: Arc<dyn Handler>) -> Self {
        Self {
            key,
            handler,
            owner: None,
            on_error: None,
        }
    }

    /// Attaches an owner.
    #[must_use]
    pub fn with_owner(mut self, owner: Arc<dyn Owner>) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Attaches a recovery hook.
    #[must_use]
    pub fn with_error_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&InteractionContext, &DispatchError) -> bool + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Returns the composite key.
    #[must_use]
    pub const fn key(&self) -> &AutocompleteKey {
        &self.key
    }

    /// Returns the handler.
    #[must_use]
    pub fn handler(&self) -> Arc<dyn Handler> {
        Arc::clone(&self.handler)
    }

    /// Returns the owner, if any.
    #[must_use]
    pub fn owner(&self) -> Option<&Arc<dyn Owner>> {
        self.owner.as_ref()
    }

    /// Returns the recovery hook, if any.
    #[must_use]
    pub fn error_hook(&self) -> Option<&ErrorHook> {
        self.on_error.as_ref()
    }
}

impl fmt::Debug for AutocompleteCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutocompleteCallback")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
