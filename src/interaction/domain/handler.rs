//! Handler, guard, and owner abstractions invoked during dispatch.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{DispatchError, HandlerError, InteractionContext};

/// Boxed, sendable future.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Result returned by handler bodies.
pub type HandlerResult = Result<(), HandlerError>;

/// Option values supplied to a handler, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(BTreeMap<String, Value>);

impl Arguments {
    /// Creates an empty argument map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous value for the name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    /// Returns the raw value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns the value for `name` as a string slice.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns the value for `name` as an integer.
    #[must_use]
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Returns the value for `name` as a floating-point number.
    #[must_use]
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// Returns the value for `name` as a boolean.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Returns `true` when a value is present for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterates over parameter names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the number of supplied values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no values were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the arguments and returns the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }
}

/// Body executed for a routed interaction.
///
/// Implemented for every `Fn(InteractionContext, Arguments) -> Future`
/// closure, so plain async closures can be registered directly. Handlers
/// that belong to a stateful owner capture it themselves.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs the handler body.
    async fn call(&self, context: InteractionContext, arguments: Arguments) -> HandlerResult;
}

#[async_trait]
impl<F, Fut> Handler for F
where
    F: Fn(InteractionContext, Arguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn call(&self, context: InteractionContext, arguments: Arguments) -> HandlerResult {
        (self)(context, arguments).await
    }
}

/// Wraps an async closure as a shareable handler.
pub fn handler_fn<F, Fut>(handler: F) -> Arc<dyn Handler>
where
    F: Fn(InteractionContext, Arguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(handler)
}

type SyncPredicate = dyn Fn(&InteractionContext) -> bool + Send + Sync;
type AsyncPredicate = dyn Fn(InteractionContext) -> BoxFuture<bool> + Send + Sync;

/// Guard predicate gating whether a handler body may run.
#[derive(Clone)]
pub enum Check {
    /// Predicate evaluated inline.
    Sync(Arc<SyncPredicate>),
    /// Predicate that may suspend.
    Async(Arc<AsyncPredicate>),
}

impl Check {
    /// Creates a synchronous check.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&InteractionContext) -> bool + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(predicate))
    }

    /// Creates an asynchronous check.
    pub fn asynchronous<F, Fut>(predicate: F) -> Self
    where
        F: Fn(InteractionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self::Async(Arc::new(
            move |context: InteractionContext| -> BoxFuture<bool> { Box::pin(predicate(context)) },
        ))
    }

    /// Evaluates the check against `context`.
    pub async fn evaluate(&self, context: &InteractionContext) -> bool {
        match self {
            Self::Sync(predicate) => predicate(context),
            Self::Async(predicate) => predicate(context.clone()).await,
        }
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("Check::Sync"),
            Self::Async(_) => f.write_str("Check::Async"),
        }
    }
}

/// Handler-level recovery hook; returns `true` when it handled the error.
pub type ErrorHook = Arc<dyn Fn(&InteractionContext, &DispatchError) -> bool + Send + Sync>;

/// Stateful owner of a group of handlers.
///
/// An owner can gate every handler it owns before per-handler checks run and
/// gets the first chance to recover from their errors.
#[async_trait]
pub trait Owner: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Owner-level gate evaluated before the handler's own checks.
    async fn check(&self, _context: &InteractionContext) -> bool {
        true
    }

    /// Owner-level recovery hook; returns `true` when it handled the error.
    async fn on_error(&self, _context: &InteractionContext, _error: &DispatchError) -> bool {
        false
    }
}
