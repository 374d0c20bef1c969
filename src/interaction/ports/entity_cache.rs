//! Entity cache port consulted when an event carries no resolved data.

use crate::interaction::domain::Snowflake;
use serde_json::Value;

/// Read-only lookup of previously seen entities (users, channels, roles).
pub trait EntityCache: Send + Sync {
    /// Returns the cached entity for `id`, if any.
    fn get(&self, id: Snowflake) -> Option<Value>;
}
