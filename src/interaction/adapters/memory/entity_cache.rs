//! Map-backed entity cache.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::interaction::{domain::Snowflake, ports::EntityCache};

/// Thread-safe entity cache backed by a hash map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntityCache {
    entities: Arc<RwLock<HashMap<Snowflake, Value>>>,
}

impl InMemoryEntityCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `entity` under `id`, replacing any previous entry.
    pub fn insert(&self, id: Snowflake, entity: Value) {
        self.entities
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, entity);
    }
}

impl EntityCache for InMemoryEntityCache {
    fn get(&self, id: Snowflake) -> Option<Value> {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }
}
