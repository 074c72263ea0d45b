//! In-memory cache for query responses.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use moka::sync::Cache;
use serde_json::Value;

use crate::graphql::GraphqlRequest;

/// Response cache with the library's default policy: unbounded, no TTL, no
/// custom invalidation. Scope equals the owning client instance; sharing
/// requires deliberately cloning one cache into several clients.
#[derive(Clone)]
pub struct QueryCache {
    entries: Cache<u64, Arc<Value>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().build(),
        }
    }

    /// Returns the cached data of an identical earlier request, if any.
    pub fn get(&self, request: &GraphqlRequest) -> Option<Arc<Value>> {
        self.entries.get(&key(request))
    }

    /// Stores the data of an error-free response.
    pub fn insert(&self, request: &GraphqlRequest, data: Value) {
        self.entries.insert(key(request), Arc::new(data));
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

fn key(request: &GraphqlRequest) -> u64 {
    let mut hasher = DefaultHasher::new();
    request.query.hash(&mut hasher);
    request.variables.to_string().hash(&mut hasher);
    request.operation_name.hash(&mut hasher);
    hasher.finish()
}
