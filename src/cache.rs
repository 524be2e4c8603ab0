//! In-process cache shared through the service registry.

use crate::di::{ServiceCollection, ServiceDescriptor};
use crate::error::BlogError;
use moka::sync::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryCacheOptions {
    pub ttl: Duration,
    pub max_entries: u64,
}

impl Default for MemoryCacheOptions {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_entries: 10_000,
        }
    }
}

/// TTL-bounded cache of JSON values keyed by string.
#[derive(Clone)]
pub struct MemoryCache {
    cache: Cache<String, Value>,
}

impl MemoryCache {
    pub fn new(options: MemoryCacheOptions) -> Self {
        let cache = Cache::builder()
            .max_capacity(options.max_entries)
            .time_to_live(options.ttl)
            .build();
        Self { cache }
    }

    pub fn insert<T: Serialize>(&self, key: impl Into<String>, value: &T) -> Result<(), BlogError> {
        let value = serde_json::to_value(value)?;
        self.cache.insert(key.into(), value);
        Ok(())
    }

    /// Returns `None` on a miss or once the entry expired.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, BlogError> {
        self.cache
            .get(key)
            .map(serde_json::from_value::<T>)
            .transpose()
            .map_err(Into::into)
    }

    pub fn remove(&self, key: &str) {
        self.cache.invalidate(key);
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(MemoryCacheOptions::default())
    }
}

impl ServiceCollection {
    /// Register a default [`MemoryCache`] singleton unless one is already registered.
    pub fn add_memory_cache(&mut self) -> &mut Self {
        self.try_add(ServiceDescriptor::instance(Arc::new(MemoryCache::default())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityUser;

    #[test]
    fn miss_when_no_entry_exists() {
        let cache = MemoryCache::default();
        let hit: Option<String> = cache.get("missing").unwrap();
        assert!(hit.is_none());
    }

    #[test]
    fn hit_after_insert_and_gone_after_remove() {
        let cache = MemoryCache::default();
        let user: IdentityUser<i64> = IdentityUser::with_user_name("alice");
        cache.insert("user:alice", &user).unwrap();

        let cached: IdentityUser<i64> = cache.get("user:alice").unwrap().unwrap();
        assert_eq!(cached, user);
        assert_eq!(cache.entry_count(), 1);

        cache.remove("user:alice");
        assert!(cache.get::<IdentityUser<i64>>("user:alice").unwrap().is_none());
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = MemoryCache::new(MemoryCacheOptions {
            ttl: Duration::from_millis(50),
            max_entries: 10,
        });
        cache.insert("k", &1_u32).unwrap();
        assert_eq!(cache.get::<u32>("k").unwrap(), Some(1));

        std::thread::sleep(Duration::from_millis(120));
        assert_eq!(cache.get::<u32>("k").unwrap(), None);
    }

    #[test]
    fn wrong_type_is_a_json_error() {
        let cache = MemoryCache::default();
        cache.insert("k", &"text").unwrap();
        assert!(matches!(cache.get::<u32>("k"), Err(BlogError::Json(_))));
    }

    #[test]
    fn registered_once() {
        let mut services = ServiceCollection::new();
        services.add_memory_cache().add_memory_cache();
        assert_eq!(services.len(), 1);

        let sp = services.build_provider();
        let a = sp.get::<MemoryCache>().unwrap();
        let b = sp.create_scope().get::<MemoryCache>().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
