//! Component State Store
//!
//! Pluggable key/value cache used to externalize component state that would
//! not fit inside a platform identifier. Entries expire independently; the
//! registry only relies on the ttl contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use fred::prelude::*;
use fred::types::Expiration;
use thiserror::Error;

/// Default time-to-live for cached component state, in seconds.
pub const DEFAULT_STATE_TTL: u64 = 900;

/// Errors from the cache collaborator.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Backend failure, reported verbatim.
    #[error("cache backend error: {0}")]
    Backend(String),
}

impl From<Error> for CacheError {
    fn from(error: Error) -> Self {
        Self::Backend(error.to_string())
    }
}

/// Key/value cache with expiry for offloaded component state.
#[async_trait]
pub trait StateCache: Send + Sync {
    /// Ttl in seconds applied when a caller does not pass one.
    fn default_ttl(&self) -> u64 {
        DEFAULT_STATE_TTL
    }

    /// Store `value` under `key`, eligible for eviction after `ttl` seconds.
    async fn set(&self, key: &str, ttl: u64, value: String) -> Result<(), CacheError>;

    /// Fetch the value stored under `key`, if present and unexpired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
}

/// Redis key for an offloaded state entry.
fn state_key(key: &str) -> String {
    format!("component:state:{key}")
}

/// Redis-backed state cache.
pub struct RedisStateCache {
    redis: Client,
    default_ttl: u64,
}

impl RedisStateCache {
    /// Wrap an already-connected Redis client.
    #[must_use]
    pub const fn new(redis: Client) -> Self {
        Self {
            redis,
            default_ttl: DEFAULT_STATE_TTL,
        }
    }

    /// Override the default ttl.
    #[must_use]
    pub const fn with_default_ttl(mut self, ttl: u64) -> Self {
        self.default_ttl = ttl;
        self
    }
}

#[async_trait]
impl StateCache for RedisStateCache {
    fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    async fn set(&self, key: &str, ttl: u64, value: String) -> Result<(), CacheError> {
        let _: () = self
            .redis
            .set(
                state_key(key),
                value,
                Some(Expiration::EX(ttl as i64)),
                None,
                false,
            )
            .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let value: Option<String> = self.redis.get(state_key(key)).await?;
        Ok(value)
    }
}

struct MemoryEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// In-memory state cache with lazy expiry. Suitable for tests and
/// single-process deployments.
pub struct MemoryStateCache {
    entries: DashMap<String, MemoryEntry>,
    default_ttl: u64,
}

impl MemoryStateCache {
    /// An empty cache with the standard default ttl.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl: DEFAULT_STATE_TTL,
        }
    }

    /// Override the default ttl.
    #[must_use]
    pub fn with_default_ttl(mut self, ttl: u64) -> Self {
        self.default_ttl = ttl;
        self
    }
}

impl Default for MemoryStateCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateCache for MemoryStateCache {
    fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    async fn set(&self, key: &str, ttl: u64, value: String) -> Result<(), CacheError> {
        let expires_at = Utc::now() + chrono::Duration::seconds(ttl as i64);
        self.entries
            .insert(key.to_owned(), MemoryEntry { value, expires_at });
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let expired = match self.entries.get(key) {
            None => return Ok(None),
            Some(entry) => {
                if entry.expires_at > Utc::now() {
                    return Ok(Some(entry.value.clone()));
                }
                true
            }
        };
        if expired {
            self.entries.remove(key);
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_cache_round_trips() {
        let cache = MemoryStateCache::new();
        cache.set("k", 900, "v".into()).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("v".into()));
        assert_eq!(cache.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_cache_expires_lazily() {
        let cache = MemoryStateCache::new();
        cache.set("k", 0, "v".into()).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
        // The expired entry was dropped on read.
        assert!(cache.entries.get("k").is_none());
    }
}
