use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::core::normalize::normalize_term;
use crate::models::UserProfile;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    Miss(String),
}

/// In-memory cache for catalog reads and suggestion responses
///
/// Values are stored as serialized JSON bytes so one cache can hold
/// heterogeneous payloads. Entries expire after the configured TTL;
/// catalog mutations call `clear` since every cached entry is derived
/// from the catalog.
pub struct CatalogCache {
    inner: moka::future::Cache<String, Vec<u8>>,
}

impl CatalogCache {
    /// Create a new cache with the given capacity and entry TTL
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let inner = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner }
    }

    /// Get a value from the cache
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.inner.get(key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::Miss(key.to_string()))
    }

    /// Set a value in the cache
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.inner.insert(key.to_string(), bytes).await;

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Drop every entry
    ///
    /// Used after catalog mutations: suggestion entries cannot be
    /// enumerated by profile, so the whole cache goes.
    pub fn clear(&self) {
        self.inner.invalidate_all();
        tracing::debug!("Cache cleared");
    }

    /// Number of live entries (approximate)
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build the cache key for the full catalog
    pub fn catalog() -> String {
        "catalog:all".to_string()
    }

    /// Build a cache key for a suggestion response
    ///
    /// Profile fields are normalized first so that queries differing
    /// only in case or whitespace share one entry. The fields are
    /// JSON-encoded so a value containing the separator cannot shift
    /// a field boundary; distinct normalized profiles always get
    /// distinct keys.
    pub fn suggestions(profile: &UserProfile) -> String {
        let fields = serde_json::json!([
            normalize_term(&profile.sex),
            profile.age,
            normalize_term(&profile.nationality),
            normalize_term(&profile.job),
        ]);

        format!("suggest:{}", fields)
    }
}
