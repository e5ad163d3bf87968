// src/catalog.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::client::LlmClient;
use crate::config::Config;
use crate::types::CatalogModel;

pub const CACHE_FILENAME: &str = "openrouter_models_cache.json";

#[derive(Debug, Serialize, Deserialize)]
struct CachedModels {
    models: Vec<CatalogModel>,
    /// Milliseconds since the Unix epoch.
    timestamp: i64,
}

/// On-disk copy of the OpenRouter model catalog with a freshness window.
#[derive(Debug, Clone)]
pub struct ModelCatalogCache {
    path: PathBuf,
    ttl: Duration,
}

impl ModelCatalogCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self { path: path.into(), ttl }
    }

    /// `~/.git-commit-ai/openrouter_models_cache.json`, fresh for 24 hours.
    pub fn default_location() -> Option<Self> {
        Config::dir().map(|d| Self::new(d.join(CACHE_FILENAME), Duration::hours(24)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached models if the file exists, parses, and is younger than the TTL.
    pub fn load_fresh(&self, now: DateTime<Utc>) -> Option<Vec<CatalogModel>> {
        let data = std::fs::read_to_string(&self.path).ok()?;
        let cached: CachedModels = match serde_json::from_str(&data) {
            Ok(c) => c,
            Err(e) => {
                debug!(error = %e, "ignoring unreadable model cache");
                return None;
            }
        };
        let age = now.timestamp_millis() - cached.timestamp;
        if age < 0 || age >= self.ttl.num_milliseconds() {
            debug!(age_ms = age, "model cache is stale");
            return None;
        }
        Some(cached.models)
    }

    pub fn store(&self, models: &[CatalogModel], now: DateTime<Utc>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create cache directory")?;
        }
        let cached = CachedModels {
            models: models.to_vec(),
            timestamp: now.timestamp_millis(),
        };
        let json = serde_json::to_string(&cached).context("Failed to serialize model cache")?;
        std::fs::write(&self.path, json).context("Failed to write model cache")?;
        Ok(())
    }

    pub fn invalidate(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to remove model cache"),
        }
    }
}

/// Free OpenRouter models, served from the cache when fresh.
///
/// Fetch failures degrade to an empty list; cache write failures are warnings.
pub async fn free_openrouter_models(client: &LlmClient, cache: Option<&ModelCatalogCache>) -> Vec<CatalogModel> {
    let now = Utc::now();
    let models = match cache.and_then(|c| c.load_fresh(now)) {
        Some(models) => models,
        None => match client.list_models().await {
            Ok(models) => {
                if let Some(c) = cache {
                    debug!(path = %c.path().display(), count = models.len(), "caching OpenRouter models");
                    if let Err(e) = c.store(&models, now) {
                        warn!(error = %e, "failed to cache OpenRouter models");
                    }
                }
                models
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch OpenRouter models");
                Vec::new()
            }
        },
    };
    models.into_iter().filter(|m| m.is_free()).collect()
}

// =============================================================================
// MODULE TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ModelPricing;

    fn model(id: &str, free: bool) -> CatalogModel {
        let price = if free { "0" } else { "0.000001" };
        CatalogModel {
            id: id.into(),
            name: id.into(),
            pricing: ModelPricing {
                prompt: price.into(),
                completion: price.into(),
                request: "0".into(),
                image: "0".into(),
            },
        }
    }

    fn cache_in(dir: &tempfile::TempDir) -> ModelCatalogCache {
        ModelCatalogCache::new(dir.path().join("sub").join(CACHE_FILENAME), Duration::hours(24))
    }

    #[test]
    fn missing_cache_is_not_fresh() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cache_in(&dir).load_fresh(Utc::now()).is_none());
    }

    #[test]
    fn stored_models_are_fresh_within_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let now = Utc::now();
        cache.store(&[model("a/free", true), model("b/paid", false)], now).unwrap();

        let loaded = cache.load_fresh(now + Duration::hours(23)).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, "a/free");
    }

    #[test]
    fn cache_expires_after_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let now = Utc::now();
        cache.store(&[model("a/free", true)], now).unwrap();
        assert!(cache.load_fresh(now + Duration::hours(24)).is_none());
    }

    #[test]
    fn cache_from_the_future_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let now = Utc::now();
        cache.store(&[model("a/free", true)], now).unwrap();
        assert!(cache.load_fresh(now - Duration::minutes(5)).is_none());
    }

    #[test]
    fn corrupt_cache_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        std::fs::create_dir_all(cache.path().parent().unwrap()).unwrap();
        std::fs::write(cache.path(), "{not json").unwrap();
        assert!(cache.load_fresh(Utc::now()).is_none());
    }

    #[test]
    fn invalidate_removes_file_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        cache.store(&[model("a/free", true)], Utc::now()).unwrap();
        cache.invalidate().unwrap();
        assert!(!cache.path().exists());
        cache.invalidate().unwrap();
    }

    #[test]
    fn cache_file_uses_millisecond_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let now = Utc::now();
        cache.store(&[], now).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(cache.path()).unwrap()).unwrap();
        assert_eq!(raw["timestamp"].as_i64(), Some(now.timestamp_millis()));
        assert!(raw["models"].as_array().unwrap().is_empty());
    }
}
