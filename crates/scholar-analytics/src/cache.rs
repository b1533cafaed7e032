//! Memoization of analysis reports.
//!
//! Keyed by record-set version and canonical criteria, so loading a new
//! store never hits entries computed for an older one.

use std::sync::Arc;

use moka::future::Cache;
use uuid::Uuid;

use crate::analytics::{AnalysisReport, analyze_filtered};
use crate::config::AnalysisConfig;
use crate::error::AnalysisResult;
use crate::models::FilterCriteria;
use crate::store::RecordStore;

/// Report cache with TTL and bounded capacity.
#[derive(Clone)]
pub struct AnalysisCache {
    cache: Cache<String, Arc<AnalysisReport>>,
    enabled: bool,
}

impl AnalysisCache {
    /// Create a cache sized by `config`.
    #[must_use]
    pub fn new(config: &AnalysisConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.cache_max_size)
            .time_to_live(config.cache_ttl)
            .build();

        Self { cache, enabled: config.caching_enabled() }
    }

    /// Return the cached report for `(store, criteria)`, computing it on a miss.
    ///
    /// The analysis pass runs on the blocking pool so the async runtime
    /// stays responsive during large passes.
    ///
    /// # Errors
    ///
    /// Returns `Filter` for inconsistent criteria. Errors are never cached.
    pub async fn report(
        &self,
        store: &RecordStore,
        criteria: &FilterCriteria,
        config: &AnalysisConfig,
    ) -> AnalysisResult<Arc<AnalysisReport>> {
        criteria.validate()?;
        let key = Self::cache_key(store.version(), criteria);

        if self.enabled {
            if let Some(report) = self.cache.get(&key).await {
                tracing::debug!(key = %key, "Analysis cache hit");
                return Ok(report);
            }
        }

        let report = Arc::new(compute_report(store, criteria, config).await?);

        if self.enabled {
            self.cache.insert(key, Arc::clone(&report)).await;
        }
        Ok(report)
    }

    /// Number of cached reports (approximate until pending tasks run).
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drop every cached report.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Flush pending inserts and evictions so `entry_count` is exact.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }

    /// Generate cache key.
    fn cache_key(version: Uuid, criteria: &FilterCriteria) -> String {
        use md5::{Digest, Md5};

        let mut hasher = Md5::new();
        hasher.update(version.as_bytes());
        hasher.update(b"|");
        hasher.update(criteria.canonical_key().as_bytes());

        format!("{:x}", hasher.finalize())
    }
}

/// Analyze `store` on the blocking pool without touching any cache.
///
/// For one-off collections whose version will never be seen again.
///
/// # Errors
///
/// Returns `Filter` for inconsistent criteria.
pub async fn compute_report(
    store: &RecordStore,
    criteria: &FilterCriteria,
    config: &AnalysisConfig,
) -> AnalysisResult<AnalysisReport> {
    criteria.validate()?;
    let store = store.clone();
    let criteria = criteria.clone();
    let config = config.clone();

    match tokio::task::spawn_blocking(move || analyze_filtered(store.papers(), &criteria, &config))
        .await
    {
        Ok(result) => result,
        Err(e) => {
            // Only reachable if the pass panicked.
            tracing::error!(error = %e, "Analysis task failed");
            std::panic::resume_unwind(e.into_panic())
        }
    }
}

impl std::fmt::Debug for AnalysisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisCache")
            .field("enabled", &self.enabled)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
