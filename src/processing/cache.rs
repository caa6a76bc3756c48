//! In-memory result cache for pipeline runs
//!
//! LRU eviction with a per-entry TTL. The cache is a plain value owned by
//! whoever drives the pipeline; there is no process-wide instance.

use crate::error::Result;
use crate::processing::document::{JobPosting, PipelineResult, Profile, ToneStyle};
use crate::processing::pipeline::{orchestrate, OrchestratorOptions};
use log::{debug, info};
use lru::LruCache;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

pub const DEFAULT_CAPACITY: usize = 100;
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub invalidations: u64,
}

impl CacheStats {
    /// Hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

pub struct PipelineCache<T = PipelineResult> {
    entries: LruCache<String, CacheEntry<T>>,
    ttl: Duration,
    stats: CacheStats,
}

impl<T: Clone> Default for PipelineCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

impl<T: Clone> PipelineCache<T> {
    /// A capacity of zero is raised to one
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            ttl,
            stats: CacheStats::default(),
        }
    }

    pub fn get(&mut self, key: &str) -> Option<T> {
        let expired = match self.entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => {
                self.stats.hits += 1;
                debug!("Cache hit: {}", key);
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        self.stats.misses += 1;
        if expired {
            self.entries.pop(key);
            self.stats.invalidations += 1;
            debug!("Cache entry expired: {}", key);
        } else {
            debug!("Cache miss: {}", key);
        }
        None
    }

    pub fn insert(&mut self, key: impl Into<String>, value: T) {
        self.insert_with_ttl(key, value, self.ttl);
    }

    pub fn insert_with_ttl(&mut self, key: impl Into<String>, value: T, ttl: Duration) {
        let key = key.into();
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };

        // push hands back either the replaced entry for this key or the evicted one
        if let Some((old_key, _)) = self.entries.push(key.clone(), entry) {
            if old_key != key {
                self.stats.evictions += 1;
                debug!("Evicted least recently used entry: {}", old_key);
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.pop(key).is_some();
        if removed {
            self.stats.invalidations += 1;
        }
        removed
    }

    /// Drop expired entries, returning how many went
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| now >= entry.expires_at)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.pop(key);
        }
        self.stats.invalidations += expired.len() as u64;
        expired.len()
    }

    pub fn clear(&mut self) {
        self.stats.invalidations += self.entries.len() as u64;
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            capacity: self.entries.cap().get(),
            ..self.stats.clone()
        }
    }
}

#[derive(Serialize)]
struct CacheKeyInput<'a> {
    profile: &'a Profile,
    job: &'a JobPosting,
    style: ToneStyle,
}

/// Hex SHA-256 of the canonical JSON form of the pipeline inputs
pub fn cache_key(profile: &Profile, job: &JobPosting, style: ToneStyle) -> Result<String> {
    let canonical = serde_json::to_vec(&CacheKeyInput { profile, job, style })?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(hex::encode(hasher.finalize()))
}

/// `orchestrate` behind a `PipelineCache`
pub struct CachedOrchestrator {
    cache: PipelineCache<PipelineResult>,
    options: OrchestratorOptions,
}

impl CachedOrchestrator {
    pub fn new(options: OrchestratorOptions, capacity: usize, ttl: Duration) -> Self {
        Self {
            cache: PipelineCache::new(capacity, ttl),
            options,
        }
    }

    pub async fn run(&mut self, profile: &Profile, job: &JobPosting) -> Result<PipelineResult> {
        let key = cache_key(profile, job, self.options.style)?;
        if let Some(result) = self.cache.get(&key) {
            info!("Using cached pipeline result for '{}'", job.title);
            return Ok(result);
        }

        let result = orchestrate(profile, job, self.options.clone()).await?;
        self.cache.insert(key, result.clone());
        Ok(result)
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}
