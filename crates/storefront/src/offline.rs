//! Offline asset cache.
//!
//! Mirrors the site's caching worker: on install every manifest URL is
//! stored under the current cache name, requests are served cache-first with
//! a network fallback, and activation deletes caches left by older releases.

use crate::services::types::OfflineConfig;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Named list of URLs precached on install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheManifest {
    pub cache_name: String,
    pub urls: Vec<String>,
}

impl From<&OfflineConfig> for CacheManifest {
    fn from(config: &OfflineConfig) -> Self {
        Self {
            cache_name: config.cache_name.clone(),
            urls: config.urls.clone(),
        }
    }
}

/// Network boundary for cache misses and installs
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetches manifest paths relative to a base URL
pub struct HttpFetcher {
    base_url: reqwest::Url,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = reqwest::Url::parse(base_url)
            .with_context(|| format!("Invalid base URL: {}", base_url))?;
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    pub fn resolve(&self, url: &str) -> Result<reqwest::Url> {
        self.base_url
            .join(url)
            .with_context(|| format!("Cannot resolve {} against {}", url, self.base_url))
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let target = self.resolve(url)?;
        let response = self
            .client
            .get(target.clone())
            .send()
            .await
            .with_context(|| format!("Failed to request {}", target))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("{} returned {}", target, response.status()));
        }

        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read body of {}", target))?;
        Ok(body.to_vec())
    }
}

/// Where a served response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Cache,
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub body: Vec<u8>,
    pub source: ResponseSource,
}

type Cache = BTreeMap<String, Vec<u8>>;

/// In-memory cache storage keyed by cache name, then URL
pub struct OfflineCache {
    manifest: CacheManifest,
    caches: Mutex<BTreeMap<String, Cache>>,
}

impl OfflineCache {
    pub fn new(manifest: CacheManifest) -> Self {
        Self {
            manifest,
            caches: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn manifest(&self) -> &CacheManifest {
        &self.manifest
    }

    /// Store a single response under `cache_name`
    pub fn put(&self, cache_name: &str, url: &str, body: Vec<u8>) {
        self.lock()
            .entry(cache_name.to_string())
            .or_default()
            .insert(url.to_string(), body);
    }

    pub fn cache_names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    /// Number of entries in the current cache
    pub fn len(&self) -> usize {
        self.lock()
            .get(&self.manifest.cache_name)
            .map_or(0, |cache| cache.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Precache every manifest URL. Nothing is stored unless all fetches succeed.
    pub async fn install(&self, fetcher: &dyn Fetcher) -> Result<usize> {
        let mut staged = Cache::new();
        for url in &self.manifest.urls {
            let body = fetcher
                .fetch(url)
                .await
                .with_context(|| format!("Failed to precache {}", url))?;
            tracing::debug!(url = %url, bytes = body.len(), "precached");
            staged.insert(url.clone(), body);
        }

        let count = staged.len();
        self.lock()
            .entry(self.manifest.cache_name.clone())
            .or_default()
            .extend(staged);
        tracing::info!(cache = %self.manifest.cache_name, entries = count, "offline cache installed");
        Ok(count)
    }

    /// Serve `url` from any cache, falling back to the network.
    ///
    /// Network responses are returned as-is and not stored.
    pub async fn fetch(&self, url: &str, fetcher: &dyn Fetcher) -> Result<CachedResponse> {
        let cached = self
            .lock()
            .values()
            .find_map(|cache| cache.get(url).cloned());

        if let Some(body) = cached {
            return Ok(CachedResponse {
                body,
                source: ResponseSource::Cache,
            });
        }

        tracing::debug!(url, "cache miss");
        let body = fetcher.fetch(url).await?;
        Ok(CachedResponse {
            body,
            source: ResponseSource::Network,
        })
    }

    /// Delete every cache other than the current one; returns the deleted names
    pub fn activate(&self) -> Vec<String> {
        let mut caches = self.lock();
        let stale: Vec<String> = caches
            .keys()
            .filter(|name| **name != self.manifest.cache_name)
            .cloned()
            .collect();
        for name in &stale {
            tracing::info!(cache = %name, "deleting old cache");
            caches.remove(name);
        }
        stale
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Cache>> {
        self.caches.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
