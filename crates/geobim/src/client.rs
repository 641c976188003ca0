//! HTTP client for fetching model files.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};

/// Cache seam for fetched model bytes.
///
/// The client consults the cache before going to the network and stores every
/// successful response. Implementations must be safe to share across threads.
pub trait ByteCache: Send + Sync {
    fn get(&self, url: &str) -> Option<Vec<u8>>;
    fn put(&self, url: &str, bytes: &[u8]);
}

/// In-memory byte cache keyed by URL.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ByteCache for MemoryCache {
    fn get(&self, url: &str) -> Option<Vec<u8>> {
        self.entries.lock().ok()?.get(url).cloned()
    }

    fn put(&self, url: &str, bytes: &[u8]) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(url.to_owned(), bytes.to_vec());
        }
    }
}

/// Cache that never stores anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl ByteCache for NoCache {
    fn get(&self, _url: &str) -> Option<Vec<u8>> {
        None
    }

    fn put(&self, _url: &str, _bytes: &[u8]) {}
}

/// HTTP client for model files.
pub struct Client<C: ByteCache> {
    http: reqwest::Client,
    cache: C,
}

impl Default for Client<NoCache> {
    fn default() -> Self {
        Self::with_cache(NoCache)
    }
}

impl<C: ByteCache> Client<C> {
    #[must_use]
    pub fn with_cache(cache: C) -> Self {
        Self {
            http: reqwest::Client::new(),
            cache,
        }
    }

    /// Fetch the raw bytes of a model file.
    ///
    /// A non-success status or transport failure is fatal and aborts the load
    /// before the pipeline starts; nothing is retried.
    pub async fn fetch_model_bytes(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(bytes) = self.cache.get(url) {
            tracing::debug!(url, len = bytes.len(), "model bytes served from cache");
            return Ok(bytes);
        }

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?.to_vec();
        tracing::info!(url, len = bytes.len(), "fetched model bytes");
        self.cache.put(url, &bytes);
        Ok(bytes)
    }
}
