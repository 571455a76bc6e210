//! Process-wide model handle cache
//!
//! Explicit memoized lazy initialization keyed by language pair. Each key
//! owns a construct-once cell: concurrent first-access callers for the same
//! uncached pair await a single in-flight construction instead of each
//! fetching the model independently. Handles are never evicted; the catalog
//! is small and fixed, so unbounded growth is bounded in practice by the
//! number of catalog entries.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

use crate::core::catalog::LanguagePair;
use crate::core::errors::Result;
use crate::engine::{ModelEngine, ModelHandle};

/// Cache of loaded model handles keyed by (source, target)
pub struct ModelHandleCache {
    /// External provider performing the expensive construction
    engine: Arc<dyn ModelEngine>,
    /// One construct-once cell per pair; the outer mutex only guards the map
    handles: Mutex<HashMap<LanguagePair, Arc<OnceCell<Arc<dyn ModelHandle>>>>>,
}

impl ModelHandleCache {
    /// Create an empty cache backed by `engine`
    pub fn new(engine: Arc<dyn ModelEngine>) -> Self {
        Self {
            engine,
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// Get the handle for a pair, constructing it on first access
    ///
    /// A cache hit returns the previously constructed handle unchanged. A
    /// failed construction is not cached: the error propagates to every
    /// caller awaiting it and the next request starts a fresh construction.
    pub async fn get_handle(&self, pair: &LanguagePair) -> Result<Arc<dyn ModelHandle>> {
        let cell = {
            let mut handles = self.handles.lock().await;
            handles
                .entry(pair.clone())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        if let Some(handle) = cell.get() {
            debug!("Cache hit for pair {}", pair);
            return Ok(handle.clone());
        }

        let handle = cell
            .get_or_try_init(|| async {
                info!("Loading model for pair {}", pair);
                self.engine.load(pair).await
            })
            .await?;

        Ok(handle.clone())
    }

    /// Number of pairs with a fully constructed handle
    pub async fn len(&self) -> usize {
        let handles = self.handles.lock().await;
        handles.values().filter(|cell| cell.initialized()).count()
    }

    /// Whether no handle has been constructed yet
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
