//! Memoization of filtered views, keyed by dataset generation and query.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use indicacoes_data_models::DashboardData;

use crate::filter_dashboard;

/// Maximum number of cached filtered views per dataset generation.
const DEFAULT_CAPACITY: usize = 64;

struct CacheInner {
    generation: u64,
    entries: HashMap<String, Arc<DashboardData>>,
}

/// Caches filter results so repeated queries against the same dataset do
/// not recompute the view.
///
/// The key is the pair of the dataset's generation (from the store) and the
/// normalized query string. A generation change (dataset reload) clears the
/// cache. Empty queries short-circuit to the input dataset itself and are
/// never cached.
pub struct FilterCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

impl Default for FilterCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl FilterCache {
    /// Creates a cache holding at most `capacity` filtered views.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                generation: 0,
                entries: HashMap::new(),
            }),
            capacity: capacity.max(1),
        }
    }

    /// Returns the filtered view for `query`, computing and caching it on a
    /// miss.
    ///
    /// # Panics
    ///
    /// Panics if the cache lock is poisoned.
    #[must_use]
    pub fn get_or_compute(
        &self,
        generation: u64,
        data: &Arc<DashboardData>,
        query: &str,
    ) -> Arc<DashboardData> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Arc::clone(data);
        }
        let key = trimmed.to_lowercase();

        let mut inner = self.inner.lock().expect("filter cache lock poisoned");
        if inner.generation != generation {
            inner.entries.clear();
            inner.generation = generation;
        }
        if let Some(hit) = inner.entries.get(&key) {
            log::trace!("Filter cache hit for {key:?} (generation {generation})");
            return Arc::clone(hit);
        }

        let view = Arc::new(filter_dashboard(data, trimmed));
        if inner.entries.len() >= self.capacity {
            // Wholesale eviction keeps the bookkeeping trivial; the cache
            // only ever holds views of a single generation.
            inner.entries.clear();
        }
        inner.entries.insert(key, Arc::clone(&view));
        view
    }
}
