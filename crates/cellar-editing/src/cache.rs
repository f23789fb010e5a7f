//! Metadata cache
//!
//! [`QueryMetadata`] is cheap to derive but queried on every render, so
//! hosts with many open tabs can share one cache. Entries are keyed by the
//! exact normalized query text plus the exact ordered result-column list —
//! a change to either produces a different key, which is what keeps stale
//! table/column mappings from misclassifying edits.

use crate::introspect::{self, QueryMetadata};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

type CacheKey = (String, Vec<String>);

/// A capacity-bounded cache of introspection results.
///
/// Metadata is immutable, so entries are handed out as shared `Arc`s and
/// never invalidated in place. When the cache fills up it is cleared
/// wholesale rather than evicted entry by entry.
#[derive(Debug)]
pub struct MetadataCache {
    capacity: usize,
    entries: Mutex<HashMap<CacheKey, Arc<QueryMetadata>>>,
}

impl MetadataCache {
    /// Creates a cache holding up to `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns cached metadata for the query/result-shape pair, introspecting
    /// on a miss.
    pub fn get_or_introspect(&self, query: &str, result_columns: &[String]) -> Arc<QueryMetadata> {
        let key = (
            introspect::normalize_whitespace(query),
            result_columns.to_vec(),
        );

        let mut entries = self.entries.lock();
        if let Some(metadata) = entries.get(&key) {
            tracing::debug!("metadata cache hit");
            return Arc::clone(metadata);
        }

        let metadata = Arc::new(introspect::introspect(query, result_columns));
        if entries.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "metadata cache full, clearing");
            entries.clear();
        }
        entries.insert(key, Arc::clone(&metadata));
        metadata
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new(256)
    }
}
