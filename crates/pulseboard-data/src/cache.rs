//! Per-upload cache of cleaned tables keyed by content hash and row policy.
//!
//! A slot holds the table for the most recent upload only. Uploading the same
//! bytes under the same row policy again is a hit; different bytes or a
//! different policy replace the entry.

use crate::table::CleanedTable;
use pulseboard_common::{ContentHash, Result};
use pulseboard_config::RowPolicy;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Hit, miss and invalidation counters of one cache slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Uploads served from the cached table
    pub hits: u64,
    /// Uploads that had to be ingested
    pub misses: u64,
    /// Cached tables replaced by a different upload
    pub invalidations: u64,
}

#[derive(Debug)]
struct CachedUpload<R> {
    hash: ContentHash,
    policy: RowPolicy,
    table: Arc<CleanedTable<R>>,
}

/// Cache slot for one dataset kind within a session.
#[derive(Debug)]
pub struct UploadCache<R> {
    current: Option<CachedUpload<R>>,
    stats: CacheStats,
}

impl<R> Default for UploadCache<R> {
    fn default() -> Self {
        Self {
            current: None,
            stats: CacheStats::default(),
        }
    }
}

impl<R> UploadCache<R> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached table for `bytes` cleaned under `policy`, or runs
    /// `load` and caches its result.
    ///
    /// A failed load leaves the previous entry in place.
    pub fn get_or_load<F>(
        &mut self,
        bytes: &[u8],
        policy: RowPolicy,
        load: F,
    ) -> Result<Arc<CleanedTable<R>>>
    where
        F: FnOnce(&[u8], RowPolicy) -> Result<CleanedTable<R>>,
    {
        let hash = ContentHash::of(bytes);
        if let Some(cached) = self
            .current
            .as_ref()
            .filter(|cached| cached.hash == hash && cached.policy == policy)
        {
            self.stats.hits += 1;
            debug!(hash = %hash.short(), "Upload cache hit");
            return Ok(Arc::clone(&cached.table));
        }

        self.stats.misses += 1;
        let table = Arc::new(load(bytes, policy)?);

        if let Some(previous) = self.current.replace(CachedUpload {
            hash,
            policy,
            table: Arc::clone(&table),
        }) {
            self.stats.invalidations += 1;
            warn!(
                previous = %previous.hash.short(),
                current = %hash.short(),
                policy = ?policy,
                "Replaced cached table"
            );
        }

        Ok(table)
    }

    /// The table of the current upload, if any.
    pub fn current(&self) -> Option<Arc<CleanedTable<R>>> {
        self.current.as_ref().map(|cached| Arc::clone(&cached.table))
    }

    /// Content hash of the current upload, if any.
    pub fn current_hash(&self) -> Option<ContentHash> {
        self.current.as_ref().map(|cached| cached.hash)
    }

    /// Counters since the slot was created.
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drops the cached table.
    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            self.stats.invalidations += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulseboard_common::DashError;
    use std::cell::Cell;

    fn loader(calls: &Cell<usize>) -> impl Fn(&[u8], RowPolicy) -> Result<CleanedTable<u8>> + '_ {
        move |bytes, _| {
            calls.set(calls.get() + 1);
            Ok(CleanedTable::new(bytes.to_vec(), 0))
        }
    }

    #[test]
    fn test_identical_upload_is_hit() {
        let calls = Cell::new(0);
        let mut cache = UploadCache::new();

        let first = cache.get_or_load(b"abc", RowPolicy::Fail, loader(&calls)).unwrap();
        let second = cache.get_or_load(b"abc", RowPolicy::Fail, loader(&calls)).unwrap();

        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                invalidations: 0
            }
        );
    }

    #[test]
    fn test_different_upload_invalidates() {
        let calls = Cell::new(0);
        let mut cache = UploadCache::new();

        cache.get_or_load(b"abc", RowPolicy::Fail, loader(&calls)).unwrap();
        let old_hash = cache.current_hash();
        let table = cache.get_or_load(b"xyz", RowPolicy::Fail, loader(&calls)).unwrap();

        assert_eq!(calls.get(), 2);
        assert_eq!(table.rows(), b"xyz");
        assert_ne!(cache.current_hash(), old_hash);
        assert_eq!(cache.stats().invalidations, 1);

        // Going back to the first bytes is a miss again.
        cache.get_or_load(b"abc", RowPolicy::Fail, loader(&calls)).unwrap();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_failed_load_keeps_previous_entry() {
        let calls = Cell::new(0);
        let mut cache = UploadCache::new();
        cache.get_or_load(b"abc", RowPolicy::Fail, loader(&calls)).unwrap();

        let err = cache
            .get_or_load(b"bad", RowPolicy::Fail, |_, _| Err(DashError::parse("broken")))
            .unwrap_err();
        assert!(matches!(err, DashError::Parse { .. }));
        assert_eq!(cache.current().map(|t| t.len()), Some(3));
        assert_eq!(cache.stats().invalidations, 0);
    }

    #[test]
    fn test_policy_change_reloads_same_bytes() {
        let calls = Cell::new(0);
        let mut cache = UploadCache::new();
        cache.get_or_load(b"abc", RowPolicy::Drop, loader(&calls)).unwrap();

        let err = cache
            .get_or_load(b"abc", RowPolicy::Fail, |_, policy| {
                assert_eq!(policy, RowPolicy::Fail);
                Err(DashError::coercion("Sales_Amount", 0, Some("ten".to_string()), "not a number"))
            })
            .unwrap_err();
        assert!(matches!(err, DashError::TypeCoercion { .. }));
        assert_eq!(calls.get(), 1);

        cache.get_or_load(b"abc", RowPolicy::Drop, loader(&calls)).unwrap();
        assert_eq!(cache.stats().hits, 1);

        let hash = cache.current_hash();
        cache.get_or_load(b"abc", RowPolicy::Fail, loader(&calls)).unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.current_hash(), hash);
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn test_clear() {
        let calls = Cell::new(0);
        let mut cache = UploadCache::new();
        cache.get_or_load(b"abc", RowPolicy::Fail, loader(&calls)).unwrap();
        cache.clear();
        assert!(cache.current().is_none());
    }
}
