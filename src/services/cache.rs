use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::trace;

/// Expiring key/value store for computed responses
pub trait ResponseCache<V>: Send + Sync {
    /// Live value for `key`, `None` if absent or expired
    fn get(&self, key: &str) -> Option<Arc<V>>;

    /// Store `value` under `key` for `ttl`, replacing any previous entry
    fn set(&self, key: &str, value: V, ttl: Duration);
}

#[derive(Debug)]
struct CacheEntry<V> {
    value: Arc<V>,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// TTL cache on top of DashMap.
///
/// Entries are immutable once written; a write swaps the whole entry.
/// Expired entries are dropped on read, and every write sweeps the whole map,
/// so keys that are never read again do not pile up. There is no size bound.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }
}

impl<V: Send + Sync> ResponseCache<V> for TtlCache<V> {
    fn get(&self, key: &str) -> Option<Arc<V>> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired(now) {
                trace!(key, "cache hit");
                return Some(Arc::clone(&entry.value));
            }
        } else {
            return None;
        }

        // Expired: drop it unless a writer replaced it in the meantime
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        trace!(key, "cache entry expired");
        None
    }

    fn set(&self, key: &str, value: V, ttl: Duration) {
        let purged = self.purge_expired();
        if purged > 0 {
            trace!(purged, "swept expired cache entries");
        }
        let entry = CacheEntry {
            value: Arc::new(value),
            expires_at: Instant::now() + ttl,
        };
        self.entries.insert(key.to_string(), entry);
    }
}
