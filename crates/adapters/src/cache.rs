//! In-process response cache with per-entry TTL and a size bound

use newsfront_domain::Clock;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Entries kept when no bound is configured
pub const DEFAULT_MAX_ENTRIES: usize = 256;

struct Entry<V> {
    value: V,
    stored_at: OffsetDateTime,
    expires_at: OffsetDateTime,
}

/// Keyed cache of successful results.
///
/// A `max_entries` of 0 disables storage.
///
/// The lock is never held across an await, so two concurrent misses for the
/// same key may both compute; the later insert wins.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
    clock: Arc<dyn Clock>,
    max_entries: usize,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(clock: Arc<dyn Clock>, max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            max_entries,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fresh value for `key`, dropping it if it has expired
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if now < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store `value` under `key` for `ttl`, evicting the oldest entry when full
    pub fn insert(&self, key: &str, value: V, ttl: Duration) {
        if self.max_entries == 0 {
            return;
        }
        let now = self.clock.now();
        let mut entries = self.lock();

        if !entries.contains_key(key) && entries.len() >= self.max_entries {
            entries.retain(|_, entry| now < entry.expires_at);
            if entries.len() >= self.max_entries {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.stored_at)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    tracing::debug!(key = %oldest, "Evicting cache entry");
                    entries.remove(&oldest);
                }
            }
        }

        entries.insert(
            key.to_string(),
            Entry {
                value,
                stored_at: now,
                expires_at: expiry(now, ttl),
            },
        );
    }

    /// Cached value for `key`, or the result of `compute`.
    ///
    /// Only `Ok` results are stored; an error is returned to the caller and
    /// the next call computes again.
    pub async fn get_or_try_compute<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            tracing::debug!(key = %key, "Cache hit");
            return Ok(value);
        }

        let value = compute().await?;
        self.insert(key, value.clone(), ttl);
        Ok(value)
    }

    /// Drop one entry; returns whether it was present
    pub fn invalidate(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Entries currently stored, expired ones included until touched
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `now + ttl`, saturating at the latest representable instant
fn expiry(now: OffsetDateTime, ttl: Duration) -> OffsetDateTime {
    time::Duration::try_from(ttl)
        .ok()
        .and_then(|ttl| now.checked_add(ttl))
        .unwrap_or(PrimitiveDateTime::MAX.assume_utc())
}
