//! Short-lived memo for acquisition results.
//!
//! A [`TtlCache`] maps keys to `(value, expiry)` pairs.  Expired entries are
//! treated as absent and dropped on the next lookup.  Writes are
//! last-writer-wins: recomputing a value is side-effect free, so two callers
//! racing to fill the same slot is harmless.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

struct Slot<V> {
    value: V,
    /// `None` when `now + ttl` is past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl<V> Slot<V> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

pub struct TtlCache<K, V> {
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the live value under `key`, if any.
    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Store `value` under `key` for `ttl`.
    pub fn insert(&self, key: K, value: V, ttl: Duration) {
        self.insert_at(key, value, ttl, Instant::now());
    }

    pub(crate) fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        let mut slots = self.lock();
        match slots.get(key) {
            Some(slot) if slot.is_live(now) => Some(slot.value.clone()),
            Some(_) => {
                slots.remove(key);
                None
            }
            None => None,
        }
    }

    pub(crate) fn insert_at(&self, key: K, value: V, ttl: Duration, now: Instant) {
        let expires_at = now.checked_add(ttl);
        self.lock().insert(key, Slot { value, expires_at });
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.lock().retain(|_, slot| slot.is_live(now));
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Slot<V>>> {
        // Poisoning cannot leave a slot half-written.
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[test]
    fn returns_value_within_ttl() {
        let cache = TtlCache::new();
        let now = Instant::now();
        cache.insert_at("k", 1, TTL, now);

        assert_eq!(cache.get_at(&"k", now), Some(1));
        assert_eq!(cache.get_at(&"k", now + Duration::from_secs(59)), Some(1));
    }

    #[test]
    fn expires_after_ttl() {
        let cache = TtlCache::new();
        let now = Instant::now();
        cache.insert_at("k", 1, TTL, now);

        assert_eq!(cache.get_at(&"k", now + TTL), None);
        assert!(cache.is_empty(), "expired slot is evicted on lookup");
    }

    #[test]
    fn missing_key_is_none() {
        let cache: TtlCache<&str, i32> = TtlCache::new();
        assert_eq!(cache.get(&"nope"), None);
    }

    #[test]
    fn last_write_wins() {
        let cache = TtlCache::new();
        cache.insert("k", 1, TTL);
        cache.insert("k", 2, TTL);

        assert_eq!(cache.get(&"k"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_ttl_never_serves() {
        let cache = TtlCache::new();
        cache.insert("k", 1, Duration::ZERO);
        assert_eq!(cache.get(&"k"), None);
    }

    #[test]
    fn huge_ttl_never_expires() {
        let cache = TtlCache::new();
        let now = Instant::now();
        cache.insert_at("k", 1, Duration::MAX, now);

        assert_eq!(cache.get_at(&"k", now + Duration::from_secs(86_400 * 365)), Some(1));
        cache.purge_expired();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn purge_and_clear() {
        let cache = TtlCache::new();
        cache.insert("stale", 1, Duration::ZERO);
        cache.insert("fresh", 2, TTL);

        cache.purge_expired();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"fresh"), Some(2));

        cache.clear();
        assert!(cache.is_empty());
    }
}
