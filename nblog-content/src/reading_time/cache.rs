use std::{
  collections::hash_map::DefaultHasher,
  hash::{Hash, Hasher},
  sync::{Mutex, PoisonError},
};

use indexmap::IndexMap;
use log::trace;

use crate::types::ReadingTime;

/// Default number of cached estimates.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Identity of the document an estimate belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentKey {
  /// Stable page ID.
  Id(String),
  /// Digest of the input, for documents without an ID.
  Digest(u64),
}

impl DocumentKey {
  #[must_use]
  pub fn digest(text: &str) -> Self {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    Self::Digest(hasher.finish())
  }
}

/// Cache key: document identity, freshness marker and input length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
  pub document:  DocumentKey,
  pub freshness: Option<String>,
  pub length:    usize,
}

/// Bounded cache of reading-time estimates.
///
/// When full, inserting a new key evicts the earliest-inserted entry. Reads
/// do not change eviction order.
#[derive(Debug)]
pub struct ReadingTimeCache {
  capacity: usize,
  entries:  Mutex<IndexMap<CacheKey, ReadingTime>>,
}

impl Default for ReadingTimeCache {
  fn default() -> Self {
    Self::new(DEFAULT_CACHE_CAPACITY)
  }
}

impl ReadingTimeCache {
  /// Create a cache holding at most `capacity` entries (at least one).
  #[must_use]
  pub fn new(capacity: usize) -> Self {
    let capacity = capacity.max(1);
    Self {
      capacity,
      entries: Mutex::new(IndexMap::with_capacity(capacity)),
    }
  }

  #[must_use]
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.lock().len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.lock().is_empty()
  }

  #[must_use]
  pub fn get(&self, key: &CacheKey) -> Option<ReadingTime> {
    self.lock().get(key).copied()
  }

  #[must_use]
  pub fn contains(&self, key: &CacheKey) -> bool {
    self.lock().contains_key(key)
  }

  /// Insert an estimate, evicting the oldest entry if the cache is full.
  pub fn insert(&self, key: CacheKey, value: ReadingTime) {
    let mut entries = self.lock();
    insert_bounded(&mut entries, self.capacity, key, value);
  }

  /// Return the cached estimate for `key`, or compute and cache it.
  ///
  /// `compute` runs without the lock held, so a slow estimate never blocks
  /// other keys. If another caller cached `key` in the meantime, its entry is
  /// kept and returned.
  pub fn get_or_insert_with<F>(&self, key: CacheKey, compute: F) -> ReadingTime
  where
    F: FnOnce() -> ReadingTime,
  {
    if let Some(hit) = self.get(&key) {
      trace!("Reading time cache hit: {:?}", key.document);
      return hit;
    }

    let value = compute();

    let mut entries = self.lock();
    if let Some(existing) = entries.get(&key) {
      return *existing;
    }
    insert_bounded(&mut entries, self.capacity, key, value);
    value
  }

  pub fn clear(&self) {
    self.lock().clear();
  }

  fn lock(
    &self,
  ) -> std::sync::MutexGuard<'_, IndexMap<CacheKey, ReadingTime>> {
    // Entries are pure functions of their keys, so a poisoned map is still
    // consistent.
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

fn insert_bounded(
  entries: &mut IndexMap<CacheKey, ReadingTime>,
  capacity: usize,
  key: CacheKey,
  value: ReadingTime,
) {
  if !entries.contains_key(&key) && entries.len() >= capacity {
    if let Some((evicted, _)) = entries.shift_remove_index(0) {
      trace!("Evicting reading time for {:?}", evicted.document);
    }
  }
  entries.insert(key, value);
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use std::{sync::mpsc, time::Duration};

  use super::*;

  fn key(id: &str) -> CacheKey {
    CacheKey {
      document:  DocumentKey::Id(id.to_string()),
      freshness: None,
      length:    0,
    }
  }

  fn minutes(m: u32) -> ReadingTime {
    ReadingTime {
      minutes:        m,
      words:          0,
      under_a_minute: false,
    }
  }

  #[test]
  fn test_evicts_earliest_inserted() {
    let cache = ReadingTimeCache::new(2);
    cache.insert(key("a"), minutes(1));
    cache.insert(key("b"), minutes(2));
    // Reading "a" does not protect it
    assert_eq!(cache.get(&key("a")), Some(minutes(1)));
    cache.insert(key("c"), minutes(3));

    assert_eq!(cache.len(), 2);
    assert!(!cache.contains(&key("a")));
    assert!(cache.contains(&key("b")));
    assert!(cache.contains(&key("c")));
  }

  #[test]
  fn test_reinsert_existing_key_does_not_evict() {
    let cache = ReadingTimeCache::new(2);
    cache.insert(key("a"), minutes(1));
    cache.insert(key("b"), minutes(2));
    cache.insert(key("a"), minutes(5));
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(&key("a")), Some(minutes(5)));
    assert!(cache.contains(&key("b")));
  }

  #[test]
  fn test_get_or_insert_with_computes_once() {
    let cache = ReadingTimeCache::default();
    let mut calls = 0;
    let first = cache.get_or_insert_with(key("a"), || {
      calls += 1;
      minutes(4)
    });
    let second = cache.get_or_insert_with(key("a"), || {
      calls += 1;
      minutes(9)
    });
    assert_eq!(first, second);
    assert_eq!(calls, 1);
  }

  #[test]
  fn test_slow_compute_does_not_block_other_keys() {
    let cache = ReadingTimeCache::default();
    let shared = &cache;
    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    std::thread::scope(|scope| {
      let slow = scope.spawn(move || {
        let mut released = false;
        let value = shared.get_or_insert_with(key("slow"), || {
          let _ = started_tx.send(());
          released = release_rx.recv_timeout(Duration::from_secs(5)).is_ok();
          minutes(7)
        });
        (value, released)
      });

      started_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("slow compute started");
      // Runs while "slow" is still computing
      let fast = shared.get_or_insert_with(key("fast"), || minutes(1));
      assert_eq!(fast, minutes(1));
      release_tx.send(()).expect("slow compute is waiting");

      let (value, released) = slow.join().expect("slow thread finished");
      assert_eq!(value, minutes(7));
      assert!(released, "fast lookup waited for the slow compute");
    });

    assert_eq!(cache.len(), 2);
  }

  #[test]
  fn test_concurrent_fill_keeps_first_entry() {
    let cache = ReadingTimeCache::default();
    let value = cache.get_or_insert_with(key("a"), || {
      // Another caller fills the key while this one computes
      cache.insert(key("a"), minutes(2));
      minutes(9)
    });
    assert_eq!(value, minutes(2));
    assert_eq!(cache.get(&key("a")), Some(minutes(2)));
  }

  #[test]
  fn test_zero_capacity_holds_one() {
    let cache = ReadingTimeCache::new(0);
    assert_eq!(cache.capacity(), 1);
    cache.insert(key("a"), minutes(1));
    cache.insert(key("b"), minutes(1));
    assert_eq!(cache.len(), 1);
    assert!(cache.contains(&key("b")));
  }

  #[test]
  fn test_digest_is_deterministic() {
    assert_eq!(DocumentKey::digest("abc"), DocumentKey::digest("abc"));
    assert_ne!(DocumentKey::digest("abc"), DocumentKey::digest("abd"));
  }
}
