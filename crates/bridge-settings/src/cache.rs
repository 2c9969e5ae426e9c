//! TTL-bounded LRU cache for store records
//!
//! Read-through use: the caller checks `get`, loads from the store on a miss,
//! then `put`s the result. Concurrent misses for the same key are not
//! serialized, so two callers may both invoke the loader; the last insert
//! wins. Writers must `put` or `invalidate` only after their store write has
//! committed, never before.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

pub struct TtlCache<V> {
	cache: parking_lot::RwLock<LruCache<Box<str>, (V, Instant)>>,
	ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
	pub fn new(capacity: usize, ttl: Duration) -> Self {
		// SAFETY: This is a non-zero constant
		const ONE_HUNDRED: NonZeroUsize = match NonZeroUsize::new(100) {
			Some(v) => v,
			None => unreachable!(),
		};
		let non_zero = NonZeroUsize::new(capacity).unwrap_or(ONE_HUNDRED);
		Self { cache: parking_lot::RwLock::new(LruCache::new(non_zero)), ttl }
	}

	/// Returns the cached value unless its TTL has elapsed; expired entries
	/// are dropped on access
	pub fn get(&self, key: &str) -> Option<V> {
		let mut cache = self.cache.write();
		match cache.get(key) {
			Some((value, stored_at)) if stored_at.elapsed() < self.ttl => Some(value.clone()),
			Some(_) => {
				cache.pop(key);
				None
			}
			None => None,
		}
	}

	pub fn put(&self, key: impl Into<Box<str>>, value: V) {
		let mut cache = self.cache.write();
		cache.put(key.into(), (value, Instant::now()));
	}

	pub fn invalidate(&self, key: &str) {
		let mut cache = self.cache.write();
		cache.pop(key);
	}

	/// Drop all cached entries
	pub fn clear(&self) {
		let mut cache = self.cache.write();
		cache.clear();
	}
}


// vim: ts=4
