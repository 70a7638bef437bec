//! # Bounded recency cache with eviction callbacks
//!
//! The combined hash-index + recency-list structure at the heart of this
//! crate.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────┐
//!   │                     ConcurrentCacheHash<K, V>                  │
//!   │                                                                │
//!   │   ┌──────────────────────────────────────────────────────────┐ │
//!   │   │              Arc<parking_lot::Mutex<CacheHash>>          │ │
//!   │   └──────────────────────────────────────────────────────────┘ │
//!   │                               │                                │
//!   │                               ▼                                │
//!   │   ┌──────────────────────────────────────────────────────────┐ │
//!   │   │                     CacheHash<K, V>                      │ │
//!   │   │                                                          │ │
//!   │   │   FxHashMap<K, Handle>          (index)                  │ │
//!   │   │   RecencyList<Entry<K, V>>      (order)                  │ │
//!   │   │   Option<EvictCallback<K, V>>   (single mutable slot)    │ │
//!   │   │                                                          │ │
//!   │   │   front ─► [MRU] ◄──► ... ◄──► [LRU] ◄── back            │ │
//!   │   └──────────────────────────────────────────────────────────┘ │
//!   └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Index and order are kept strictly in sync: every key in the index maps
//! to exactly one live node in the recency list, and every node's key is
//! in the index. An index handle with no live node is a programming error
//! inside this crate and panics rather than corrupting state.
//!
//! ## Operations
//!
//! | Method                 | Complexity | Promotes? | May fire callback? |
//! |------------------------|------------|-----------|--------------------|
//! | `insert(k, v)`         | O(1)*      | yes       | yes (overflow)     |
//! | `get(&k)`              | O(1)       | yes       | no                 |
//! | `peek(&k)`             | O(1)       | no        | no                 |
//! | `contains(&k)`         | O(1)       | no        | no                 |
//! | `remove(&k)`           | O(1)       | -         | never              |
//! | `front()` / `back()`   | O(1)       | no        | no                 |
//! | `pop_lru()`            | O(1)       | -         | yes                |
//! | `touch(&k)`            | O(1)       | yes       | no                 |
//! | `len()` / `capacity()` | O(1)       | no        | no                 |
//!
//! ## Capacity semantics
//!
//! Capacity is fixed at construction and no lower bound is enforced. The
//! overflow check is `len >= capacity` before inserting a new key, so a
//! cache built with capacity 0 cannot stably hold any entry: each insert
//! of a new key evicts whatever the previous insert left behind.
//!
//! ## Eviction callback
//!
//! A single replaceable slot, default none. It fires exactly once per
//! capacity-driven eviction and once per [`CacheHash::pop_lru`], and
//! never for [`CacheHash::remove`] or [`CacheHash::clear`] — explicit
//! deletion is not eviction. On the concurrent wrapper the callback runs
//! while the cache mutex is held; a callback that re-enters the same
//! cache will deadlock. That is a documented caller obligation, kept
//! deliberately so eviction is always synchronous with the operation
//! that caused it.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;

use crate::ds::arena::Handle;
use crate::ds::recency_list::RecencyList;
use crate::error::InvariantError;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Callback invoked with the evicted key and value on every
/// capacity-driven or manual eviction.
pub type EvictCallback<K, V> = Box<dyn FnMut(&K, &V) + Send>;

/// One key/value pair held as a node in the recency list.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Bounded, recency-ordered key/value cache.
///
/// Single-threaded core; wrap in [`ConcurrentCacheHash`] for shared use.
/// All operations are O(1) amortized.
///
/// # Example
///
/// ```
/// use cachehash::cache::CacheHash;
///
/// let mut cache = CacheHash::new(2);
/// cache.insert("a", 1);
/// cache.insert("b", 2);
///
/// // "a" is LRU; inserting a third key evicts it.
/// cache.insert("c", 3);
/// assert!(!cache.contains(&"a"));
/// assert_eq!(cache.len(), 2);
/// ```
pub struct CacheHash<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, Handle>,
    order: RecencyList<Entry<K, V>>,
    capacity: usize,
    evict_cb: Option<EvictCallback<K, V>>,
}

/// Index and recency list disagree. Unreachable in a correct
/// implementation; aborting beats silently corrupting state.
#[cold]
fn desync(op: &str) -> ! {
    panic!("cachehash: {op}: index handle has no live recency-list node");
}

impl<K, V> CacheHash<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache bounded to `capacity` entries.
    ///
    /// Any capacity is accepted; see the module docs for the degenerate
    /// behavior of capacity 0.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: RecencyList::with_capacity(capacity),
            capacity,
            evict_cb: None,
        }
    }

    /// Inserts a key-value pair, returning the previous value if the key
    /// already existed.
    ///
    /// Existing key: the stored value is replaced and the entry promoted
    /// to most recently used. New key at capacity: the LRU entry is
    /// evicted first (firing the callback), then the new entry is pushed
    /// to the front.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&handle) = self.index.get(&key) {
            let entry = match self.order.get_mut(handle) {
                Some(entry) => entry,
                None => desync("insert"),
            };
            let previous = std::mem::replace(&mut entry.value, value);
            self.order.move_to_front(handle);

            #[cfg(debug_assertions)]
            self.debug_validate();

            return Some(previous);
        }

        if self.order.len() >= self.capacity {
            let _ = self.pop_lru();
        }

        let handle = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, handle);

        #[cfg(debug_assertions)]
        self.debug_validate();

        None
    }

    /// Looks up a key and promotes it to most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let &handle = self.index.get(key)?;
        if !self.order.move_to_front(handle) {
            desync("get");
        }
        match self.order.get(handle) {
            Some(entry) => Some(&entry.value),
            None => desync("get"),
        }
    }

    /// Looks up a key without touching recency order.
    ///
    /// Use this for observation that must not affect eviction priority
    /// (inspection, metrics, idempotent existence probes).
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &handle = self.index.get(key)?;
        match self.order.get(handle) {
            Some(entry) => Some(&entry.value),
            None => desync("peek"),
        }
    }

    /// Returns `true` if the key is present. Never alters recency order.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Removes a key, returning its value if it was present.
    ///
    /// Never invokes the eviction callback: the callback is reserved for
    /// capacity-driven (and manual [`pop_lru`](Self::pop_lru)) removal.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let handle = self.index.remove(key)?;
        let entry = match self.order.remove(handle) {
            Some(entry) => entry,
            None => desync("remove"),
        };

        #[cfg(debug_assertions)]
        self.debug_validate();

        Some(entry.value)
    }

    /// Most recently used entry, or `None` on an empty cache.
    pub fn front(&self) -> Option<(&K, &V)> {
        self.order.front().map(|entry| (&entry.key, &entry.value))
    }

    /// Least recently used entry, or `None` on an empty cache.
    pub fn back(&self) -> Option<(&K, &V)> {
        self.order.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Unconditionally removes the least recently used entry, invoking
    /// the eviction callback if one is registered.
    ///
    /// No-op returning `None` on an empty cache. The `insert` overflow
    /// path calls this same method, so manual and automatic eviction are
    /// guaranteed identical.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.order.pop_back()?;
        if self.index.remove(&entry.key).is_none() {
            desync("pop_lru");
        }
        if let Some(cb) = self.evict_cb.as_mut() {
            cb(&entry.key, &entry.value);
        }

        #[cfg(debug_assertions)]
        self.debug_validate();

        Some((entry.key, entry.value))
    }

    /// Promotes a key to most recently used without reading its value.
    pub fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&handle) => {
                if !self.order.move_to_front(handle) {
                    desync("touch");
                }
                true
            }
            None => false,
        }
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Capacity bound fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all entries without invoking the eviction callback.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    /// Replaces the eviction callback; `None` disables notification.
    ///
    /// Registration is a pure metadata update: entries evicted before the
    /// call are not reported retroactively. The callback runs during the
    /// evicting operation itself — under the lock, for the concurrent
    /// wrapper — so it must not re-enter the cache.
    pub fn set_evict_callback(&mut self, callback: Option<EvictCallback<K, V>>) {
        self.evict_cb = callback;
    }

    /// Walks the structure and reports the first violated invariant.
    ///
    /// Diagnostic for tests and debugging; all public operations maintain
    /// these invariants unconditionally.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index has {} keys but recency list has {} nodes",
                self.index.len(),
                self.order.len()
            )));
        }
        for (key, &handle) in &self.index {
            match self.order.get(handle) {
                Some(entry) if entry.key == *key => {}
                Some(_) => {
                    return Err(InvariantError::new(
                        "index handle points at a node holding a different key",
                    ));
                }
                None => {
                    return Err(InvariantError::new(
                        "index handle has no live recency-list node",
                    ));
                }
            }
        }
        for (handle, entry) in self.order.iter_entries() {
            if self.index.get(&entry.key) != Some(&handle) {
                return Err(InvariantError::new(
                    "recency-list node not indexed under its own key",
                ));
            }
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn debug_validate(&self) {
        self.order.debug_validate_invariants();
        debug_assert_eq!(self.index.len(), self.order.len());
    }
}

impl<K, V> fmt::Debug for CacheHash<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheHash")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("has_evict_callback", &self.evict_cb.is_some())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for CacheHash<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> CoreCache<K, V> for CacheHash<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        CacheHash::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        CacheHash::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        CacheHash::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        CacheHash::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        CacheHash::capacity(self)
    }

    #[inline]
    fn clear(&mut self) {
        CacheHash::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for CacheHash<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        CacheHash::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for CacheHash<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, V)> {
        CacheHash::pop_lru(self)
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.back()
    }

    #[inline]
    fn peek_mru(&self) -> Option<(&K, &V)> {
        self.front()
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        CacheHash::touch(self, key)
    }
}

// ---------------------------------------------------------------------------
// Concurrent wrapper
// ---------------------------------------------------------------------------

/// Thread-safe recency cache: a [`CacheHash`] behind one exclusive lock.
///
/// Every operation acquires the mutex for its full duration, so no
/// partial-update state is ever observable from another thread. Even
/// reads take the exclusive lock, because a hit on [`get`](Self::get)
/// mutates recency order.
///
/// `Clone` is shallow: clones share the same underlying cache.
///
/// # Deadlock hazard
///
/// The eviction callback executes while the lock is held. A callback
/// that calls back into the same cache will deadlock; this synchronous-
/// under-lock behavior is part of the contract and is not going to be
/// relaxed quietly.
///
/// # Example
///
/// ```
/// use cachehash::cache::ConcurrentCacheHash;
///
/// let cache = ConcurrentCacheHash::new(100);
/// cache.insert(1u32, "one".to_string());
///
/// let reader = cache.clone();
/// std::thread::spawn(move || {
///     assert_eq!(reader.get(&1), Some("one".to_string()));
/// })
/// .join()
/// .unwrap();
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentCacheHash<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<Mutex<CacheHash<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentCacheHash<K, V>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentCacheHash<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentCacheHash")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> Default for ConcurrentCacheHash<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Send,
{
    /// Creates a concurrent cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCacheHash<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Send,
{
    /// Creates an empty thread-safe cache bounded to `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheHash::new(capacity))),
        }
    }

    /// Inserts a key-value pair, returning the previous value if the key
    /// already existed. May evict the LRU entry and fire the callback.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().insert(key, value)
    }

    /// Looks up a key, promotes it, and returns a clone of its value.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Runs `f` on the value for `key` after promoting it.
    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.inner.lock().get(key).map(f)
    }

    /// Returns a clone of the value for `key` without promoting it.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Runs `f` on the value for `key` without promoting it.
    pub fn peek_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.inner.lock().peek(key).map(f)
    }

    /// Returns `true` if the key is present. Never alters recency order.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Removes a key, returning its value. Never fires the callback.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// Most recently used entry as an owned pair, or `None` when empty.
    pub fn front(&self) -> Option<(K, V)>
    where
        V: Clone,
    {
        self.inner
            .lock()
            .front()
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Least recently used entry as an owned pair, or `None` when empty.
    pub fn back(&self) -> Option<(K, V)>
    where
        V: Clone,
    {
        self.inner
            .lock()
            .back()
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Unconditionally evicts the LRU entry, firing the callback.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.lock().pop_lru()
    }

    /// Promotes a key without reading its value.
    pub fn touch(&self, key: &K) -> bool {
        self.inner.lock().touch(key)
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Capacity bound fixed at construction.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Removes all entries without firing the callback.
    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// Replaces the eviction callback; `None` disables notification.
    ///
    /// The callback runs while the cache mutex is held. It must not
    /// re-enter this cache.
    pub fn set_evict_callback(&self, callback: Option<EvictCallback<K, V>>) {
        self.inner.lock().set_evict_callback(callback)
    }

    /// Walks the structure and reports the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
