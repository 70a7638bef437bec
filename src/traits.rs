//! # Cache trait hierarchy
//!
//! Defines the trait surface for the recency cache, split by capability so
//! callers can bound functions on exactly the operations they need.
//!
//! ```text
//!                ┌─────────────────────────────────────────┐
//!                │            CoreCache<K, V>              │
//!                │                                         │
//!                │  insert(&mut, K, V) → Option<V>         │
//!                │  get(&mut, &K) → Option<&V>             │
//!                │  contains(&, &K) → bool                 │
//!                │  len(&) → usize                         │
//!                │  is_empty(&) → bool                     │
//!                │  capacity(&) → usize                    │
//!                │  clear(&mut)                            │
//!                └──────────────────┬──────────────────────┘
//!                                   │
//!                                   ▼
//!                ┌─────────────────────────────────────────┐
//!                │          MutableCache<K, V>             │
//!                │                                         │
//!                │  remove(&K) → Option<V>                 │
//!                │  remove_batch(&[K]) → Vec<Option<V>>    │
//!                └──────────────────┬──────────────────────┘
//!                                   │
//!                                   ▼
//!                ┌─────────────────────────────────────────┐
//!                │          LruCacheTrait<K, V>            │
//!                │                                         │
//!                │  pop_lru() → Option<(K, V)>             │
//!                │  peek_lru() → Option<(&K, &V)>          │
//!                │  peek_mru() → Option<(&K, &V)>          │
//!                │  touch(&K) → bool                       │
//!                └─────────────────────────────────────────┘
//! ```
//!
//! | Trait           | Extends        | Purpose                            |
//! |-----------------|----------------|------------------------------------|
//! | `CoreCache`     | -              | Universal cache operations         |
//! | `MutableCache`  | `CoreCache`    | Arbitrary key-based removal        |
//! | `LruCacheTrait` | `MutableCache` | Recency-specific eviction & access |
//!
//! Eviction-callback semantics cut across the hierarchy: `insert` (on the
//! capacity-overflow path) and `pop_lru` invoke the registered callback;
//! `remove`, `remove_batch`, and `clear` never do. Explicit deletion is
//! not eviction.

/// Core cache operations that every cache supports.
///
/// # Example
///
/// ```
/// use cachehash::traits::CoreCache;
/// use cachehash::cache::CacheHash;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = CacheHash::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key
    /// already existed.
    ///
    /// An existing key is updated in place and promoted to most recently
    /// used. A new key may first evict the least recently used entry if
    /// the cache is at capacity; the eviction callback, if registered,
    /// fires for that evicted entry.
    ///
    /// # Example
    ///
    /// ```
    /// use cachehash::traits::CoreCache;
    /// use cachehash::cache::CacheHash;
    ///
    /// let mut cache = CacheHash::new(10);
    ///
    /// // New key returns None
    /// assert_eq!(cache.insert(1, "first"), None);
    ///
    /// // Existing key returns the previous value
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key, promoting it to most recently
    /// used.
    ///
    /// Any successful read counts as use. Use [`contains`](Self::contains)
    /// or a non-promoting lookup if the access should not affect eviction
    /// order.
    ///
    /// # Example
    ///
    /// ```
    /// use cachehash::traits::CoreCache;
    /// use cachehash::cache::CacheHash;
    ///
    /// let mut cache = CacheHash::new(10);
    /// cache.insert(1, "value");
    ///
    /// assert_eq!(cache.get(&1), Some(&"value"));
    /// assert_eq!(cache.get(&99), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating recency order.
    ///
    /// # Example
    ///
    /// ```
    /// use cachehash::traits::CoreCache;
    /// use cachehash::cache::CacheHash;
    ///
    /// let mut cache = CacheHash::new(10);
    /// cache.insert(1, "value");
    ///
    /// assert!(cache.contains(&1));
    /// assert!(!cache.contains(&99));
    /// ```
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    fn capacity(&self) -> usize;

    /// Removes all entries. Does not invoke the eviction callback.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use cachehash::traits::{CoreCache, MutableCache};
/// use cachehash::cache::CacheHash;
///
/// fn invalidate_keys<C: MutableCache<u64, &'static str>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = CacheHash::new(100);
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// cache.insert(3, "three");
///
/// invalidate_keys(&mut cache, &[1, 3]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// assert!(!cache.contains(&3));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair, returning the value if the key
    /// existed.
    ///
    /// Explicit deletion is not eviction: the eviction callback is never
    /// invoked from this path.
    ///
    /// # Example
    ///
    /// ```
    /// use cachehash::traits::{CoreCache, MutableCache};
    /// use cachehash::cache::CacheHash;
    ///
    /// let mut cache = CacheHash::new(10);
    /// cache.insert(1, "value");
    ///
    /// assert_eq!(cache.remove(&1), Some("value"));
    /// assert_eq!(cache.remove(&1), None);
    /// ```
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys, returning the removed values in input order.
    ///
    /// The default implementation loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// Recency-specific operations: eviction of and access to the ends of the
/// recency order.
///
/// # Example
///
/// ```
/// use cachehash::traits::{CoreCache, LruCacheTrait};
/// use cachehash::cache::CacheHash;
///
/// let mut cache = CacheHash::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// // Access key 1 to make it MRU
/// cache.get(&1);
///
/// // Key 2 is now LRU
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// // Touch without retrieving the value
/// assert!(cache.touch(&2));
///
/// // Key 3 is LRU now; pop it
/// let (key, _) = cache.pop_lru().unwrap();
/// assert_eq!(key, 3);
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry, invoking the
    /// eviction callback if one is registered.
    ///
    /// Returns `None` (and fires no callback) if the cache is empty. This
    /// is the same primitive the `insert` overflow path uses, so manual
    /// and automatic eviction have identical semantics.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without removing or
    /// promoting it. `None` on an empty cache.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Returns the most recently used entry without removing or
    /// promoting it. `None` on an empty cache.
    fn peek_mru(&self) -> Option<(&K, &V)>;

    /// Promotes a key to most recently used without reading its value.
    ///
    /// Returns `false` if the key is not present.
    fn touch(&mut self, key: &K) -> bool;
}
