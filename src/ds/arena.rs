//! Slot arena providing stable handles for recency-list nodes.
//!
//! Entries live in a `Vec<Option<T>>`; freed slots are recycled through a
//! free list, so a `Handle` handed out for a live entry stays valid until
//! that entry is removed. This keeps ownership simple and avoids the
//! cyclic-reference hazards of an interlinked pointer list.

/// Stable index of one entry in an [`EntryArena`].
///
/// A `Handle` is only meaningful for the arena that produced it, and only
/// while the entry it names is still live. Slot reuse means a stale handle
/// may address a different, newer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub(crate) usize);

impl Handle {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena of entries addressed by stable [`Handle`]s.
///
/// O(1) insert, remove, and lookup. Removed slots are pushed onto a free
/// list and reused by later inserts.
#[derive(Debug)]
pub struct EntryArena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> EntryArena<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty arena with space reserved for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Stores `value` and returns its handle, reusing a free slot if one
    /// is available.
    pub fn insert(&mut self, value: T) -> Handle {
        let idx = match self.free_list.pop() {
            Some(idx) => {
                self.slots[idx] = Some(value);
                idx
            }
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            }
        };
        self.len += 1;
        Handle(idx)
    }

    /// Removes and returns the entry at `handle`, freeing its slot.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let slot = self.slots.get_mut(handle.0)?;
        let value = slot.take()?;
        self.free_list.push(handle.0);
        self.len -= 1;
        Some(value)
    }

    /// Returns the entry at `handle`, if live.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots.get(handle.0).and_then(|slot| slot.as_ref())
    }

    /// Returns the entry at `handle` mutably, if live.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots.get_mut(handle.0).and_then(|slot| slot.as_mut())
    }

    /// Returns `true` if `handle` names a live entry.
    pub fn contains(&self, handle: Handle) -> bool {
        self.slots
            .get(handle.0)
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops all entries and frees all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }

    /// Iterates live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (Handle(idx), value)))
    }
}

impl<T> Default for EntryArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
