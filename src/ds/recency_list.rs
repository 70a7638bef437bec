//! Doubly-linked recency list backed by an [`EntryArena`].
//!
//! Nodes live in the arena and are linked by [`Handle`], which gives the
//! cache stable references to list positions: removal and move-to-front
//! are O(1) given a handle, with no re-scanning and no raw pointers.
//!
//! Orientation is fixed by convention: front = most recently used,
//! back = least recently used.
//!
//! ```text
//!   arena (EntryArena<Node<T>>)
//!   ┌────────┬────────────────────────────────────────────┐
//!   │ Handle │ Node { value, prev, next }                 │
//!   ├────────┼────────────────────────────────────────────┤
//!   │ h1     │ { value: A, prev: None,     next: Some(h2)}│
//!   │ h2     │ { value: B, prev: Some(h1), next: Some(h3)}│
//!   │ h3     │ { value: C, prev: Some(h2), next: None    }│
//!   └────────┴────────────────────────────────────────────┘
//!
//!   front ─► [h1] ◄──► [h2] ◄──► [h3] ◄── back
//!            (MRU)                (LRU)
//! ```

use crate::ds::arena::{EntryArena, Handle};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<Handle>,
    next: Option<Handle>,
}

/// Ordered sequence of entries, front = MRU, back = LRU.
///
/// All structural operations (`push_front`, `pop_back`, `remove`,
/// `move_to_front`) are O(1).
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: EntryArena<Node<T>>,
    front: Option<Handle>,
    back: Option<Handle>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: EntryArena::new(),
            front: None,
            back: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: EntryArena::with_capacity(capacity),
            front: None,
            back: None,
        }
    }

    /// Number of entries in the list.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `handle` names a live node.
    pub fn contains(&self, handle: Handle) -> bool {
        self.arena.contains(handle)
    }

    /// Value at the front (MRU), if any.
    pub fn front(&self) -> Option<&T> {
        self.front
            .and_then(|h| self.arena.get(h).map(|node| &node.value))
    }

    /// Value at the back (LRU), if any.
    pub fn back(&self) -> Option<&T> {
        self.back
            .and_then(|h| self.arena.get(h).map(|node| &node.value))
    }

    /// Handle of the front node, if any.
    pub fn front_handle(&self) -> Option<Handle> {
        self.front
    }

    /// Handle of the back node, if any.
    pub fn back_handle(&self) -> Option<Handle> {
        self.back
    }

    /// Value for `handle`, if live.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.arena.get(handle).map(|node| &node.value)
    }

    /// Mutable value for `handle`, if live.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.arena.get_mut(handle).map(|node| &mut node.value)
    }

    /// Inserts `value` at the front (MRU position) and returns its handle.
    pub fn push_front(&mut self, value: T) -> Handle {
        let handle = self.arena.insert(Node {
            value,
            prev: None,
            next: self.front,
        });
        match self.front {
            Some(old_front) => {
                if let Some(node) = self.arena.get_mut(old_front) {
                    node.prev = Some(handle);
                }
            }
            None => self.back = Some(handle),
        }
        self.front = Some(handle);
        handle
    }

    /// Removes and returns the back (LRU) value.
    pub fn pop_back(&mut self) -> Option<T> {
        let handle = self.back?;
        self.detach(handle)?;
        self.arena.remove(handle).map(|node| node.value)
    }

    /// Removes the node `handle` from the list and returns its value.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        self.detach(handle)?;
        self.arena.remove(handle).map(|node| node.value)
    }

    /// Moves the node `handle` to the front; returns `false` if it is not
    /// in the list.
    pub fn move_to_front(&mut self, handle: Handle) -> bool {
        if !self.arena.contains(handle) {
            return false;
        }
        if Some(handle) == self.front {
            return true;
        }
        self.detach(handle);
        self.attach_front(handle);
        true
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.front = None;
        self.back = None;
    }

    /// Iterates values from front (MRU) to back (LRU).
    pub fn iter(&self) -> RecencyListIter<'_, T> {
        RecencyListIter {
            list: self,
            current: self.front,
        }
    }

    /// Iterates `(Handle, &T)` pairs from front to back.
    pub fn iter_entries(&self) -> RecencyListEntryIter<'_, T> {
        RecencyListEntryIter {
            list: self,
            current: self.front,
        }
    }

    fn detach(&mut self, handle: Handle) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(handle)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_handle) => {
                if let Some(prev_node) = self.arena.get_mut(prev_handle) {
                    prev_node.next = next;
                }
            }
            None => self.front = next,
        }

        match next {
            Some(next_handle) => {
                if let Some(next_node) = self.arena.get_mut(next_handle) {
                    next_node.prev = prev;
                }
            }
            None => self.back = prev,
        }

        if let Some(node) = self.arena.get_mut(handle) {
            node.prev = None;
            node.next = None;
        }

        Some(())
    }

    fn attach_front(&mut self, handle: Handle) {
        let old_front = self.front;
        if let Some(node) = self.arena.get_mut(handle) {
            node.prev = None;
            node.next = old_front;
        } else {
            return;
        }
        match old_front {
            Some(old_front) => {
                if let Some(front_node) = self.arena.get_mut(old_front) {
                    front_node.prev = Some(handle);
                }
            }
            None => self.back = Some(handle),
        }
        self.front = Some(handle);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.front.is_none() || self.back.is_none() {
            assert!(self.front.is_none());
            assert!(self.back.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.front;
        let mut prev = None;

        while let Some(handle) = current {
            assert!(seen.insert(handle), "cycle in recency list");
            let node = self.arena.get(handle).expect("linked node missing");
            assert_eq!(node.prev, prev);
            if node.next.is_none() {
                assert_eq!(self.back, Some(handle));
            }

            prev = Some(handle);
            current = node.next;
            count += 1;
            assert!(count <= self.len());
        }

        assert_eq!(count, self.len());
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over values from front to back.
pub struct RecencyListIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<Handle>,
}

impl<'a, T> Iterator for RecencyListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.current?;
        let node = self.list.arena.get(handle)?;
        self.current = node.next;
        Some(&node.value)
    }
}

/// Iterator over `(Handle, &T)` pairs from front to back.
pub struct RecencyListEntryIter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<Handle>,
}

impl<'a, T> Iterator for RecencyListEntryIter<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.current?;
        let node = self.list.arena.get(handle)?;
        self.current = node.next;
        Some((handle, &node.value))
    }
}
