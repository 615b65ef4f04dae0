//! Fixed-capacity circular element store.

use std::num::NonZeroUsize;

/// Ordered element storage with a capacity fixed at construction.
///
/// Slots form a ring: `head` indexes the oldest element and the next free
/// slot sits `len` positions after it. The length can never exceed the slot
/// count, so the capacity bound holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedStore<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    len: usize,
}

impl<T> BoundedStore<T> {
    /// Creates an empty store with `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        let slots = std::iter::repeat_with(|| None)
            .take(capacity.get())
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            slots,
            head: 0,
            len: 0,
        }
    }

    /// Number of stored elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Maximum number of elements.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots still available for writes.
    #[must_use]
    pub fn free_slots(&self) -> usize {
        self.capacity() - self.len
    }

    /// Returns `true` when no element is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` when every slot is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Appends `value` at the back.
    ///
    /// # Errors
    ///
    /// Returns the rejected value unchanged when the store is full.
    pub fn push_back(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        let tail = self.slot_index(self.len);
        self.slots[tail] = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the front element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.head].take();
        self.head = self.slot_index(1);
        self.len -= 1;
        value
    }

    /// Returns the front element without removing it.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            self.slots[self.head].as_ref()
        }
    }

    /// Drops every element and rewinds the ring.
    pub fn clear(&mut self) {
        for slot in &mut *self.slots {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }

    /// Iterates over stored elements in dequeue order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |offset| self.slots[self.slot_index(offset)].as_ref())
    }

    fn slot_index(&self, offset: usize) -> usize {
        (self.head + offset) % self.slots.len()
    }
}
