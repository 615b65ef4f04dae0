//! Independent FIFO reference model.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use logic_core::{Admission, EdgeOutcome, Fifo, FifoFlags, FifoInputs};

/// Queue-backed model of the FIFO's observable behaviour.
///
/// Shares no storage code with the core: it keeps a growable queue and
/// enforces the capacity bound itself. Admission follows the same rule as
/// the core, judged on occupancy at the start of the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceFifo<T> {
    items: VecDeque<T>,
    capacity: usize,
    data_out: T,
}

impl<T: Clone + Default> ReferenceFifo<T> {
    /// Creates an empty model with `capacity` slots.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.get()),
            capacity: capacity.get(),
            data_out: T::default(),
        }
    }

    /// Creates a model mirroring the current state of `fifo`.
    #[must_use]
    pub fn mirror(fifo: &Fifo<T>) -> Self {
        Self {
            items: fifo.contents().cloned().collect(),
            capacity: fifo.capacity(),
            data_out: fifo.data_out().clone(),
        }
    }

    /// Applies one edge and reports what the core is expected to do.
    pub fn apply(&mut self, inputs: &FifoInputs<T>) -> EdgeOutcome {
        if !inputs.reset_n {
            self.items.clear();
            self.data_out = T::default();
            return EdgeOutcome {
                reset: true,
                ..EdgeOutcome::default()
            };
        }

        let starts_empty = self.items.is_empty();
        let starts_full = self.items.len() >= self.capacity;

        let read = match (inputs.read_en, starts_empty) {
            (false, _) => Admission::Idle,
            (true, true) => Admission::Dropped,
            (true, false) => {
                if let Some(front) = self.items.pop_front() {
                    self.data_out = front;
                }
                Admission::Accepted
            }
        };

        let write = match (inputs.write_en, starts_full) {
            (false, _) => Admission::Idle,
            (true, true) => Admission::Dropped,
            (true, false) => {
                self.items.push_back(inputs.data_in.clone());
                Admission::Accepted
            }
        };

        EdgeOutcome {
            reset: false,
            read,
            write,
        }
    }
}

impl<T> ReferenceFifo<T> {
    /// Expected `data_out`.
    #[must_use]
    pub const fn data_out(&self) -> &T {
        &self.data_out
    }

    /// Expected occupancy.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Expected `empty` flag.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Expected `full` flag.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    /// Slot count.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Expected flag bundle.
    #[must_use]
    pub fn flags(&self) -> FifoFlags {
        FifoFlags {
            empty: self.is_empty(),
            full: self.is_full(),
            size: self.len(),
        }
    }

    /// Expected contents in dequeue order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }
}
