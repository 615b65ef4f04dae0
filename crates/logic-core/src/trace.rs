//! Deterministic trace hooks.
//!
//! Blocks report what happened at each clock edge through a [`TraceSink`]
//! when tracing is enabled. Dispatch is synchronous and happens in the same
//! order as the state changes it describes.

/// Events emitted by the FIFO core, one or more per clock edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FifoEvent<T> {
    /// Reset was sampled asserted; the store and flags were cleared.
    Reset {
        /// Edge index at which the event happened.
        cycle: u64,
    },
    /// An element was dequeued and latched onto `data_out`.
    Read {
        /// Edge index at which the event happened.
        cycle: u64,
        /// The dequeued element.
        value: T,
        /// Occupancy right after the dequeue.
        size: usize,
    },
    /// An element was enqueued.
    Write {
        /// Edge index at which the event happened.
        cycle: u64,
        /// The enqueued element.
        value: T,
        /// Occupancy right after the enqueue.
        size: usize,
    },
    /// A read was requested while the store was empty at the start of the edge.
    ReadDropped {
        /// Edge index at which the event happened.
        cycle: u64,
    },
    /// A write was requested while the store was full at the start of the edge.
    WriteDropped {
        /// Edge index at which the event happened.
        cycle: u64,
    },
}

impl<T> FifoEvent<T> {
    /// Returns the edge index carried by the event.
    #[must_use]
    pub const fn cycle(&self) -> u64 {
        match self {
            Self::Reset { cycle }
            | Self::Read { cycle, .. }
            | Self::Write { cycle, .. }
            | Self::ReadDropped { cycle }
            | Self::WriteDropped { cycle } => *cycle,
        }
    }
}

/// Events emitted by the addressable storage blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryEvent {
    /// A cell was written at a clock edge.
    Write {
        /// Cell address.
        addr: usize,
        /// Value stored.
        value: u8,
    },
    /// A cell was initialised by a bulk load.
    Loaded {
        /// Cell address.
        addr: usize,
        /// Value stored.
        value: u8,
    },
}

/// Sink trait for deterministic trace hooks.
pub trait TraceSink<E> {
    /// Records an event in execution order.
    fn on_event(&mut self, event: E);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl<E> TraceSink<E> for NullSink {
    fn on_event(&mut self, _event: E) {}
}

/// Sink that keeps every event in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingSink<E> {
    events: Vec<E>,
}

impl<E> Default for RecordingSink<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E> RecordingSink<E> {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events in arrival order.
    #[must_use]
    pub fn events(&self) -> &[E] {
        &self.events
    }

    /// Drains the recorded events, leaving the sink empty.
    pub fn take(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }
}

impl<E> TraceSink<E> for RecordingSink<E> {
    fn on_event(&mut self, event: E) {
        self.events.push(event);
    }
}
