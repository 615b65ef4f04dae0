//! Synchronous bounded FIFO core.
//!
//! One evaluation happens per rising clock edge, in this order:
//! 1. Sample `reset_n`; when asserted (low) clear everything and stop
//! 2. Snapshot the pre-edge `full` flag
//! 3. Dequeue into `data_out` if a read is requested and the store was not empty
//! 4. Enqueue `data_in` if a write is requested and the store was not full
//! 5. Recompute the flags if anything was dequeued or enqueued
//!
//! Write admission uses the flags from step 2. A write on an edge that starts
//! full is dropped even when a simultaneous read frees a slot.

/// Fixed-capacity circular element store.
pub mod store;

pub use store::BoundedStore;

use crate::trace::{FifoEvent, NullSink, TraceSink};
use crate::{ConfigError, FifoConfig, Synchronous};

/// Control and data signals sampled at a rising edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FifoInputs<T> {
    /// Active-low synchronous reset; `false` clears the FIFO.
    pub reset_n: bool,
    /// Request to enqueue `data_in`.
    pub write_en: bool,
    /// Value enqueued when the write is admitted.
    pub data_in: T,
    /// Request to dequeue the front element.
    pub read_en: bool,
}

impl<T: Default> FifoInputs<T> {
    /// No request, reset deasserted.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            reset_n: true,
            write_en: false,
            data_in: T::default(),
            read_en: false,
        }
    }

    /// Reset asserted; other signals are ignored at the edge.
    #[must_use]
    pub fn reset() -> Self {
        Self {
            reset_n: false,
            ..Self::idle()
        }
    }

    /// Read request only.
    #[must_use]
    pub fn read() -> Self {
        Self {
            read_en: true,
            ..Self::idle()
        }
    }
}

impl<T> FifoInputs<T> {
    /// Write request only.
    #[must_use]
    pub const fn write(value: T) -> Self {
        Self {
            reset_n: true,
            write_en: true,
            data_in: value,
            read_en: false,
        }
    }

    /// Simultaneous read and write requests.
    #[must_use]
    pub const fn read_write(value: T) -> Self {
        Self {
            reset_n: true,
            write_en: true,
            data_in: value,
            read_en: true,
        }
    }
}

/// Occupancy flags derived from the store length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FifoFlags {
    /// `size == 0`.
    pub empty: bool,
    /// `size == capacity`.
    pub full: bool,
    /// Current occupancy.
    pub size: usize,
}

impl FifoFlags {
    /// Flags driven after construction or reset.
    pub const CLEARED: Self = Self {
        empty: true,
        full: false,
        size: 0,
    };

    /// Derives the flags for `len` stored elements out of `capacity`.
    #[must_use]
    pub const fn derive(len: usize, capacity: usize) -> Self {
        Self {
            empty: len == 0,
            full: len == capacity,
            size: len,
        }
    }
}

impl Default for FifoFlags {
    fn default() -> Self {
        Self::CLEARED
    }
}

/// Signals driven by the FIFO after an edge has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FifoOutputs<T> {
    /// Last dequeued element; the default value after construction or reset.
    pub data_out: T,
    /// Occupancy flags.
    pub flags: FifoFlags,
}

/// How one requested operation fared at an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Admission {
    /// Not requested.
    #[default]
    Idle,
    /// Requested and applied.
    Accepted,
    /// Requested but refused by the admission test; not an error.
    Dropped,
}

/// Summary of what a single edge did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdgeOutcome {
    /// Reset was sampled asserted; read and write are then `Idle`.
    pub reset: bool,
    /// Fate of the read request.
    pub read: Admission,
    /// Fate of the write request.
    pub write: Admission,
}

impl EdgeOutcome {
    const RESET: Self = Self {
        reset: true,
        read: Admission::Idle,
        write: Admission::Idle,
    };

    /// An element was dequeued.
    #[must_use]
    pub const fn did_read(&self) -> bool {
        matches!(self.read, Admission::Accepted)
    }

    /// An element was enqueued.
    #[must_use]
    pub const fn did_write(&self) -> bool {
        matches!(self.write, Admission::Accepted)
    }

    /// The edge changed the store contents or cleared it.
    #[must_use]
    pub const fn mutated(&self) -> bool {
        self.reset || self.did_read() || self.did_write()
    }
}

/// Depth-bounded synchronous FIFO with same-edge read/write support.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fifo<T> {
    store: BoundedStore<T>,
    flags: FifoFlags,
    data_out: T,
    cycle: u64,
    tracing_enabled: bool,
}

impl<T: Clone + Default> Fifo<T> {
    /// Creates an empty FIFO with `depth` slots and tracing disabled.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDepth`] when `depth == 0`.
    pub fn new(depth: usize) -> Result<Self, ConfigError> {
        Self::with_config(&FifoConfig::with_depth(depth))
    }

    /// Creates an empty FIFO from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDepth`] when `config.depth == 0`.
    pub fn with_config(config: &FifoConfig) -> Result<Self, ConfigError> {
        let depth = config.validated_depth()?;
        Ok(Self {
            store: BoundedStore::with_capacity(depth),
            flags: FifoFlags::CLEARED,
            data_out: T::default(),
            cycle: 0,
            tracing_enabled: config.tracing_enabled,
        })
    }

    /// Evaluates one rising edge.
    pub fn clock_edge(&mut self, inputs: &FifoInputs<T>) -> EdgeOutcome {
        self.clock_edge_traced(inputs, &mut NullSink)
    }

    /// Evaluates one rising edge, reporting to `sink` when tracing is enabled.
    pub fn clock_edge_traced<S>(&mut self, inputs: &FifoInputs<T>, sink: &mut S) -> EdgeOutcome
    where
        S: TraceSink<FifoEvent<T>> + ?Sized,
    {
        let cycle = self.cycle;
        self.cycle += 1;

        if !inputs.reset_n {
            self.store.clear();
            self.flags = FifoFlags::CLEARED;
            self.data_out = T::default();
            self.emit(sink, || FifoEvent::Reset { cycle });
            return EdgeOutcome::RESET;
        }

        // The read runs first against the untouched store; the write is
        // judged on the pre-edge full flag.
        let was_full = self.flags.full;

        let read = if inputs.read_en {
            match self.store.pop_front() {
                Some(value) => {
                    let size = self.store.len();
                    self.emit(sink, || FifoEvent::Read {
                        cycle,
                        value: value.clone(),
                        size,
                    });
                    self.data_out = value;
                    Admission::Accepted
                }
                None => {
                    self.emit(sink, || FifoEvent::ReadDropped { cycle });
                    Admission::Dropped
                }
            }
        } else {
            Admission::Idle
        };

        let write = if inputs.write_en {
            if !was_full && self.store.push_back(inputs.data_in.clone()).is_ok() {
                let size = self.store.len();
                self.emit(sink, || FifoEvent::Write {
                    cycle,
                    value: inputs.data_in.clone(),
                    size,
                });
                Admission::Accepted
            } else {
                self.emit(sink, || FifoEvent::WriteDropped { cycle });
                Admission::Dropped
            }
        } else {
            Admission::Idle
        };

        let outcome = EdgeOutcome {
            reset: false,
            read,
            write,
        };
        if outcome.did_read() || outcome.did_write() {
            self.flags = FifoFlags::derive(self.store.len(), self.store.capacity());
        }
        outcome
    }

    /// Settled output signals.
    #[must_use]
    pub fn outputs(&self) -> FifoOutputs<T> {
        FifoOutputs {
            data_out: self.data_out.clone(),
            flags: self.flags,
        }
    }

    fn emit<S, F>(&self, sink: &mut S, event: F)
    where
        S: TraceSink<FifoEvent<T>> + ?Sized,
        F: FnOnce() -> FifoEvent<T>,
    {
        if self.tracing_enabled {
            sink.on_event(event());
        }
    }
}

impl<T> Fifo<T> {
    /// Last dequeued element.
    #[must_use]
    pub const fn data_out(&self) -> &T {
        &self.data_out
    }

    /// Current occupancy flags.
    #[must_use]
    pub const fn flags(&self) -> FifoFlags {
        self.flags
    }

    /// Current occupancy.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.flags.size
    }

    /// `true` when no element is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.flags.empty
    }

    /// `true` when every slot is occupied.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.flags.full
    }

    /// Configured depth.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Stored elements in dequeue order.
    pub fn contents(&self) -> impl Iterator<Item = &T> + '_ {
        self.store.iter()
    }

    /// Number of edges evaluated since construction, resets included.
    #[must_use]
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Whether trace events are dispatched.
    #[must_use]
    pub const fn tracing_enabled(&self) -> bool {
        self.tracing_enabled
    }
}

impl<T: Clone + Default> Synchronous for Fifo<T> {
    type Inputs = FifoInputs<T>;
    type Outputs = FifoOutputs<T>;

    fn posedge(&mut self, inputs: &FifoInputs<T>) -> FifoOutputs<T> {
        self.clock_edge(inputs);
        self.outputs()
    }
}

/// Pure transition function: returns the next state and its outputs,
/// leaving `state` untouched.
#[must_use]
pub fn step<T: Clone + Default>(
    state: &Fifo<T>,
    inputs: &FifoInputs<T>,
) -> (Fifo<T>, FifoOutputs<T>) {
    let mut next = state.clone();
    let outputs = next.posedge(inputs);
    (next, outputs)
}
