//! Cycle-level models of small digital logic blocks: a bounded FIFO core,
//! a 4-bit ALU, a 4-to-1 selector and register/RAM storage.

/// Error taxonomy for construction and memory-image parsing.
pub mod error;
pub use error::{ConfigError, ImageError};

/// Block configuration with validated defaults.
pub mod config;
pub use config::{FifoConfig, DEFAULT_FIFO_DEPTH};

/// Deterministic trace hooks and provided sinks.
pub mod trace;
pub use trace::{FifoEvent, MemoryEvent, NullSink, RecordingSink, TraceSink};

/// Clocking seam: synchronous and combinational block traits.
pub mod clock;
pub use clock::{ClockDomain, Combinational, Sensitive, Synchronous};

/// Bounded FIFO core and its circular store.
pub mod fifo;
pub use fifo::{
    step, Admission, BoundedStore, EdgeOutcome, Fifo, FifoFlags, FifoInputs, FifoOutputs,
};

/// 4-bit signed ALU.
pub mod alu;
pub use alu::{Alu4, AluInputs, AluOp, AluOutputs, Int4};

/// 4-to-1 selector.
pub mod mux;
pub use mux::{Mux4, MuxInputs, Select};

/// Register file, RAM and memory-image loading.
pub mod memory;
pub use memory::{
    parse_memory_image, CellArray, ImageEntry, Ram, RamInputs, RegisterFile, RegisterFileInputs,
    DEFAULT_CELL_COUNT,
};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
