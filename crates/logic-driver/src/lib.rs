//! Stimulus driver for the `logic-core` blocks.
//!
//! Scripted plans drive the FIFO core edge by edge and compare it with an
//! independent reference model; sweeps cover the ALU, the selector and the
//! storage blocks exhaustively.

/// Driver failure taxonomy.
pub mod error;
pub use error::{DriverError, Signal};

/// Queue-backed FIFO reference model.
pub mod reference;
pub use reference::ReferenceFifo;

/// Labelled stimulus phases and plan builders.
pub mod stimulus;
pub use stimulus::{Phase, StimulusPlan};

/// Plan execution against the reference model.
pub mod runner;
pub use runner::{run_block, run_configured, run_plan, run_plan_traced, RunReport};

/// Exhaustive combinational and storage checks.
pub mod sweep;
pub use sweep::{check_memory_roundtrip, sweep_alu, sweep_selector, MemoryReport};

#[cfg(test)]
use proptest as _;
