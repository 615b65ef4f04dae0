//! Driver failure taxonomy.

use std::fmt;

use logic_core::{AluOp, ConfigError};
use thiserror::Error;

/// FIFO output signal compared against the reference model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Last dequeued element.
    DataOut,
    /// `empty` flag.
    Empty,
    /// `full` flag.
    Full,
    /// Occupancy.
    Size,
}

impl Signal {
    /// Signal name as it appears on the block boundary.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DataOut => "data_out",
            Self::Empty => "empty",
            Self::Full => "full",
            Self::Size => "size",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reasons a stimulus run or sweep stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// The FIFO disagreed with the reference model after an edge.
    #[error("edge {cycle} ({phase}): {signal} expected {expected}, observed {actual}")]
    Mismatch {
        /// Label of the stimulus phase being driven.
        phase: String,
        /// Edge index within the plan, counted from zero.
        cycle: u64,
        /// Diverging signal.
        signal: Signal,
        /// Reference value, rendered.
        expected: String,
        /// Observed value, rendered.
        actual: String,
    },
    /// The ALU disagreed with the wide-integer reference.
    #[error("alu {op:?} a={a} b={b}: {output} expected {expected}, observed {actual}")]
    AluMismatch {
        /// Operation under test.
        op: AluOp,
        /// Operand `A`.
        a: i8,
        /// Operand `B`.
        b: i8,
        /// Diverging output.
        output: &'static str,
        /// Reference value, rendered.
        expected: String,
        /// Observed value, rendered.
        actual: String,
    },
    /// The selector routed the wrong input.
    #[error("selector line {select}: expected {expected:#04x}, observed {actual:#04x}")]
    SelectorMismatch {
        /// Select line index.
        select: usize,
        /// Value on the selected input.
        expected: u8,
        /// Value on the output.
        actual: u8,
    },
    /// A storage cell held the wrong value.
    #[error("{block} cell {addr:#x}: expected {expected:#04x}, observed {actual:#04x}")]
    MemoryMismatch {
        /// `"register file"` or `"ram"`.
        block: &'static str,
        /// Cell address.
        addr: usize,
        /// Value the check wrote or expected.
        expected: u8,
        /// Value read back.
        actual: u8,
    },
    /// The block under test could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DriverError {
    /// Builds a FIFO mismatch, rendering both values with `Debug`.
    #[must_use]
    pub fn mismatch<V: fmt::Debug>(
        phase: &str,
        cycle: u64,
        signal: Signal,
        expected: &V,
        actual: &V,
    ) -> Self {
        Self::Mismatch {
            phase: phase.to_string(),
            cycle,
            signal,
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        }
    }
}
