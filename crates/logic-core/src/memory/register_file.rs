//! Register file with independent read and write ports.

use crate::memory::{CellArray, ImageEntry, DEFAULT_CELL_COUNT};
use crate::trace::{MemoryEvent, NullSink, TraceSink};
use crate::Synchronous;

/// Port signals sampled at a register-file clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFileInputs {
    /// Read address; drives `rd_data` combinationally.
    pub rd_addr: usize,
    /// Write address.
    pub wr_addr: usize,
    /// Data stored when `wr_en` is asserted.
    pub wr_data: u8,
    /// Write enable.
    pub wr_en: bool,
}

impl RegisterFileInputs {
    /// Write `value` to `addr`, reading the same cell.
    #[must_use]
    pub const fn write(addr: usize, value: u8) -> Self {
        Self {
            rd_addr: addr,
            wr_addr: addr,
            wr_data: value,
            wr_en: true,
        }
    }

    /// Read `addr` with the write port idle.
    #[must_use]
    pub const fn read(addr: usize) -> Self {
        Self {
            rd_addr: addr,
            wr_addr: 0,
            wr_data: 0,
            wr_en: false,
        }
    }
}

/// `N` eight-bit registers; combinational read, edge-triggered write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RegisterFile<const N: usize = DEFAULT_CELL_COUNT> {
    cells: CellArray<N>,
}

impl<const N: usize> RegisterFile<N> {
    /// Creates a register file with every register cleared.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: CellArray::new(),
        }
    }

    /// Current contents of register `addr` (masked to the bus width).
    #[must_use]
    pub const fn read(&self, addr: usize) -> u8 {
        self.cells.get(addr)
    }

    /// Underlying cells.
    #[must_use]
    pub const fn cells(&self) -> &CellArray<N> {
        &self.cells
    }

    /// Bulk-initialises registers before simulation; see [`CellArray::load`].
    pub fn load(&mut self, entries: &[ImageEntry]) -> usize {
        self.cells.load(entries, &mut NullSink)
    }

    /// Like [`Self::load`], reporting each initialised register.
    pub fn load_traced<S>(&mut self, entries: &[ImageEntry], sink: &mut S) -> usize
    where
        S: TraceSink<MemoryEvent> + ?Sized,
    {
        self.cells.load(entries, sink)
    }

    /// Applies one rising edge and reports any write to `sink`.
    ///
    /// Returns the read port after the edge, so a write to `rd_addr` is
    /// visible immediately.
    pub fn clock_edge_traced<S>(&mut self, inputs: &RegisterFileInputs, sink: &mut S) -> u8
    where
        S: TraceSink<MemoryEvent> + ?Sized,
    {
        if inputs.wr_en {
            let addr = self.cells.set(inputs.wr_addr, inputs.wr_data);
            sink.on_event(MemoryEvent::Write {
                addr,
                value: inputs.wr_data,
            });
        }
        self.read(inputs.rd_addr)
    }
}

impl<const N: usize> Synchronous for RegisterFile<N> {
    type Inputs = RegisterFileInputs;
    type Outputs = u8;

    fn posedge(&mut self, inputs: &RegisterFileInputs) -> u8 {
        self.clock_edge_traced(inputs, &mut NullSink)
    }
}
