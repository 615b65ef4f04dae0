//! Single-port RAM with read-before-write semantics.

use crate::memory::{CellArray, ImageEntry, DEFAULT_CELL_COUNT};
use crate::trace::{MemoryEvent, NullSink, TraceSink};
use crate::Synchronous;

/// Port signals sampled at a RAM clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RamInputs {
    /// Shared read/write address.
    pub addr: usize,
    /// Data stored when `wr_en` is asserted.
    pub wr_data: u8,
    /// Write enable.
    pub wr_en: bool,
}

impl RamInputs {
    /// Write `value` to `addr`.
    #[must_use]
    pub const fn write(addr: usize, value: u8) -> Self {
        Self {
            addr,
            wr_data: value,
            wr_en: true,
        }
    }

    /// Read `addr` with writes disabled.
    #[must_use]
    pub const fn read(addr: usize) -> Self {
        Self {
            addr,
            wr_data: 0,
            wr_en: false,
        }
    }
}

/// `N` eight-bit cells behind one address bus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Ram<const N: usize = DEFAULT_CELL_COUNT> {
    cells: CellArray<N>,
}

impl<const N: usize> Ram<N> {
    /// Creates a RAM with every cell cleared.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: CellArray::new(),
        }
    }

    /// Current contents of cell `addr` (masked to the bus width).
    #[must_use]
    pub const fn read(&self, addr: usize) -> u8 {
        self.cells.get(addr)
    }

    /// Underlying cells.
    #[must_use]
    pub const fn cells(&self) -> &CellArray<N> {
        &self.cells
    }

    /// Bulk-initialises cells before simulation; see [`CellArray::load`].
    pub fn load(&mut self, entries: &[ImageEntry]) -> usize {
        self.cells.load(entries, &mut NullSink)
    }

    /// Like [`Self::load`], reporting each initialised cell.
    pub fn load_traced<S>(&mut self, entries: &[ImageEntry], sink: &mut S) -> usize
    where
        S: TraceSink<MemoryEvent> + ?Sized,
    {
        self.cells.load(entries, sink)
    }

    /// Applies one rising edge and reports any write to `sink`.
    ///
    /// Returns `rd_data` as sampled at the edge: on a writing edge that is
    /// the cell's previous contents.
    pub fn clock_edge_traced<S>(&mut self, inputs: &RamInputs, sink: &mut S) -> u8
    where
        S: TraceSink<MemoryEvent> + ?Sized,
    {
        let rd_data = self.read(inputs.addr);
        if inputs.wr_en {
            let addr = self.cells.set(inputs.addr, inputs.wr_data);
            sink.on_event(MemoryEvent::Write {
                addr,
                value: inputs.wr_data,
            });
        }
        rd_data
    }
}

impl<const N: usize> Synchronous for Ram<N> {
    type Inputs = RamInputs;
    type Outputs = u8;

    fn posedge(&mut self, inputs: &RamInputs) -> u8 {
        self.clock_edge_traced(inputs, &mut NullSink)
    }
}
