//! Fixed-size cell array with a masked address bus.

use crate::memory::{ImageEntry, DEFAULT_CELL_COUNT};
use crate::trace::{MemoryEvent, TraceSink};

/// `N` eight-bit cells addressed through a `log2(N)`-bit bus.
///
/// `N` must be a power of two; instantiating any other size fails at
/// compile time. Addresses wider than the bus are masked, matching a
/// hardware port that only wires the low address lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellArray<const N: usize = DEFAULT_CELL_COUNT> {
    cells: [u8; N],
}

impl<const N: usize> CellArray<N> {
    /// Mask applied to every address.
    pub const ADDR_MASK: usize = {
        assert!(N.is_power_of_two(), "cell count must be a power of two");
        N - 1
    };

    /// Creates an array with every cell cleared.
    #[must_use]
    pub const fn new() -> Self {
        let _ = Self::ADDR_MASK;
        Self { cells: [0; N] }
    }

    /// Number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; the array has at least one cell.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Width of the address bus in bits.
    #[must_use]
    pub const fn addr_bits(&self) -> u32 {
        self.cells.len().trailing_zeros()
    }

    /// Reduces `addr` to the bus width.
    #[must_use]
    pub const fn mask(addr: usize) -> usize {
        addr & Self::ADDR_MASK
    }

    /// Reads the cell at the masked address.
    #[must_use]
    pub const fn get(&self, addr: usize) -> u8 {
        self.cells[Self::mask(addr)]
    }

    /// Writes the cell at the masked address and returns the cell index used.
    pub fn set(&mut self, addr: usize, value: u8) -> usize {
        let index = Self::mask(addr);
        self.cells[index] = value;
        index
    }

    /// Snapshot of all cells in address order.
    #[must_use]
    pub const fn as_array(&self) -> &[u8; N] {
        &self.cells
    }

    /// Stores every entry whose address lies in `[0, N)`; values keep
    /// their low byte. Returns the number of cells written.
    pub fn load<S>(&mut self, entries: &[ImageEntry], sink: &mut S) -> usize
    where
        S: TraceSink<MemoryEvent> + ?Sized,
    {
        let mut written = 0;
        for entry in entries.iter().filter(|entry| entry.addr < N) {
            let value = entry.byte();
            self.cells[entry.addr] = value;
            sink.on_event(MemoryEvent::Loaded {
                addr: entry.addr,
                value,
            });
            written += 1;
        }
        written
    }
}

impl<const N: usize> Default for CellArray<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::CellArray;
    use crate::memory::ImageEntry;
    use crate::trace::{MemoryEvent, NullSink, RecordingSink};

    #[test]
    fn new_array_is_cleared() {
        let cells: CellArray = CellArray::new();

        assert_eq!(cells.len(), 16);
        assert_eq!(cells.addr_bits(), 4);
        assert!(cells.as_array().iter().all(|&cell| cell == 0));
    }

    #[test]
    fn addresses_are_masked_to_bus_width() {
        let mut cells = CellArray::<8>::new();

        assert_eq!(cells.set(0x0B, 0x5A), 3);
        assert_eq!(cells.get(3), 0x5A);
        assert_eq!(cells.get(0x13), 0x5A);
        assert_eq!(CellArray::<8>::mask(9), 1);
    }

    #[test]
    fn load_skips_out_of_range_and_truncates() {
        let mut cells: CellArray = CellArray::new();
        let mut sink = RecordingSink::new();
        let entries = [
            ImageEntry::new(0, 0x11),
            ImageEntry::new(16, 0x22),
            ImageEntry::new(15, 0x1FF),
        ];

        let written = cells.load(&entries, &mut sink);

        assert_eq!(written, 2);
        assert_eq!(cells.get(0), 0x11);
        assert_eq!(cells.get(15), 0xFF);
        assert_eq!(
            sink.events(),
            &[
                MemoryEvent::Loaded {
                    addr: 0,
                    value: 0x11
                },
                MemoryEvent::Loaded {
                    addr: 15,
                    value: 0xFF
                },
            ]
        );
    }

    #[test]
    fn later_entries_overwrite_earlier_ones() {
        let mut cells = CellArray::<4>::new();
        let entries = [ImageEntry::new(2, 1), ImageEntry::new(2, 9)];

        assert_eq!(cells.load(&entries, &mut NullSink), 2);
        assert_eq!(cells.get(2), 9);
    }
}
