//! Addressable storage: the register file, the RAM and the memory-image
//! loader they share.
//!
//! Both blocks hold `N` eight-bit cells behind a `log2(N)`-bit address bus.
//! Reads are combinational; writes land on the clock edge.

pub mod cells;
pub mod image;
pub mod ram;
pub mod register_file;

pub use cells::CellArray;
pub use image::{parse_memory_image, ImageEntry};
pub use ram::{Ram, RamInputs};
pub use register_file::{RegisterFile, RegisterFileInputs};

/// Cell count used by both storage blocks unless overridden.
pub const DEFAULT_CELL_COUNT: usize = 16;
