//! 4-to-1 data selector.

use std::marker::PhantomData;

use crate::Combinational;

/// Select line of the 4-way selector (2-bit bus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Select {
    X0 = 0,
    X1 = 1,
    X2 = 2,
    X3 = 3,
}

impl Select {
    /// Select lines in encoding order.
    pub const ALL: [Self; 4] = [Self::X0, Self::X1, Self::X2, Self::X3];

    /// Decodes a 2-bit select field.
    #[must_use]
    pub const fn from_u2(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::X0),
            1 => Some(Self::X1),
            2 => Some(Self::X2),
            3 => Some(Self::X3),
            _ => None,
        }
    }

    /// Index of the selected input (`0..=3`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Data inputs and select line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MuxInputs<W> {
    /// Data inputs `X0..X3`.
    pub inputs: [W; 4],
    /// Select line `Y`.
    pub select: Select,
}

/// 4-to-1 selector over any copyable bus type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mux4<W> {
    _bus: PhantomData<W>,
}

impl<W: Copy> Mux4<W> {
    /// Creates the selector.
    #[must_use]
    pub const fn new() -> Self {
        Self { _bus: PhantomData }
    }

    /// Returns `inputs[select]`.
    #[must_use]
    pub const fn select(inputs: &[W; 4], select: Select) -> W {
        inputs[select.index()]
    }
}

impl<W: Copy> Combinational for Mux4<W> {
    type Inputs = MuxInputs<W>;
    type Outputs = W;

    fn evaluate(&self, inputs: &MuxInputs<W>) -> W {
        Self::select(&inputs.inputs, inputs.select)
    }
}

#[cfg(test)]
mod tests {
    use super::{Mux4, MuxInputs, Select};
    use crate::{Combinational, Sensitive};

    #[test]
    fn select_decode_matches_encoding() {
        for (bits, line) in (0_u8..).zip(Select::ALL) {
            assert_eq!(Select::from_u2(bits), Some(line));
            assert_eq!(line.index(), usize::from(bits));
        }
        assert_eq!(Select::from_u2(4), None);
    }

    #[test]
    fn each_select_line_routes_its_input() {
        let inputs = [0_u8, 1, 2, 3];
        for line in Select::ALL {
            assert_eq!(usize::from(Mux4::select(&inputs, line)), line.index());
        }
    }

    #[test]
    fn sensitive_selector_follows_select_changes() {
        let mut mux = Sensitive::new(Mux4::<u16>::new());
        let mut inputs = MuxInputs {
            inputs: [0xA0, 0xB1, 0xC2, 0xD3],
            select: Select::X2,
        };

        assert_eq!(*mux.drive(inputs), 0xC2);
        inputs.select = Select::X0;
        assert_eq!(*mux.drive(inputs), 0xA0);
        assert_eq!(*mux.drive(inputs), 0xA0);
        assert_eq!(mux.evaluations(), 2);
        assert_eq!(mux.block().evaluate(&inputs), 0xA0);
    }
}
