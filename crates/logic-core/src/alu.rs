//! 4-bit signed two's-complement arithmetic/logic unit.
//!
//! Purely combinational: outputs are recomputed from `(a, b, op)` and the
//! block holds no state.

use crate::Combinational;

/// Mask selecting the four data bits of a nibble.
const NIBBLE_MASK: u8 = 0x0F;
/// Sign bit of a 4-bit value.
const NIBBLE_SIGN: u8 = 0x08;

/// A 4-bit two's-complement value in `-8..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Int4(i8);

impl Int4 {
    /// Smallest representable value.
    pub const MIN: Self = Self(-8);
    /// Largest representable value.
    pub const MAX: Self = Self(7);
    /// Zero.
    pub const ZERO: Self = Self(0);
    /// One.
    pub const ONE: Self = Self(1);

    /// Returns the value when it fits in four bits.
    #[must_use]
    pub const fn new(value: i8) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Keeps the low four bits of `value`, reinterpreted as two's complement.
    #[must_use]
    pub const fn wrapping(value: i16) -> Self {
        Self::from_bits(value.to_le_bytes()[0])
    }

    /// Decodes the low four bits of `bits` as a two's-complement nibble.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        let bits = bits & NIBBLE_MASK;
        let extended = if bits & NIBBLE_SIGN == 0 {
            bits
        } else {
            bits | !NIBBLE_MASK
        };
        Self(i8::from_le_bytes([extended]))
    }

    /// Raw 4-bit pattern in the low nibble.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0.to_le_bytes()[0] & NIBBLE_MASK
    }

    /// Signed value.
    #[must_use]
    pub const fn get(self) -> i8 {
        self.0
    }

    /// Returns `true` when the sign bit is set.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Iterates over all sixteen values in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN.0..=Self::MAX.0).map(Self)
    }
}

impl From<Int4> for i8 {
    fn from(value: Int4) -> Self {
        value.0
    }
}

impl From<Int4> for i16 {
    fn from(value: Int4) -> Self {
        Self::from(value.0)
    }
}

/// ALU operation selected by the 3-bit opcode bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum AluOp {
    /// `a + b`.
    Add = 0,
    /// `a - b`.
    Sub = 1,
    /// `!a`.
    Not = 2,
    /// `a & b`.
    And = 3,
    /// `a | b`.
    Or = 4,
    /// `a ^ b`.
    Xor = 5,
    /// `1` when `a < b` (signed), else `0`.
    Lt = 6,
    /// `1` when `a == b`, else `0`.
    Eq = 7,
}

impl AluOp {
    /// All opcodes in encoding order.
    pub const ALL: [Self; 8] = [
        Self::Add,
        Self::Sub,
        Self::Not,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Lt,
        Self::Eq,
    ];

    /// Decodes a 3-bit opcode field.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Add),
            1 => Some(Self::Sub),
            2 => Some(Self::Not),
            3 => Some(Self::And),
            4 => Some(Self::Or),
            5 => Some(Self::Xor),
            6 => Some(Self::Lt),
            7 => Some(Self::Eq),
            _ => None,
        }
    }

    /// Encodes the opcode as its 3-bit field value.
    #[must_use]
    pub const fn as_u3(self) -> u8 {
        self as u8
    }

    /// Whether the operation drives the carry and overflow flags.
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }
}

/// Operand and opcode buses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct AluInputs {
    /// Operand `A`.
    pub a: Int4,
    /// Operand `B`.
    pub b: Int4,
    /// Operation select.
    pub op: AluOp,
}

/// Result bus and status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct AluOutputs {
    /// Truncated 4-bit result.
    pub result: Int4,
    /// `result == 0`.
    pub zero: bool,
    /// Signed overflow; only driven by `Add`/`Sub`.
    pub overflow: bool,
    /// Signed carry out of the 4-bit range: set when operands of matching
    /// effective sign produce a result above `7` or below `-8`. Only driven
    /// by `Add`/`Sub`.
    pub carry: bool,
}

/// The 4-bit ALU block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Alu4;

impl Alu4 {
    /// Computes the outputs for one operand/opcode combination.
    #[must_use]
    pub fn compute(a: Int4, b: Int4, op: AluOp) -> AluOutputs {
        let (result, carry, overflow) = match op {
            AluOp::Add => {
                let wide = i16::from(a) + i16::from(b);
                let carry = signed_carry(a.is_negative(), b.is_negative(), wide);
                (Int4::wrapping(wide), carry, widened_overflow(wide))
            }
            AluOp::Sub => {
                let wide = i16::from(a) - i16::from(b);
                // Subtracting a non-negative operand adds a negative one.
                let carry = signed_carry(a.is_negative(), !b.is_negative(), wide);
                (Int4::wrapping(wide), carry, widened_overflow(wide))
            }
            AluOp::Not => (Int4::from_bits(!a.bits()), false, false),
            AluOp::And => (Int4::from_bits(a.bits() & b.bits()), false, false),
            AluOp::Or => (Int4::from_bits(a.bits() | b.bits()), false, false),
            AluOp::Xor => (Int4::from_bits(a.bits() ^ b.bits()), false, false),
            AluOp::Lt => (predicate(a < b), false, false),
            AluOp::Eq => (predicate(a == b), false, false),
        };

        AluOutputs {
            result,
            zero: result == Int4::ZERO,
            overflow,
            carry,
        }
    }
}

impl Combinational for Alu4 {
    type Inputs = AluInputs;
    type Outputs = AluOutputs;

    fn evaluate(&self, inputs: &AluInputs) -> AluOutputs {
        Self::compute(inputs.a, inputs.b, inputs.op)
    }
}

/// Overflow check on a 5-bit widened result: the sign of the widened value
/// must match the sign of its 4-bit truncation.
fn widened_overflow(wide: i16) -> bool {
    let five_bit_negative = wide.to_le_bytes()[0] & 0x10 != 0;
    five_bit_negative != Int4::wrapping(wide).is_negative()
}

/// Carry out of a signed 4-bit sum whose addends have the given signs.
fn signed_carry(lhs_negative: bool, rhs_negative: bool, wide: i16) -> bool {
    match (lhs_negative, rhs_negative) {
        (false, false) => wide > i16::from(Int4::MAX),
        (true, true) => wide < i16::from(Int4::MIN),
        _ => false,
    }
}

const fn predicate(condition: bool) -> Int4 {
    if condition {
        Int4::ONE
    } else {
        Int4::ZERO
    }
}
