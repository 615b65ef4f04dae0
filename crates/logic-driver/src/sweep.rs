//! Exhaustive checks for the combinational and storage collaborators.

use logic_core::{
    Alu4, AluInputs, AluOp, AluOutputs, ClockDomain, Combinational, Int4, Mux4, MuxInputs, Ram,
    RamInputs, RegisterFile, RegisterFileInputs, Select, Sensitive,
};

use crate::error::DriverError;

/// Expected ALU outputs computed in wide integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WideAlu {
    result: i32,
    overflow: bool,
    carry: bool,
}

impl WideAlu {
    fn evaluate(a: i32, b: i32, op: AluOp) -> Self {
        let (wide, carry, arithmetic) = match op {
            AluOp::Add => {
                let sum = a + b;
                let carry = (a >= 0 && b >= 0 && sum >= 8) || (a < 0 && b < 0 && sum < -8);
                (sum, carry, true)
            }
            AluOp::Sub => {
                let diff = a - b;
                let carry = (a >= 0 && b < 0 && diff >= 8) || (a < 0 && b >= 0 && diff < -8);
                (diff, carry, true)
            }
            AluOp::Not => (!a, false, false),
            AluOp::And => (a & b, false, false),
            AluOp::Or => (a | b, false, false),
            AluOp::Xor => (a ^ b, false, false),
            AluOp::Lt => (i32::from(a < b), false, false),
            AluOp::Eq => (i32::from(a == b), false, false),
        };
        Self {
            result: truncate_signed_nibble(wide),
            overflow: arithmetic && !(-8..=7).contains(&wide),
            carry,
        }
    }
}

const fn truncate_signed_nibble(value: i32) -> i32 {
    let low = value.rem_euclid(16);
    if low >= 8 {
        low - 16
    } else {
        low
    }
}

/// Compares the ALU against the wide-integer reference for every opcode
/// and operand pair. Returns the number of combinations checked.
///
/// # Errors
///
/// Returns [`DriverError::AluMismatch`] for the first diverging output.
pub fn sweep_alu() -> Result<usize, DriverError> {
    let alu = Alu4;
    let mut checked = 0;

    for op in AluOp::ALL {
        for a in Int4::all() {
            for b in Int4::all() {
                let observed = alu.evaluate(&AluInputs { a, b, op });
                let expected = WideAlu::evaluate(i32::from(a.get()), i32::from(b.get()), op);
                check_alu(op, a, b, &expected, &observed)?;
                checked += 1;
            }
        }
    }

    Ok(checked)
}

fn check_alu(
    op: AluOp,
    a: Int4,
    b: Int4,
    expected: &WideAlu,
    observed: &AluOutputs,
) -> Result<(), DriverError> {
    let fail = |output: &'static str, want: String, got: String| DriverError::AluMismatch {
        op,
        a: a.get(),
        b: b.get(),
        output,
        expected: want,
        actual: got,
    };
    let result = i32::from(observed.result.get());

    if result != expected.result {
        return Err(fail("result", expected.result.to_string(), result.to_string()));
    }
    if observed.zero != (expected.result == 0) {
        return Err(fail(
            "zero",
            (expected.result == 0).to_string(),
            observed.zero.to_string(),
        ));
    }
    if observed.overflow != expected.overflow {
        return Err(fail(
            "overflow",
            expected.overflow.to_string(),
            observed.overflow.to_string(),
        ));
    }
    if observed.carry != expected.carry {
        return Err(fail(
            "carry",
            expected.carry.to_string(),
            observed.carry.to_string(),
        ));
    }
    Ok(())
}

/// Drives every select line of an 8-bit selector over four rotations of
/// distinct inputs. Returns the number of selections checked.
///
/// # Errors
///
/// Returns [`DriverError::SelectorMismatch`] when the output does not
/// carry the selected input.
pub fn sweep_selector() -> Result<usize, DriverError> {
    const BASE: [u8; 4] = [0xA0, 0xB1, 0xC2, 0xD3];
    let mut mux = Sensitive::new(Mux4::<u8>::new());
    let mut checked = 0;

    for rotation in 0..BASE.len() {
        let mut inputs = BASE;
        inputs.rotate_left(rotation);
        for select in Select::ALL {
            let expected = inputs[select.index()];
            let actual = *mux.drive(MuxInputs { inputs, select });
            if actual != expected {
                return Err(DriverError::SelectorMismatch {
                    select: select.index(),
                    expected,
                    actual,
                });
            }
            checked += 1;
        }
    }

    Ok(checked)
}

/// Outcome of [`check_memory_roundtrip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MemoryReport {
    /// Register cells written and read back.
    pub register_cells: usize,
    /// RAM cells written and read back.
    pub ram_cells: usize,
    /// Registers copied into the upper half of RAM, in reverse order.
    pub transfers: usize,
    /// Edges fired across both blocks.
    pub edges: u64,
}

/// Writes and reads back every cell of both blocks, then copies register
/// `i` into RAM cell `N - 1 - i` for the lower half of the register file.
///
/// Registers receive `0xA0 + i` and RAM cells `0x50 + i`, wrapping at
/// eight bits.
///
/// # Errors
///
/// Returns [`DriverError::MemoryMismatch`] for the first cell that reads
/// back a value other than the one written.
pub fn check_memory_roundtrip<const N: usize>(
    regs: &mut RegisterFile<N>,
    ram: &mut Ram<N>,
) -> Result<MemoryReport, DriverError> {
    let mut clock = ClockDomain::new();
    let mut report = MemoryReport::default();

    for addr in 0..N {
        let value = pattern(0xA0, addr);
        clock.tick(regs, &RegisterFileInputs::write(addr, value));
        expect_cell("register file", addr, value, regs.read(addr))?;
        report.register_cells += 1;
    }

    for addr in 0..N {
        let value = pattern(0x50, addr);
        clock.tick(ram, &RamInputs::write(addr, value));
        let read_back = clock.tick(ram, &RamInputs::read(addr));
        expect_cell("ram", addr, value, read_back)?;
        report.ram_cells += 1;
    }

    for addr in 0..N / 2 {
        let value = regs.read(addr);
        clock.tick(ram, &RamInputs::write(N - 1 - addr, value));
        report.transfers += 1;
    }
    for addr in 0..N / 2 {
        expect_cell("ram", N - 1 - addr, pattern(0xA0, addr), ram.read(N - 1 - addr))?;
        expect_cell("ram", addr, pattern(0x50, addr), ram.read(addr))?;
    }

    report.edges = clock.cycle();
    Ok(report)
}

const fn pattern(base: u8, addr: usize) -> u8 {
    base.wrapping_add(addr.to_le_bytes()[0])
}

const fn expect_cell(
    block: &'static str,
    addr: usize,
    expected: u8,
    actual: u8,
) -> Result<(), DriverError> {
    if expected == actual {
        Ok(())
    } else {
        Err(DriverError::MemoryMismatch {
            block,
            addr,
            expected,
            actual,
        })
    }
}
