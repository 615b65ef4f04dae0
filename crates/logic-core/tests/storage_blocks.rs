//! Register file, RAM and combinational collaborators driven together.

use logic_core::{
    parse_memory_image, Alu4, AluInputs, AluOp, ClockDomain, Combinational, ImageError, Int4,
    MemoryEvent, Mux4, MuxInputs, Ram, RamInputs, RecordingSink, RegisterFile,
    RegisterFileInputs, Select, Sensitive,
};
use proptest as _;
use rstest::rstest;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

const REGISTER_IMAGE: &str = "\
# register file preset
@0 A0
@1 A1
@2 A2

# out of range, skipped at load
@10 FF
@3 1A3
";

#[test]
fn register_image_loads_and_truncates() {
    let entries = parse_memory_image(REGISTER_IMAGE).expect("valid image");
    let mut regs: RegisterFile = RegisterFile::new();
    let mut sink = RecordingSink::new();

    let written = regs.load_traced(&entries, &mut sink);

    assert_eq!(written, 4);
    assert_eq!(
        (0..4).map(|addr| regs.read(addr)).collect::<Vec<_>>(),
        vec![0xA0, 0xA1, 0xA2, 0xA3]
    );
    assert_eq!(sink.events().len(), 4);
    assert!(sink
        .events()
        .iter()
        .all(|event| matches!(event, MemoryEvent::Loaded { addr, .. } if *addr < 16)));
}

#[rstest]
#[case("@1\n", ImageError::MissingValue { line: 1 })]
#[case("# ok\n@g 1\n", ImageError::InvalidHex { line: 2, token: "g".to_string() })]
#[case("@1 2\n\n@3 xyz\n", ImageError::InvalidHex { line: 3, token: "xyz".to_string() })]
fn malformed_images_report_their_line(#[case] image: &str, #[case] expected: ImageError) {
    let err = parse_memory_image(image).expect_err("image is malformed");

    assert_eq!(err.line(), expected.line());
    assert_eq!(err, expected);
}

#[test]
fn register_to_ram_transfer_reverses_order() {
    let mut regs: RegisterFile = RegisterFile::new();
    let mut ram: Ram = Ram::new();
    let mut clock = ClockDomain::new();

    for addr in 0..16_u8 {
        clock.tick(&mut regs, &RegisterFileInputs::write(usize::from(addr), 0xA0 + addr));
        clock.tick(&mut ram, &RamInputs::write(usize::from(addr), 0x50 + addr));
    }
    for addr in 0..8 {
        let value = regs.read(addr);
        clock.tick(&mut ram, &RamInputs::write(15 - addr, value));
    }

    for addr in 0..8_u8 {
        assert_eq!(ram.read(15 - usize::from(addr)), 0xA0 + addr);
        assert_eq!(ram.read(usize::from(addr)), 0x50 + addr);
    }
    assert_eq!(clock.cycle(), 40);
}

#[test]
fn ram_read_port_lags_a_write_by_one_edge() {
    let mut ram: Ram = Ram::new();
    let mut clock = ClockDomain::new();
    let stimulus = [
        RamInputs::write(4, 0x11),
        RamInputs::write(4, 0x22),
        RamInputs::read(4),
    ];

    assert_eq!(clock.run(&mut ram, &stimulus), vec![0x00, 0x11, 0x22]);
}

#[test]
fn alu_result_feeds_selector_input() {
    let alu = Alu4;
    let mut mux = Sensitive::new(Mux4::<u8>::new());
    let sum = alu.evaluate(&AluInputs {
        a: Int4::new(3).expect("fits"),
        b: Int4::new(2).expect("fits"),
        op: AluOp::Add,
    });

    let selected = *mux.drive(MuxInputs {
        inputs: [0, sum.result.bits(), 0xF, 0xE],
        select: Select::X1,
    });

    assert_eq!(selected, 5);
    assert!(!sum.carry);
    assert_eq!(mux.evaluations(), 1);
}

#[test]
fn sensitive_alu_skips_unchanged_inputs() {
    let mut alu = Sensitive::new(Alu4);
    let inputs = AluInputs {
        a: Int4::MAX,
        b: Int4::ONE,
        op: AluOp::Add,
    };

    let first = *alu.drive(inputs);
    let second = *alu.drive(inputs);

    assert_eq!(first, second);
    assert!(first.overflow);
    assert_eq!(alu.evaluations(), 1);
    assert_eq!(alu.outputs(), Some(&first));
}
