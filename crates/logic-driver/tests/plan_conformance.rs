//! FIFO core conformance against the reference model.

use std::num::NonZeroUsize;

use logic_core::{ConfigError, Fifo, FifoConfig, FifoInputs};
use logic_driver::{
    check_memory_roundtrip, run_block, run_configured, run_plan, sweep_alu, sweep_selector, DriverError, Phase,
    ReferenceFifo, StimulusPlan,
};
use proptest::prelude::*;
use rstest::rstest;
use thiserror as _;

fn request() -> impl Strategy<Value = FifoInputs<u32>> {
    (
        prop::bool::weighted(0.03),
        any::<bool>(),
        any::<u32>(),
        any::<bool>(),
    )
        .prop_map(|(reset, write_en, data_in, read_en)| FifoInputs {
            reset_n: !reset,
            write_en,
            data_in,
            read_en,
        })
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(8)]
#[case(16)]
fn adversarial_plan_matches_reference(#[case] depth: usize) {
    let mut fifo = Fifo::<u32>::new(depth).expect("non-zero depth");
    let seeds: Vec<u32> = (0..).step_by(17).take(23).collect();
    let plan = StimulusPlan::adversarial(depth, &seeds);

    let report = run_plan(&mut fifo, &plan).expect("fifo matches reference");

    assert_eq!(report.edges, plan.edge_count());
    assert_eq!(report.resets, 3);
    assert!(report.writes_dropped >= 2);
    assert!(report.reads_dropped >= 2);
}

#[test]
fn bench_sequence_on_default_depth() {
    let mut fifo = Fifo::<u32>::with_config(&FifoConfig::default()).expect("valid config");
    let plan = StimulusPlan::new()
        .reset(2)
        .read_write([
            (false, Some(0x11)),
            (true, Some(0x22)),
            (true, None),
            (false, None),
            (true, Some(0x33)),
        ])
        .idle(1)
        .fill((0..10).map(|i| 0x100 + i))
        .drain(10);

    let report = run_plan(&mut fifo, &plan).expect("fifo matches reference");

    // One element is still queued when the fill starts.
    assert_eq!(report.writes_dropped, 3);
    assert_eq!(report.reads_dropped, 1 + 2);
    assert!(fifo.is_empty());
    assert_eq!(*fifo.data_out(), 0x106);
}

#[test]
fn zero_depth_is_a_config_error() {
    let plan = StimulusPlan::<u32>::adversarial(0, &[1]);

    let err = run_configured(&FifoConfig::with_depth(0), &plan).map(|(_, report)| report);

    assert_eq!(err, Err(DriverError::Config(ConfigError::ZeroDepth)));
}

#[test]
fn collaborator_sweeps_pass() {
    assert_eq!(sweep_alu().expect("alu sweep"), 2048);
    assert_eq!(sweep_selector().expect("selector sweep"), 16);

    let mut regs = logic_core::RegisterFile::<16>::new();
    let mut ram = logic_core::Ram::<16>::new();
    let report = check_memory_roundtrip(&mut regs, &mut ram).expect("memory sweep");
    assert_eq!(report.transfers, 8);
}

proptest! {
    #[test]
    fn property_random_streams_match_reference(
        depth in 1_usize..=10,
        stream in prop::collection::vec(request(), 1..300),
    ) {
        let capacity = NonZeroUsize::new(depth).expect("non-zero depth");
        let mut fifo = Fifo::<u32>::new(depth).expect("non-zero depth");
        let mut reference = ReferenceFifo::new(capacity);
        let plan = StimulusPlan::new().phase(Phase::new("random", stream));

        let report = run_block(&mut fifo, &mut reference, &plan);

        prop_assert!(report.is_ok(), "unexpected mismatch: {:?}", report);
        prop_assert_eq!(reference.flags(), fifo.flags());
        prop_assert_eq!(
            reference.iter().copied().collect::<Vec<_>>(),
            fifo.contents().copied().collect::<Vec<_>>()
        );
    }

    #[test]
    fn property_report_tallies_are_consistent(
        depth in 1_usize..=6,
        stream in prop::collection::vec(request(), 0..120),
    ) {
        let mut fifo = Fifo::<u32>::new(depth).expect("non-zero depth");
        let plan = StimulusPlan::new().reset(1).phase(Phase::new("random", stream.clone()));

        let report = run_plan(&mut fifo, &plan).expect("fifo matches reference");

        prop_assert_eq!(report.edges, stream.len() + 1);
        let reads_requested = stream.iter().filter(|edge| edge.reset_n && edge.read_en).count();
        let writes_requested = stream.iter().filter(|edge| edge.reset_n && edge.write_en).count();
        prop_assert_eq!(report.reads_checked + report.reads_dropped, reads_requested);
        prop_assert_eq!(report.writes_accepted + report.writes_dropped, writes_requested);
    }
}
