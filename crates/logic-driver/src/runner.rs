//! Drives a [`StimulusPlan`] through a FIFO block and checks every edge
//! against [`ReferenceFifo`].
//!
//! After each edge the runner compares `data_out`, `empty`, `full` and
//! `size`. `data_out` is checked on every edge, so a value that changes
//! without a dequeue, or survives a reset, is caught too. The first
//! divergence stops the run.

use std::fmt;

use logic_core::{
    Admission, EdgeOutcome, Fifo, FifoConfig, FifoEvent, FifoInputs, FifoOutputs, Synchronous,
    TraceSink,
};

use crate::error::{DriverError, Signal};
use crate::reference::ReferenceFifo;
use crate::stimulus::StimulusPlan;

/// Tallies for a run that matched the reference on every edge.
///
/// Admission counts are taken from the reference model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RunReport {
    /// Edges driven.
    pub edges: usize,
    /// Dequeues performed.
    pub reads_checked: usize,
    /// Writes admitted.
    pub writes_accepted: usize,
    /// Writes refused because the edge started full.
    pub writes_dropped: usize,
    /// Reads refused because the edge started empty.
    pub reads_dropped: usize,
    /// Edges with reset asserted.
    pub resets: usize,
}

impl RunReport {
    fn record(&mut self, outcome: &EdgeOutcome) {
        self.edges += 1;
        if outcome.reset {
            self.resets += 1;
        }
        match outcome.read {
            Admission::Accepted => self.reads_checked += 1,
            Admission::Dropped => self.reads_dropped += 1,
            Admission::Idle => {}
        }
        match outcome.write {
            Admission::Accepted => self.writes_accepted += 1,
            Admission::Dropped => self.writes_dropped += 1,
            Admission::Idle => {}
        }
    }
}

/// Runs `plan` against `fifo`, starting the reference from the FIFO's
/// current state.
///
/// # Errors
///
/// Returns [`DriverError::Mismatch`] at the first edge where an observed
/// signal differs from the reference.
pub fn run_plan<T>(fifo: &mut Fifo<T>, plan: &StimulusPlan<T>) -> Result<RunReport, DriverError>
where
    T: Clone + Default + PartialEq + fmt::Debug,
{
    let mut reference = ReferenceFifo::mirror(fifo);
    run_block(fifo, &mut reference, plan)
}

/// Builds a FIFO from `config` and runs `plan` against it from reset state.
///
/// Returns the FIFO as left by the run together with the report.
///
/// # Errors
///
/// Returns [`DriverError::Config`] when `config` is rejected and
/// [`DriverError::Mismatch`] at the first diverging edge.
pub fn run_configured<T>(
    config: &FifoConfig,
    plan: &StimulusPlan<T>,
) -> Result<(Fifo<T>, RunReport), DriverError>
where
    T: Clone + Default + PartialEq + fmt::Debug,
{
    let mut fifo = Fifo::with_config(config)?;
    let report = run_plan(&mut fifo, plan)?;
    Ok((fifo, report))
}

/// Like [`run_plan`], forwarding the FIFO's trace events to `sink`.
///
/// # Errors
///
/// Returns [`DriverError::Mismatch`] at the first diverging edge.
pub fn run_plan_traced<T, S>(
    fifo: &mut Fifo<T>,
    plan: &StimulusPlan<T>,
    sink: &mut S,
) -> Result<RunReport, DriverError>
where
    T: Clone + Default + PartialEq + fmt::Debug,
    S: TraceSink<FifoEvent<T>> + ?Sized,
{
    let mut reference = ReferenceFifo::mirror(fifo);
    run_block(&mut Traced { fifo, sink }, &mut reference, plan)
}

/// Runs `plan` against any block exposing the FIFO signal set.
///
/// `reference` must describe the block's state before the first edge.
///
/// # Errors
///
/// Returns [`DriverError::Mismatch`] at the first diverging edge.
pub fn run_block<T, B>(
    block: &mut B,
    reference: &mut ReferenceFifo<T>,
    plan: &StimulusPlan<T>,
) -> Result<RunReport, DriverError>
where
    T: Clone + Default + PartialEq + fmt::Debug,
    B: Synchronous<Inputs = FifoInputs<T>, Outputs = FifoOutputs<T>> + ?Sized,
{
    let mut report = RunReport::default();

    for (cycle, (phase, inputs)) in (0_u64..).zip(plan.edges()) {
        let expected = reference.apply(inputs);
        let observed = block.posedge(inputs);

        compare_edge(phase, cycle, reference, &observed)?;
        report.record(&expected);
    }

    Ok(report)
}

fn compare_edge<T>(
    phase: &str,
    cycle: u64,
    reference: &ReferenceFifo<T>,
    observed: &FifoOutputs<T>,
) -> Result<(), DriverError>
where
    T: PartialEq + fmt::Debug,
{
    if reference.data_out() != &observed.data_out {
        return Err(DriverError::mismatch(
            phase,
            cycle,
            Signal::DataOut,
            reference.data_out(),
            &observed.data_out,
        ));
    }

    let want = reference.flags();
    let got = observed.flags;
    if want.empty != got.empty {
        return Err(DriverError::mismatch(phase, cycle, Signal::Empty, &want.empty, &got.empty));
    }
    if want.full != got.full {
        return Err(DriverError::mismatch(phase, cycle, Signal::Full, &want.full, &got.full));
    }
    if want.size != got.size {
        return Err(DriverError::mismatch(phase, cycle, Signal::Size, &want.size, &got.size));
    }
    Ok(())
}

/// Routes a FIFO's edges through a trace sink.
struct Traced<'a, T, S: ?Sized> {
    fifo: &'a mut Fifo<T>,
    sink: &'a mut S,
}

impl<T, S> Synchronous for Traced<'_, T, S>
where
    T: Clone + Default,
    S: TraceSink<FifoEvent<T>> + ?Sized,
{
    type Inputs = FifoInputs<T>;
    type Outputs = FifoOutputs<T>;

    fn posedge(&mut self, inputs: &FifoInputs<T>) -> FifoOutputs<T> {
        self.fifo.clock_edge_traced(inputs, self.sink);
        self.fifo.outputs()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::num::NonZeroUsize;

    use logic_core::{
        ConfigError, Fifo, FifoConfig, FifoEvent, FifoFlags, FifoInputs, FifoOutputs,
        RecordingSink, Synchronous,
    };

    use super::{run_block, run_configured, run_plan, run_plan_traced, RunReport};
    use crate::error::{DriverError, Signal};
    use crate::reference::ReferenceFifo;
    use crate::stimulus::StimulusPlan;

    /// Admits a write whenever the same edge's read frees a slot.
    struct PostEdgeAdmission {
        items: VecDeque<u8>,
        capacity: usize,
        data_out: u8,
    }

    impl Synchronous for PostEdgeAdmission {
        type Inputs = FifoInputs<u8>;
        type Outputs = FifoOutputs<u8>;

        fn posedge(&mut self, inputs: &FifoInputs<u8>) -> FifoOutputs<u8> {
            if !inputs.reset_n {
                self.items.clear();
                self.data_out = 0;
            } else {
                if inputs.read_en {
                    if let Some(value) = self.items.pop_front() {
                        self.data_out = value;
                    }
                }
                if inputs.write_en && self.items.len() < self.capacity {
                    self.items.push_back(inputs.data_in);
                }
            }
            FifoOutputs {
                data_out: self.data_out,
                flags: FifoFlags::derive(self.items.len(), self.capacity),
            }
        }
    }

    /// Correct queue and flags, but `data_out` is overwritten on every edge
    /// that does not dequeue, including reset edges.
    struct StaleOutput {
        items: VecDeque<u8>,
        capacity: usize,
        data_out: u8,
    }

    impl Synchronous for StaleOutput {
        type Inputs = FifoInputs<u8>;
        type Outputs = FifoOutputs<u8>;

        fn posedge(&mut self, inputs: &FifoInputs<u8>) -> FifoOutputs<u8> {
            let was_full = self.items.len() == self.capacity;
            let mut dequeued = None;
            if !inputs.reset_n {
                self.items.clear();
            } else {
                if inputs.read_en {
                    dequeued = self.items.pop_front();
                }
                if inputs.write_en && !was_full {
                    self.items.push_back(inputs.data_in);
                }
            }
            self.data_out = dequeued.unwrap_or(0xEE);
            FifoOutputs {
                data_out: self.data_out,
                flags: FifoFlags::derive(self.items.len(), self.capacity),
            }
        }
    }

    fn stale_output(capacity: usize) -> StaleOutput {
        StaleOutput {
            items: VecDeque::new(),
            capacity,
            data_out: 0,
        }
    }

    #[test]
    fn data_out_change_without_dequeue_is_caught() {
        let capacity = NonZeroUsize::new(2).expect("non-zero capacity");
        let mut block = stale_output(capacity.get());
        let mut reference = ReferenceFifo::new(capacity);
        let plan = StimulusPlan::new().fill([1, 2]);

        let err = run_block(&mut block, &mut reference, &plan).expect_err("block diverges");

        assert_eq!(
            err,
            DriverError::Mismatch {
                phase: "fill".to_string(),
                cycle: 0,
                signal: Signal::DataOut,
                expected: "0".to_string(),
                actual: "238".to_string(),
            }
        );
    }

    #[test]
    fn data_out_surviving_reset_is_caught() {
        let mut fifo = Fifo::<u8>::new(2).expect("non-zero depth");
        fifo.clock_edge(&FifoInputs::write(1));
        fifo.clock_edge(&FifoInputs::write(2));
        let mut reference = ReferenceFifo::mirror(&fifo);
        let mut block = StaleOutput {
            items: VecDeque::from([1, 2]),
            ..stale_output(2)
        };
        let plan = StimulusPlan::new().drain(1).reset(1);

        let err = run_block(&mut block, &mut reference, &plan).expect_err("block diverges");

        assert_eq!(
            err,
            DriverError::Mismatch {
                phase: "reset".to_string(),
                cycle: 1,
                signal: Signal::DataOut,
                expected: "0".to_string(),
                actual: "238".to_string(),
            }
        );
    }

    #[test]
    fn configured_run_rejects_zero_depth() {
        let plan = StimulusPlan::<u8>::new().fill([1]);

        let result = run_configured(&FifoConfig::with_depth(0), &plan);

        assert_eq!(
            result.map(|(_, report)| report),
            Err(DriverError::Config(ConfigError::ZeroDepth))
        );
    }

    #[test]
    fn configured_run_returns_the_driven_fifo() {
        let plan = StimulusPlan::<u8>::new().reset(1).fill([1, 2, 3]).drain(1);

        let (fifo, report) =
            run_configured(&FifoConfig::with_depth(2), &plan).expect("fifo matches reference");

        assert_eq!(report.writes_dropped, 1);
        assert_eq!(*fifo.data_out(), 1);
        assert_eq!(fifo.size(), 1);
    }

    #[test]
    fn reference_testbench_sequence_matches() {
        let mut fifo = Fifo::<u8>::new(8).expect("non-zero depth");
        let plan = StimulusPlan::new().reset(2).fill(1..=10).drain(10);

        let report = run_plan(&mut fifo, &plan).expect("fifo matches reference");

        assert_eq!(
            report,
            RunReport {
                edges: 22,
                reads_checked: 8,
                writes_accepted: 8,
                writes_dropped: 2,
                reads_dropped: 2,
                resets: 2,
            }
        );
    }

    #[test]
    fn run_starts_from_current_fifo_state() {
        let mut fifo = Fifo::<u8>::new(2).expect("non-zero depth");
        fifo.clock_edge(&FifoInputs::write(0x33));

        let report = run_plan(&mut fifo, &StimulusPlan::new().drain(1)).expect("matches");

        assert_eq!(report.reads_checked, 1);
        assert_eq!(*fifo.data_out(), 0x33);
    }

    #[test]
    fn post_edge_admission_is_caught_at_the_full_edge() {
        let capacity = NonZeroUsize::new(2).expect("non-zero capacity");
        let mut block = PostEdgeAdmission {
            items: VecDeque::new(),
            capacity: capacity.get(),
            data_out: 0,
        };
        let mut reference = ReferenceFifo::new(capacity);
        let plan = StimulusPlan::new()
            .fill([1, 2])
            .read_write([(true, Some(3))]);

        let err = run_block(&mut block, &mut reference, &plan).expect_err("block diverges");

        assert_eq!(
            err,
            DriverError::Mismatch {
                phase: "read-write".to_string(),
                cycle: 2,
                signal: Signal::Full,
                expected: "false".to_string(),
                actual: "true".to_string(),
            }
        );
    }

    #[test]
    fn matching_block_passes_the_adversarial_plan() {
        let capacity = NonZeroUsize::new(3).expect("non-zero capacity");
        let mut fifo = Fifo::<u8>::new(capacity.get()).expect("non-zero depth");
        let mut reference = ReferenceFifo::new(capacity);
        let plan = StimulusPlan::adversarial(3, &[1, 2, 3, 4, 5]);

        let report = run_block(&mut fifo, &mut reference, &plan).expect("matches");

        assert_eq!(report.edges, plan.edge_count());
        assert!(report.writes_dropped > 0);
        assert!(report.reads_dropped > 0);
        assert_eq!(report.resets, 3);
    }

    #[test]
    fn traced_run_forwards_fifo_events() {
        let config = FifoConfig {
            depth: 1,
            tracing_enabled: true,
        };
        let mut fifo = Fifo::<u8>::with_config(&config).expect("valid config");
        let mut sink = RecordingSink::new();
        let plan = StimulusPlan::new().fill([4, 5]).drain(1);

        let report = run_plan_traced(&mut fifo, &plan, &mut sink).expect("matches");

        assert_eq!(report.writes_dropped, 1);
        assert_eq!(
            sink.events(),
            &[
                FifoEvent::Write {
                    cycle: 0,
                    value: 4,
                    size: 1
                },
                FifoEvent::WriteDropped { cycle: 1 },
                FifoEvent::Read {
                    cycle: 2,
                    value: 4,
                    size: 0
                },
            ]
        );
    }
}
