//! Clocking model.
//!
//! Synchronous blocks change state only inside [`Synchronous::posedge`];
//! combinational blocks are pure functions of their inputs. A [`ClockDomain`]
//! is the single deterministic scheduler: it fires one edge per tick and
//! runs each edge to completion before the next one.

/// A block whose state changes only at a rising clock edge.
pub trait Synchronous {
    /// Signals sampled at the edge.
    type Inputs;
    /// Signals driven after the edge has settled.
    type Outputs;

    /// Samples `inputs` at a rising edge, mutates internal state and returns
    /// the settled outputs.
    fn posedge(&mut self, inputs: &Self::Inputs) -> Self::Outputs;
}

/// A block whose outputs are recomputed from current inputs with no memory.
pub trait Combinational {
    /// Watched input signals.
    type Inputs;
    /// Output signals.
    type Outputs;

    /// Computes the outputs for `inputs`.
    fn evaluate(&self, inputs: &Self::Inputs) -> Self::Outputs;
}

/// Single global clock with a monotonically increasing edge counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClockDomain {
    cycle: u64,
}

impl ClockDomain {
    /// Creates a clock domain at edge zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { cycle: 0 }
    }

    /// Number of edges fired so far.
    #[must_use]
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Fires one rising edge on `block`.
    pub fn tick<B: Synchronous>(&mut self, block: &mut B, inputs: &B::Inputs) -> B::Outputs {
        let outputs = block.posedge(inputs);
        self.cycle += 1;
        outputs
    }

    /// Fires one edge per stimulus entry, in order, and collects the outputs.
    pub fn run<'a, B, I>(&mut self, block: &mut B, stimulus: I) -> Vec<B::Outputs>
    where
        B: Synchronous,
        B::Inputs: 'a,
        I: IntoIterator<Item = &'a B::Inputs>,
    {
        stimulus
            .into_iter()
            .map(|inputs| self.tick(block, inputs))
            .collect()
    }
}

/// Sensitivity-list wrapper for a combinational block.
///
/// Outputs are recomputed only when the driven inputs differ from the last
/// evaluated ones.
pub struct Sensitive<B: Combinational> {
    block: B,
    settled: Option<(B::Inputs, B::Outputs)>,
    evaluations: u64,
}

impl<B> Sensitive<B>
where
    B: Combinational,
    B::Inputs: PartialEq,
{
    /// Wraps `block`; nothing is evaluated until the first drive.
    #[must_use]
    pub const fn new(block: B) -> Self {
        Self {
            block,
            settled: None,
            evaluations: 0,
        }
    }

    /// Drives new input values and returns the settled outputs.
    pub fn drive(&mut self, inputs: B::Inputs) -> &B::Outputs {
        let settled = match self.settled.take() {
            Some((last, outputs)) if last == inputs => (last, outputs),
            _ => {
                let outputs = self.block.evaluate(&inputs);
                self.evaluations += 1;
                (inputs, outputs)
            }
        };
        &self.settled.insert(settled).1
    }

    /// Last settled outputs, if the block has been driven.
    #[must_use]
    pub fn outputs(&self) -> Option<&B::Outputs> {
        self.settled.as_ref().map(|(_, outputs)| outputs)
    }

    /// Number of times the wrapped block was actually evaluated.
    #[must_use]
    pub const fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Returns the wrapped block.
    #[must_use]
    pub const fn block(&self) -> &B {
        &self.block
    }
}
