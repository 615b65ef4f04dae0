//! Scripted FIFO stimulus.
//!
//! A [`StimulusPlan`] is an ordered list of labelled phases; each phase is
//! the per-edge input sequence to drive. Builders append one phase each and
//! chain by value.

use logic_core::FifoInputs;

/// One labelled run of consecutive edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase<T> {
    label: String,
    edges: Vec<FifoInputs<T>>,
}

impl<T> Phase<T> {
    /// Creates a phase from explicit per-edge inputs.
    #[must_use]
    pub fn new(label: impl Into<String>, edges: Vec<FifoInputs<T>>) -> Self {
        Self {
            label: label.into(),
            edges,
        }
    }

    /// Phase label used in mismatch reports.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Inputs for each edge, in order.
    #[must_use]
    pub fn edges(&self) -> &[FifoInputs<T>] {
        &self.edges
    }
}

/// Ordered phases of FIFO stimulus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StimulusPlan<T> {
    phases: Vec<Phase<T>>,
}

impl<T> Default for StimulusPlan<T> {
    fn default() -> Self {
        Self { phases: Vec::new() }
    }
}

impl<T> StimulusPlan<T> {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a phase.
    #[must_use]
    pub fn phase(mut self, phase: Phase<T>) -> Self {
        self.phases.push(phase);
        self
    }

    /// Phases in drive order.
    #[must_use]
    pub fn phases(&self) -> &[Phase<T>] {
        &self.phases
    }

    /// Total number of edges across all phases.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.phases.iter().map(|phase| phase.edges.len()).sum()
    }

    /// Every edge with the label of the phase it belongs to.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &FifoInputs<T>)> + '_ {
        self.phases
            .iter()
            .flat_map(|phase| phase.edges.iter().map(move |edge| (phase.label(), edge)))
    }

    /// Appends a phase of simultaneous read/write edges; each pair is
    /// `(read_en, data to write)`, where `None` leaves the write port idle.
    #[must_use]
    pub fn read_write<I>(self, pairs: I) -> Self
    where
        T: Default,
        I: IntoIterator<Item = (bool, Option<T>)>,
    {
        let edges = pairs
            .into_iter()
            .map(|(read_en, data)| match data {
                Some(value) => FifoInputs {
                    read_en,
                    ..FifoInputs::write(value)
                },
                None => FifoInputs {
                    read_en,
                    ..FifoInputs::idle()
                },
            })
            .collect();
        self.phase(Phase::new("read-write", edges))
    }
}

impl<T: Default> StimulusPlan<T> {
    /// Holds reset asserted for `cycles` edges.
    #[must_use]
    pub fn reset(self, cycles: usize) -> Self {
        let edges = std::iter::repeat_with(FifoInputs::reset)
            .take(cycles)
            .collect();
        self.phase(Phase::new("reset", edges))
    }

    /// One write edge per value.
    #[must_use]
    pub fn fill<I: IntoIterator<Item = T>>(self, values: I) -> Self {
        let edges = values.into_iter().map(FifoInputs::write).collect();
        self.phase(Phase::new("fill", edges))
    }

    /// `count` read edges.
    #[must_use]
    pub fn drain(self, count: usize) -> Self {
        let edges = std::iter::repeat_with(FifoInputs::read)
            .take(count)
            .collect();
        self.phase(Phase::new("drain", edges))
    }

    /// `count` edges with no request.
    #[must_use]
    pub fn idle(self, count: usize) -> Self {
        let edges = std::iter::repeat_with(FifoInputs::idle)
            .take(count)
            .collect();
        self.phase(Phase::new("idle", edges))
    }
}

impl<T: Clone + Default> StimulusPlan<T> {
    /// Canned plan exercising every admission corner of a `depth`-slot FIFO.
    ///
    /// Phases, in order: reset, overflow (fill past capacity), underflow
    /// (drain past empty), concurrent read/write at mid occupancy, concurrent
    /// read/write on an edge that starts full, a mid-stream reset and a
    /// mixed request pattern. Written values cycle through `seed_values`;
    /// an empty seed list writes `T::default()`.
    #[must_use]
    pub fn adversarial(depth: usize, seed_values: &[T]) -> Self {
        let mut seeds = SeedCycle::new(seed_values);
        let half = (depth / 2).max(1);

        Self::new()
            .reset(2)
            .phase(Phase::new("overflow", write_edges(&mut seeds, depth + 2)))
            .phase(Phase::new("underflow", read_edges(depth + 2)))
            .phase(Phase::new("mid-fill", write_edges(&mut seeds, half)))
            .phase(Phase::new("mid-read-write", read_write_edges(&mut seeds, depth)))
            .phase(Phase::new("flush", read_edges(depth + 1)))
            .phase(Phase::new("refill", write_edges(&mut seeds, depth)))
            .phase(Phase::new("full-read-write", read_write_edges(&mut seeds, 2)))
            .phase(Phase::new("pre-reset-fill", write_edges(&mut seeds, half)))
            .phase(Phase::new(
                "mid-stream-reset",
                vec![FifoInputs::reset(), FifoInputs::read()],
            ))
            .phase(Phase::new("mixed", mixed_edges(&mut seeds, 4 * depth)))
    }
}

/// Cycles through seed values, falling back to `T::default()`.
struct SeedCycle<'a, T> {
    values: &'a [T],
    next: usize,
}

impl<'a, T: Clone + Default> SeedCycle<'a, T> {
    const fn new(values: &'a [T]) -> Self {
        Self { values, next: 0 }
    }

    fn take(&mut self) -> T {
        if self.values.is_empty() {
            return T::default();
        }
        let value = self.values[self.next % self.values.len()].clone();
        self.next += 1;
        value
    }
}

fn write_edges<T: Clone + Default>(
    seeds: &mut SeedCycle<'_, T>,
    count: usize,
) -> Vec<FifoInputs<T>> {
    (0..count).map(|_| FifoInputs::write(seeds.take())).collect()
}

fn read_edges<T: Default>(count: usize) -> Vec<FifoInputs<T>> {
    std::iter::repeat_with(FifoInputs::read).take(count).collect()
}

fn read_write_edges<T: Clone + Default>(
    seeds: &mut SeedCycle<'_, T>,
    count: usize,
) -> Vec<FifoInputs<T>> {
    (0..count)
        .map(|_| FifoInputs::read_write(seeds.take()))
        .collect()
}

/// Deterministic interleaving of reads, writes and both.
fn mixed_edges<T: Clone + Default>(
    seeds: &mut SeedCycle<'_, T>,
    count: usize,
) -> Vec<FifoInputs<T>> {
    (0..count)
        .map(|edge| FifoInputs {
            reset_n: true,
            write_en: edge % 3 != 2,
            data_in: seeds.take(),
            read_en: edge % 2 == 1,
        })
        .collect()
}
