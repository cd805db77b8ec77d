//! Parameters, resume points and bookkeeping for the cycle search.

use crate::adjacency::AdjacencyStore;

/// Vertex count, target degree and minimum girth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Params {
    pub n: usize,
    pub k: usize,
    pub g: usize,
}

impl Params {
    pub const fn new(n: usize, k: usize, g: usize) -> Self {
        Self { n, k, g }
    }

    /// Number of passes: ⌈k/2⌉.
    pub fn pass_count(&self) -> usize {
        self.k.div_ceil(2)
    }

    /// Is `pass` the single-edge pass of an odd `k`?
    #[inline]
    pub fn is_edge_pass(&self, pass: usize) -> bool {
        pass + 1 == self.k
    }
}

/// State recorded when a cycle (or final-pass edge) completes.
///
/// Popping it restores the driver to just before `closing`'s last edge was placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResumePoint {
    /// Pass index `ci` the cycle belongs to.
    pub pass: usize,
    /// Vertex `n0` the cycle started from.
    pub origin: usize,
    /// Endpoint whose last edge completed the cycle.
    pub closing: usize,
}

/// LIFO record of completed cycles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BacktrackStack {
    points: Vec<ResumePoint>,
}

impl BacktrackStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: ResumePoint) {
        self.points.push(point);
    }

    pub fn pop(&mut self) -> Option<ResumePoint> {
        self.points.pop()
    }

    pub fn peek(&self) -> Option<&ResumePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[ResumePoint] {
        &self.points
    }
}

/// Counters collected during one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub edges_added: u64,
    pub edges_removed: u64,
    pub cycles_closed: u64,
    /// Completed cycles reopened because a later cycle could not start.
    pub cycle_backtracks: u64,
    pub validity_checks: u64,
}

/// Search configuration.
#[derive(Clone, Copy, Debug)]
pub struct SearchCfg {
    /// Emit an `info` progress event every this many cycle backtracks (0 = never).
    pub progress_every: u64,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            progress_every: 100_000,
        }
    }
}

/// Successful result: a k-regular graph of girth ≥ g plus run statistics.
#[derive(Clone, Debug)]
pub struct Construction {
    pub graph: AdjacencyStore,
    pub stats: SearchStats,
    /// Resume points of the completed cycles, bottom first.
    pub stack: BacktrackStack,
}
