//! Cycle construction driver with stack-based backtracking.

use tracing::{debug, info, trace, warn};

use crate::adjacency::AdjacencyStore;
use crate::error::GenRegError;
use crate::feasibility::{assess, Feasibility};
use crate::girth::{EdgePredicate, GirthValidator};
use crate::verify;

use super::types::{BacktrackStack, Construction, Params, ResumePoint, SearchCfg, SearchStats};

/// Convenience: empty start, no predicates, default configuration.
pub fn construct(n: usize, k: usize, g: usize) -> Result<Construction, GenRegError> {
    Search::new(Params::new(n, k, g)).run()
}

/// Builder for one construction run.
pub struct Search<'p> {
    params: Params,
    cfg: SearchCfg,
    seed: Option<AdjacencyStore>,
    resume: Option<BacktrackStack>,
    predicates: Vec<Box<dyn EdgePredicate + 'p>>,
}

impl<'p> Search<'p> {
    pub fn new(params: Params) -> Self {
        Self {
            params,
            cfg: SearchCfg::default(),
            seed: None,
            resume: None,
            predicates: Vec::new(),
        }
    }

    pub fn cfg(mut self, cfg: SearchCfg) -> Self {
        self.cfg = cfg;
        self
    }

    /// Start from externally required edges instead of an empty graph.
    pub fn seed(mut self, store: AdjacencyStore) -> Self {
        self.seed = Some(store);
        self
    }

    /// Add a constraint; predicates run in insertion order.
    pub fn predicate(mut self, p: impl EdgePredicate + 'p) -> Self {
        self.predicates.push(Box::new(p));
        self
    }

    /// Request continuation from a previous stack. Not supported: `run` fails fast.
    pub fn resume_from(mut self, stack: BacktrackStack) -> Self {
        self.resume = Some(stack);
        self
    }

    pub fn run(self) -> Result<Construction, GenRegError> {
        let Params { n, k, g } = self.params;
        if self.resume.is_some() {
            return Err(GenRegError::UnsupportedResume);
        }
        match assess(self.params) {
            Feasibility::Impossible { reason } => {
                return Err(GenRegError::InfeasibleParameters { n, k, g, reason });
            }
            Feasibility::Open { advice } => warn!(n, k, g, %advice, "open_regime"),
            Feasibility::Plausible => {}
        }
        let store = match self.seed {
            Some(seed) => {
                check_seed(self.params, &seed)?;
                seed
            }
            None => AdjacencyStore::new(n, k),
        };
        info!(n, k, g, seeded_edges = store.edge_count(), "construct_start");
        let mut driver = CycleDriver {
            params: self.params,
            cfg: self.cfg,
            store,
            stack: BacktrackStack::new(),
            validator: GirthValidator::new(self.params, self.predicates),
            stats: SearchStats::default(),
        };
        let result = driver.run();
        let s = driver.stats;
        match &result {
            Ok(_) => info!(
                n,
                k,
                g,
                edges_added = s.edges_added,
                backtracks = s.cycle_backtracks,
                checks = s.validity_checks,
                "construct_done"
            ),
            Err(e) => info!(n, k, g, error = %e, checks = s.validity_checks, "construct_failed"),
        }
        result
    }
}

/// Seeds must be simple, symmetric, of girth ≥ g, and completable by passes:
/// a vertex is only ever extended when its degree equals an even pass index.
fn check_seed(params: Params, seed: &AdjacencyStore) -> Result<(), GenRegError> {
    if seed.vertex_count() != params.n || seed.slot_count() != params.k {
        return Err(GenRegError::invalid_seed(format!(
            "shape {}x{} does not match n={} k={}",
            seed.vertex_count(),
            seed.slot_count(),
            params.n,
            params.k
        )));
    }
    verify::check_structure(seed).map_err(|e| GenRegError::invalid_seed(e.to_string()))?;
    if let Some(v) = (0..params.n).find(|&v| {
        let d = seed.degree(v);
        d % 2 == 1 && d != params.k
    }) {
        return Err(GenRegError::invalid_seed(format!(
            "vertex {v} has odd degree {} below k",
            seed.degree(v)
        )));
    }
    if let Some(girth) = verify::girth(seed) {
        if girth < params.g {
            return Err(GenRegError::invalid_seed(format!(
                "seed already has girth {girth} < {}",
                params.g
            )));
        }
    }
    Ok(())
}

/// Driver state: the store, the stack of completed cycles, and the validator.
struct CycleDriver<'p> {
    params: Params,
    cfg: SearchCfg,
    store: AdjacencyStore,
    stack: BacktrackStack,
    validator: GirthValidator<'p>,
    stats: SearchStats,
}

impl CycleDriver<'_> {
    fn run(&mut self) -> Result<Construction, GenRegError> {
        let Params { n, k, .. } = self.params;
        let mut ci = 0;
        while ci < k {
            let mut n0 = 0;
            while n0 < n {
                if self.store.degree(n0) == ci {
                    // A backtrack may land in an earlier pass; continue from there.
                    let done = self.complete_cycle(ci, n0)?;
                    ci = done.pass;
                    n0 = done.origin;
                }
                n0 += 1;
            }
            ci += 2;
        }
        debug_assert!(self.store.is_regular());
        Ok(Construction {
            graph: self.store.clone(),
            stats: self.stats,
            stack: self.stack.clone(),
        })
    }

    /// Build the cycle (or final-pass edge) starting at `origin`, backtracking into
    /// earlier cycles when it cannot even start. Returns the point that was pushed.
    fn complete_cycle(&mut self, pass: usize, origin: usize) -> Result<ResumePoint, GenRegError> {
        let n = self.params.n;
        let mut pass = pass;
        let mut origin = origin;
        let mut ni = origin;
        let mut nj = (ni + 1) % n;
        loop {
            while nj != ni && !self.accepts(pass, origin, ni, nj) {
                nj = (nj + 1) % n;
            }

            if nj == ni {
                let undo_at = if ni == origin {
                    let Some(point) = self.stack.pop() else {
                        let Params { n, k, g } = self.params;
                        return Err(GenRegError::SearchExhausted { n, k, g });
                    };
                    self.stats.cycle_backtracks += 1;
                    debug!(
                        pass = point.pass,
                        origin = point.origin,
                        closing = point.closing,
                        depth = self.stack.len(),
                        "reopen_cycle"
                    );
                    if self.cfg.progress_every > 0
                        && self.stats.cycle_backtracks % self.cfg.progress_every == 0
                    {
                        info!(
                            backtracks = self.stats.cycle_backtracks,
                            depth = self.stack.len(),
                            checks = self.stats.validity_checks,
                            "search_progress"
                        );
                    }
                    pass = point.pass;
                    origin = point.origin;
                    point.closing
                } else {
                    ni
                };
                ni = self.store.remove_last_edge(undo_at)?;
                self.stats.edges_removed += 1;
                trace!(u = ni, v = undo_at, "undo_edge");
                nj = (undo_at + 1) % n;
                continue;
            }

            self.store.add_edge(ni, nj)?;
            self.stats.edges_added += 1;
            trace!(u = ni, v = nj, pass, "add_edge");
            if nj == origin || self.params.is_edge_pass(pass) {
                let point = ResumePoint {
                    pass,
                    origin,
                    closing: nj,
                };
                self.stack.push(point);
                self.stats.cycles_closed += 1;
                return Ok(point);
            }
            ni = nj;
            nj = (ni + 1) % n;
        }
    }

    fn accepts(&mut self, pass: usize, origin: usize, ni: usize, nj: usize) -> bool {
        self.stats.validity_checks += 1;
        let ceiling = degree_ceiling(self.params, pass, origin, nj);
        self.validator.is_edge_valid(&self.store, ni, nj, ceiling)
    }
}

/// Largest degree (exclusive) `nj` may have to accept an edge in `pass`.
///
/// Only the cycle origin may already hold an edge of the current pass, and only
/// when the candidate closes the cycle. In the single-edge pass every partner
/// must still be at the pass degree.
pub(crate) fn degree_ceiling(params: Params, pass: usize, origin: usize, nj: usize) -> usize {
    if nj == origin && !params.is_edge_pass(pass) {
        pass + 2
    } else {
        pass + 1
    }
}
