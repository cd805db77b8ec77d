//! Girth validator: bounded layered BFS around a candidate edge.
//!
//! Purpose
//! - Decide whether adding `{ni, nj}` to the current graph keeps every cycle at
//!   length ≥ g, without mutating the graph. Every placement attempt of the
//!   driver goes through here, so the BFS reuses its scratch buffers.
//!
//! Model
//! - The frontier starts with every placed edge of `ni` plus the candidate edge,
//!   all as `(source, target)` pairs, and is expanded for ⌊g/2⌋ rounds. A target
//!   seen before closes a cycle through `ni` shorter than g.
//! - For even g the final round only checks against earlier rounds: two branches
//!   meeting at distance g/2 form a cycle of length exactly g, which is allowed.

use crate::adjacency::AdjacencyStore;
use crate::search::Params;

/// Read-only view handed to external predicates.
#[derive(Clone, Copy, Debug)]
pub struct EdgeView<'a> {
    pub params: Params,
    /// Degree ceiling in force for this candidate.
    pub ceiling: usize,
    pub ni: usize,
    pub nj: usize,
    pub store: &'a AdjacencyStore,
}

impl EdgeView<'_> {
    #[inline]
    pub fn degrees(&self) -> &[usize] {
        self.store.degrees()
    }
}

/// Extra caller constraint ANDed with the built-in degree/girth checks.
///
/// Predicates must be pure functions of the view; a panic aborts the search.
pub trait EdgePredicate {
    fn accept(&self, edge: &EdgeView<'_>) -> bool;
}

impl<F> EdgePredicate for F
where
    F: Fn(&EdgeView<'_>) -> bool,
{
    fn accept(&self, edge: &EdgeView<'_>) -> bool {
        self(edge)
    }
}

/// Reusable validator state: girth, predicates, BFS scratch.
pub struct GirthValidator<'p> {
    params: Params,
    predicates: Vec<Box<dyn EdgePredicate + 'p>>,
    frontier: Vec<(usize, usize)>,
    next: Vec<(usize, usize)>,
    /// `seen[v] == epoch` marks `v` as visited in the current call.
    seen: Vec<u32>,
    epoch: u32,
}

impl<'p> GirthValidator<'p> {
    pub fn new(params: Params, predicates: Vec<Box<dyn EdgePredicate + 'p>>) -> Self {
        Self {
            params,
            predicates,
            frontier: Vec::new(),
            next: Vec::new(),
            seen: vec![0; params.n],
            epoch: 0,
        }
    }

    /// Would `{ni, nj}` be a legal edge with `nj` below `ceiling` edges?
    pub fn is_edge_valid(
        &mut self,
        store: &AdjacencyStore,
        ni: usize,
        nj: usize,
        ceiling: usize,
    ) -> bool {
        if store.degree(nj) >= ceiling {
            return false;
        }
        if !self.predicates.is_empty() {
            let view = EdgeView {
                params: self.params,
                ceiling,
                ni,
                nj,
                store,
            };
            if !self.predicates.iter().all(|p| p.accept(&view)) {
                return false;
            }
        }
        if ni == nj {
            return false;
        }
        // No cycle can run through a vertex without edges.
        if store.degree(nj) == 0 {
            return true;
        }
        if store.has_edge(ni, nj) {
            return false;
        }
        self.bfs_keeps_girth(store, ni, nj)
    }

    fn bfs_keeps_girth(&mut self, store: &AdjacencyStore, ni: usize, nj: usize) -> bool {
        let rounds = self.params.g / 2;
        let even = self.params.g % 2 == 0;
        let epoch = self.next_epoch();

        self.frontier.clear();
        self.frontier.extend(store.neighbors(ni).map(|t| (ni, t)));
        self.frontier.push((ni, nj));

        for round in 0..rounds {
            let last = round + 1 == rounds;
            let meet_ok = even && last;
            self.next.clear();
            for &(source, target) in &self.frontier {
                if self.seen[target] == epoch {
                    return false;
                }
                if !meet_ok {
                    self.seen[target] = epoch;
                }
                if !last {
                    self.next.extend(
                        store
                            .neighbors(target)
                            .filter(|&w| w != source)
                            .map(|w| (target, w)),
                    );
                }
            }
            std::mem::swap(&mut self.frontier, &mut self.next);
        }
        true
    }

    fn next_epoch(&mut self) -> u32 {
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            self.seen.iter_mut().for_each(|s| *s = 0);
            self.epoch = 1;
        }
        self.epoch
    }
}

/// One-shot check without predicates; allocates fresh scratch.
pub fn is_edge_valid(
    params: Params,
    store: &AdjacencyStore,
    ni: usize,
    nj: usize,
    ceiling: usize,
) -> bool {
    GirthValidator::new(params, Vec::new()).is_edge_valid(store, ni, nj, ceiling)
}
