//! Cycle-pass search for k-regular graphs of girth ≥ g.
//!
//! Purpose
//! - Place edges in ⌈k/2⌉ passes. Pass `ci` visits the vertices still at degree
//!   `ci` in index order and threads a cycle through vertices that also sit at
//!   `ci`, giving each of them two new edges. For odd `k` the last pass places a
//!   single edge per vertex (a perfect matching on the remaining slots).
//! - Every candidate edge goes through the girth validator first, so the partial
//!   graph never holds a short cycle.
//!
//! Backtracking
//! - Inside a cycle, a dead end undoes the last edge and moves on to the next
//!   candidate for the previous vertex.
//! - When a cycle cannot place its first edge, the most recently completed cycle
//!   is reopened from the resume point on the stack. An empty stack ends the run
//!   with `SearchExhausted`.
//!
//! Limitations
//! - Isomorphic partial states are not pruned; the first graph in cycle order is
//!   returned. Resuming from a saved stack is rejected with `UnsupportedResume`.
//! - There is no step budget; hard parameters can backtrack for a long time.

mod driver;
mod types;

pub use driver::{construct, Search};
pub use types::{BacktrackStack, Construction, Params, ResumePoint, SearchCfg, SearchStats};

#[cfg(test)]
mod tests;
