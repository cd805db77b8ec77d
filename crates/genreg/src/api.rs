//! Curated re-exports for callers (CLI, benches, notebooks).
//!
//! Not a stability promise; the module layout may move underneath.

pub use crate::adjacency::{AdjacencyStore, StoreError};
pub use crate::error::GenRegError;
pub use crate::feasibility::{assess, is_plausible, moore_bound, Feasibility};
pub use crate::girth::{is_edge_valid, EdgePredicate, EdgeView, GirthValidator};
pub use crate::search::{
    construct, BacktrackStack, Construction, Params, ResumePoint, Search, SearchCfg, SearchStats,
};
pub use crate::verify::{check_structure, girth, is_k_regular};
