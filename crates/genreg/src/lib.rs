//! Regular graphs of prescribed girth, built pass by pass from cycles.
//!
//! A k-regular graph on n vertices with girth ≥ g is assembled in ⌈k/2⌉ passes;
//! each pass threads edge-disjoint cycles through the vertices that still need
//! edges, and a stack of completed cycles drives backtracking. Every candidate
//! edge is screened by a bounded layered BFS so short cycles never appear.
//!
//! Layout
//! - `adjacency`: slot rows with LIFO undo.
//! - `girth`: edge validator and the external predicate hook.
//! - `search`: the pass/cycle driver and its builder.
//! - `feasibility`: pre-check on (n, k, g).
//! - `verify`: exact girth and structure checks for results and seeds.

pub mod adjacency;
pub mod api;
pub mod error;
pub mod feasibility;
pub mod girth;
pub mod search;
pub mod verify;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use adjacency::{AdjacencyStore, StoreError};
pub use error::GenRegError;
pub use search::{construct, Construction, Params, Search};
