//! Fixed-shape adjacency rows with incremental degree counters.
//!
//! Model
//! - Every vertex owns exactly `k` slots. Slots fill left to right, so the
//!   filled prefix of a row is the vertex's neighbor list in insertion order and
//!   its length is the degree.
//! - An edge lives in both endpoint rows. `add_edge` and `remove_last_edge`
//!   always touch both halves, so the rows stay symmetric.
//! - Removal is LIFO per vertex: the most recently filled slot is the one undone.
//!   Undoing `m` additions with `m` removals in reverse order restores every slot
//!   and counter exactly.

use thiserror::Error;

/// Structural violations reported by the store.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("vertex {vertex} out of range for {n} vertices")]
    VertexOutOfRange { vertex: usize, n: usize },
    #[error("self loop at vertex {vertex}")]
    SelfLoop { vertex: usize },
    #[error("edge {u}-{v} already present")]
    DuplicateEdge { u: usize, v: usize },
    #[error("vertex {vertex} already has all {k} slots filled")]
    DegreeFull { vertex: usize, k: usize },
    #[error("vertex {vertex} has no edge to remove")]
    NoEdgeToRemove { vertex: usize },
    #[error("row of vertex {vertex} has {found} slots, expected {expected}")]
    RowLength {
        vertex: usize,
        expected: usize,
        found: usize,
    },
    #[error("row of vertex {vertex} has a filled slot after an empty one")]
    GapInRow { vertex: usize },
    #[error("edge {u}-{v} is recorded on only one endpoint")]
    Asymmetric { u: usize, v: usize },
}

/// Per-vertex slot rows plus degree counters. The only mutable search state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyStore {
    n: usize,
    k: usize,
    /// Row-major `n * k` slots; row `v` is `slots[v*k .. (v+1)*k]`.
    slots: Vec<Option<usize>>,
    degree: Vec<usize>,
}

impl AdjacencyStore {
    /// Empty store: `n` vertices, `k` empty slots each.
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            slots: vec![None; n * k],
            degree: vec![0; n],
        }
    }

    /// Seed from explicit slot rows (one row of length `k` per vertex).
    ///
    /// Degree counters are recomputed by scanning the filled prefix of each row.
    /// Rows with a filled slot after an empty one, or neighbors outside `[0, n)`,
    /// are rejected. Symmetry is not checked here; see `verify::check_structure`.
    pub fn from_slots(k: usize, rows: Vec<Vec<Option<usize>>>) -> Result<Self, StoreError> {
        let n = rows.len();
        let mut store = Self::new(n, k);
        for (v, row) in rows.into_iter().enumerate() {
            if row.len() != k {
                return Err(StoreError::RowLength {
                    vertex: v,
                    expected: k,
                    found: row.len(),
                });
            }
            let filled = row.iter().take_while(|s| s.is_some()).count();
            if row[filled..].iter().any(Option::is_some) {
                return Err(StoreError::GapInRow { vertex: v });
            }
            for (i, slot) in row.into_iter().enumerate() {
                if let Some(u) = slot {
                    if u >= n {
                        return Err(StoreError::VertexOutOfRange { vertex: u, n });
                    }
                }
                store.slots[v * k + i] = slot;
            }
            store.degree[v] = filled;
        }
        Ok(store)
    }

    /// Seed from an edge list, adding edges in the given order.
    pub fn from_edges(n: usize, k: usize, edges: &[(usize, usize)]) -> Result<Self, StoreError> {
        let mut store = Self::new(n, k);
        for &(u, v) in edges {
            store.add_edge(u, v)?;
        }
        Ok(store)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Slots per vertex (the target degree).
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.degree[v]
    }

    /// Degree counters for all vertices.
    #[inline]
    pub fn degrees(&self) -> &[usize] {
        &self.degree
    }

    /// Raw slot row of `v`, empty slots included.
    #[inline]
    pub fn row(&self, v: usize) -> &[Option<usize>] {
        &self.slots[v * self.k..(v + 1) * self.k]
    }

    /// Placed neighbors of `v` in insertion order.
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.row(v)[..self.degree[v]].iter().flatten().copied()
    }

    /// Most recently placed neighbor of `v`.
    pub fn last_neighbor(&self, v: usize) -> Option<usize> {
        let d = self.degree[v];
        if d == 0 {
            None
        } else {
            self.slots[v * self.k + d - 1]
        }
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.neighbors(u).any(|w| w == v)
    }

    pub fn edge_count(&self) -> usize {
        self.degree.iter().sum::<usize>() / 2
    }

    /// True when every vertex has all `k` slots filled.
    pub fn is_regular(&self) -> bool {
        self.degree.iter().all(|&d| d == self.k)
    }

    /// Append the edge `{ni, nj}` to the next free slot on both ends.
    pub fn add_edge(&mut self, ni: usize, nj: usize) -> Result<(), StoreError> {
        self.check_vertex(ni)?;
        self.check_vertex(nj)?;
        if ni == nj {
            return Err(StoreError::SelfLoop { vertex: ni });
        }
        for v in [ni, nj] {
            if self.degree[v] >= self.k {
                return Err(StoreError::DegreeFull { vertex: v, k: self.k });
            }
        }
        if self.has_edge(ni, nj) {
            return Err(StoreError::DuplicateEdge { u: ni, v: nj });
        }
        self.push_slot(ni, nj);
        self.push_slot(nj, ni);
        Ok(())
    }

    /// Undo the most recently filled slot of `v` and its twin; returns the former neighbor.
    pub fn remove_last_edge(&mut self, v: usize) -> Result<usize, StoreError> {
        self.check_vertex(v)?;
        let u = self
            .last_neighbor(v)
            .ok_or(StoreError::NoEdgeToRemove { vertex: v })?;
        let pos = self
            .neighbors(u)
            .position(|w| w == v)
            .ok_or(StoreError::Asymmetric { u: v, v: u })?;
        self.degree[v] -= 1;
        self.slots[v * self.k + self.degree[v]] = None;
        // In LIFO use `pos` is the last filled slot of `u`; shifting keeps the
        // remaining prefix ordered otherwise.
        let base = u * self.k;
        let d = self.degree[u];
        self.slots[base + pos..base + d].rotate_left(1);
        self.degree[u] -= 1;
        self.slots[base + self.degree[u]] = None;
        Ok(u)
    }

    /// Every edge once, as `(min, max)`, sorted.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut out: Vec<(usize, usize)> = (0..self.n)
            .flat_map(|u| self.neighbors(u).filter(move |&v| u < v).map(move |v| (u, v)))
            .collect();
        out.sort_unstable();
        out
    }

    /// Sorted neighbor list per vertex, for serialization by callers.
    pub fn to_neighbor_lists(&self) -> Vec<Vec<usize>> {
        (0..self.n)
            .map(|v| {
                let mut row: Vec<usize> = self.neighbors(v).collect();
                row.sort_unstable();
                row
            })
            .collect()
    }

    #[inline]
    fn push_slot(&mut self, v: usize, w: usize) {
        let d = self.degree[v];
        self.slots[v * self.k + d] = Some(w);
        self.degree[v] = d + 1;
    }

    #[inline]
    fn check_vertex(&self, v: usize) -> Result<(), StoreError> {
        if v < self.n {
            Ok(())
        } else {
            Err(StoreError::VertexOutOfRange { vertex: v, n: self.n })
        }
    }
}
