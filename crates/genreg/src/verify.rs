//! Exact checks on finished graphs and seeds (independent of the search).

use std::collections::VecDeque;

use crate::adjacency::{AdjacencyStore, StoreError};

/// Range, self-loop, duplicate and symmetry check over every placed edge.
pub fn check_structure(store: &AdjacencyStore) -> Result<(), StoreError> {
    let n = store.vertex_count();
    for u in 0..n {
        let row: Vec<usize> = store.neighbors(u).collect();
        for (i, &v) in row.iter().enumerate() {
            if v >= n {
                return Err(StoreError::VertexOutOfRange { vertex: v, n });
            }
            if v == u {
                return Err(StoreError::SelfLoop { vertex: u });
            }
            if row[..i].contains(&v) {
                return Err(StoreError::DuplicateEdge { u, v });
            }
            if !store.has_edge(v, u) {
                return Err(StoreError::Asymmetric { u, v });
            }
        }
    }
    Ok(())
}

pub fn is_k_regular(store: &AdjacencyStore, k: usize) -> bool {
    store.degrees().iter().all(|&d| d == k)
}

/// Length of the shortest cycle, or `None` for a forest.
///
/// BFS from every vertex; a non-tree edge `u–w` closes a cycle of length at most
/// `dist[u] + dist[w] + 1`, and the minimum over all roots is exact.
pub fn girth(store: &AdjacencyStore) -> Option<usize> {
    let n = store.vertex_count();
    let mut best: Option<usize> = None;
    let mut dist = vec![usize::MAX; n];
    let mut parent = vec![usize::MAX; n];
    let mut queue = VecDeque::new();
    for root in 0..n {
        dist.iter_mut().for_each(|d| *d = usize::MAX);
        parent.iter_mut().for_each(|p| *p = usize::MAX);
        dist[root] = 0;
        queue.clear();
        queue.push_back(root);
        while let Some(u) = queue.pop_front() {
            if let Some(b) = best {
                // Nothing shorter can be found past this depth.
                if 2 * dist[u] + 1 >= b {
                    break;
                }
            }
            for w in store.neighbors(u) {
                if dist[w] == usize::MAX {
                    dist[w] = dist[u] + 1;
                    parent[w] = u;
                    queue.push_back(w);
                } else if parent[u] != w {
                    let len = dist[u] + dist[w] + 1;
                    best = Some(best.map_or(len, |b| b.min(len)));
                }
            }
        }
    }
    best
}
