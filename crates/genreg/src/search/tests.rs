//! End-to-end runs of the cycle search on small parameters.

use super::driver::degree_ceiling;
use super::*;
use crate::adjacency::AdjacencyStore;
use crate::error::GenRegError;
use crate::girth::EdgeView;
use crate::verify::{check_structure, girth, is_k_regular};

fn assert_valid(c: &Construction, p: Params) {
    assert_eq!(c.graph.vertex_count(), p.n);
    assert!(is_k_regular(&c.graph, p.k), "degrees {:?}", c.graph.degrees());
    assert_eq!(check_structure(&c.graph), Ok(()));
    if let Some(gi) = girth(&c.graph) {
        assert!(gi >= p.g, "girth {gi} < {}", p.g);
    }
}

#[test]
fn complete_graph_on_four_vertices() {
    let c = construct(4, 3, 3).unwrap();
    assert_valid(&c, Params::new(4, 3, 3));
    assert_eq!(girth(&c.graph), Some(3));
    assert_eq!(c.graph.edge_count(), 6);
    assert_eq!(
        c.stack.as_slice(),
        &[
            ResumePoint { pass: 0, origin: 0, closing: 0 },
            ResumePoint { pass: 2, origin: 0, closing: 2 },
            ResumePoint { pass: 2, origin: 1, closing: 3 },
        ]
    );
}

#[test]
fn hexagon_for_degree_two_girth_six() {
    let c = construct(6, 2, 6).unwrap();
    assert_valid(&c, Params::new(6, 2, 6));
    assert_eq!(girth(&c.graph), Some(6));
    assert_eq!(
        c.graph.edges(),
        vec![(0, 1), (0, 5), (1, 2), (2, 3), (3, 4), (4, 5)]
    );
    assert_eq!(c.stats.cycle_backtracks, 0);
}

#[test]
fn cubic_girth_five_on_ten_vertices() {
    let p = Params::new(10, 3, 5);
    let c = Search::new(p).run().unwrap();
    assert_valid(&c, p);
    assert_eq!(girth(&c.graph), Some(5));
    // Reaching the Petersen graph in cycle order takes many reopened cycles.
    assert!(c.stats.cycle_backtracks > 0);
    assert_eq!(c.stats.edges_added - c.stats.edges_removed, 15);
    assert_eq!(c.graph.to_neighbor_lists()[0], vec![1, 4, 5]);
}

#[test]
fn cubic_girth_six_on_fourteen_vertices() {
    let p = Params::new(14, 3, 6);
    let c = Search::new(p).run().unwrap();
    assert_valid(&c, p);
    assert_eq!(girth(&c.graph), Some(6));
}

#[test]
fn cubic_girth_four_on_eight_vertices_backtracks() {
    let c = construct(8, 3, 4).unwrap();
    assert_valid(&c, Params::new(8, 3, 4));
    assert_eq!(c.stats.cycle_backtracks, 4);
    assert_eq!(c.graph.to_neighbor_lists()[0], vec![1, 3, 7]);
}

#[test]
fn odd_degree_uses_single_edge_pass() {
    let c = construct(4, 1, 3).unwrap();
    assert_eq!(c.graph.edges(), vec![(0, 1), (2, 3)]);
    assert!(c.stack.as_slice().iter().all(|pt| pt.pass == 0));
}

#[test]
fn larger_degrees() {
    for (n, k, g) in [(8, 4, 4), (12, 4, 4), (7, 4, 3), (16, 5, 4)] {
        let p = Params::new(n, k, g);
        let c = Search::new(p).run().unwrap();
        assert_valid(&c, p);
    }
}

#[test]
fn odd_n_and_k_is_infeasible() {
    let err = construct(5, 3, 3).unwrap_err();
    assert!(matches!(
        err,
        GenRegError::InfeasibleParameters { n: 5, k: 3, g: 3, .. }
    ));
    assert!(!err.is_not_found());
}

#[test]
fn below_cubic_girth_six_cage_is_rejected_before_search() {
    let err = construct(8, 3, 6).unwrap_err();
    assert!(matches!(err, GenRegError::InfeasibleParameters { .. }));
}

#[test]
fn rejecting_predicate_exhausts_search() {
    let err = Search::new(Params::new(6, 2, 6))
        .predicate(|_: &EdgeView<'_>| false)
        .run()
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        err,
        GenRegError::SearchExhausted { n: 6, k: 2, g: 6 }
    ));
}

#[test]
fn predicate_steers_the_first_cycle() {
    let no_01 = |e: &EdgeView<'_>| !matches!((e.ni, e.nj), (0, 1) | (1, 0));
    let c = Search::new(Params::new(6, 2, 6))
        .predicate(no_01)
        .run()
        .unwrap();
    assert!(!c.graph.has_edge(0, 1));
    assert_eq!(
        c.graph.to_neighbor_lists(),
        vec![
            vec![2, 5],
            vec![4, 5],
            vec![0, 3],
            vec![2, 4],
            vec![1, 3],
            vec![0, 1]
        ]
    );
}

#[test]
#[should_panic(expected = "predicate failure")]
fn predicate_panic_aborts_search() {
    let _ = Search::new(Params::new(6, 2, 6))
        .predicate(|e: &EdgeView<'_>| {
            if e.nj == 3 {
                panic!("predicate failure");
            }
            true
        })
        .run();
}

#[test]
fn seeded_hexagon_completes_to_k33() {
    let edges: Vec<(usize, usize)> = (0..6).map(|i| (i, (i + 1) % 6)).collect();
    let seed = AdjacencyStore::from_edges(6, 3, &edges).unwrap();
    let p = Params::new(6, 3, 4);
    let c = Search::new(p).seed(seed).run().unwrap();
    assert_valid(&c, p);
    assert_eq!(girth(&c.graph), Some(4));
    for v in 0..6 {
        assert!(c.graph.has_edge(v, (v + 3) % 6));
    }
    assert_eq!(c.stack.len(), 3);
}

#[test]
fn seed_with_short_cycle_is_rejected() {
    let seed = AdjacencyStore::from_edges(6, 3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
    let err = Search::new(Params::new(6, 3, 4)).seed(seed).run().unwrap_err();
    assert!(matches!(err, GenRegError::InvalidSeed { .. }));
}

#[test]
fn seed_with_uncompletable_degree_is_rejected() {
    // Vertex 1 sits at odd degree 1 < k = 4; no pass would ever extend it.
    let seed = AdjacencyStore::from_edges(8, 4, &[(0, 1), (0, 2)]).unwrap();
    let err = Search::new(Params::new(8, 4, 3)).seed(seed).run().unwrap_err();
    assert!(matches!(err, GenRegError::InvalidSeed { .. }));
}

#[test]
fn seed_of_wrong_shape_is_rejected() {
    let seed = AdjacencyStore::new(5, 2);
    let err = Search::new(Params::new(6, 2, 3)).seed(seed).run().unwrap_err();
    assert!(matches!(err, GenRegError::InvalidSeed { .. }));
}

#[test]
fn resume_requests_fail_fast() {
    let mut stack = BacktrackStack::new();
    stack.push(ResumePoint {
        pass: 0,
        origin: 0,
        closing: 0,
    });
    for s in [BacktrackStack::new(), stack] {
        let err = Search::new(Params::new(6, 2, 6))
            .resume_from(s)
            .run()
            .unwrap_err();
        assert!(matches!(err, GenRegError::UnsupportedResume));
    }
}

#[test]
fn ceiling_allows_second_edge_only_when_closing() {
    let p = Params::new(10, 4, 3);
    assert_eq!(degree_ceiling(p, 0, 0, 3), 1);
    assert_eq!(degree_ceiling(p, 0, 0, 0), 2);
    assert_eq!(degree_ceiling(p, 2, 5, 5), 4);
    // Odd k: the last pass places one edge, so the origin gets no allowance.
    let q = Params::new(10, 3, 3);
    assert_eq!(degree_ceiling(q, 2, 4, 4), 3);
    assert_eq!(degree_ceiling(q, 2, 4, 7), 3);
}

#[test]
fn stats_are_consistent() {
    let c = construct(10, 3, 5).unwrap();
    let s = c.stats;
    assert_eq!(s.cycles_closed - s.cycle_backtracks, c.stack.len() as u64);
    assert!(s.validity_checks >= s.edges_added);
}

#[test]
fn params_pass_helpers() {
    assert_eq!(Params::new(4, 3, 3).pass_count(), 2);
    assert_eq!(Params::new(4, 4, 3).pass_count(), 2);
    assert!(Params::new(4, 3, 3).is_edge_pass(2));
    assert!(!Params::new(4, 4, 3).is_edge_pass(2));
}
