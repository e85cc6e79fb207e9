//! Unit tests for gs-graph.
//!
//! All tests use hand-built graphs so they run without any OSM file.

#[cfg(test)]
mod helpers {
    use gs_core::{GeoPoint, NodeId, SpatialKey};

    use crate::{EdgeDirection, EdgeMeta, Graph};

    pub fn key(lat: f64, lon: f64) -> SpatialKey {
        SpatialKey::from_geo(GeoPoint::new(lat, lon)).unwrap()
    }

    /// A graph of `n` nodes laid out along a line of latitude near Medellín.
    pub fn graph_with_nodes(n: usize) -> (Graph, Vec<NodeId>) {
        let mut g = Graph::with_capacity(n);
        let ids = (0..n).map(|i| g.add_node(key(6.25, -75.60 + i as f64 * 0.001))).collect();
        (g, ids)
    }

    pub fn both(g: &mut Graph, a: NodeId, b: NodeId, weight: f32) {
        g.relate(a, b, weight, EdgeDirection::Bidirectional, EdgeMeta::with_distance(weight * 10.0))
            .unwrap();
    }

    /// Chain 0 - 1 - 2 - 3 with weights 1, 2, 3.
    pub fn chain() -> (Graph, Vec<NodeId>) {
        let (mut g, n) = graph_with_nodes(4);
        both(&mut g, n[0], n[1], 1.0);
        both(&mut g, n[1], n[2], 2.0);
        both(&mut g, n[2], n[3], 3.0);
        (g, n)
    }

    /// Six-node hexagon A..F (ids 0..5):
    ///
    /// ```text
    ///   A -1- B -1- C
    ///   |           |
    ///   2           1
    ///   |           |
    ///   E -2- F -2- D
    /// ```
    pub fn hexagon() -> (Graph, Vec<NodeId>) {
        let (mut g, n) = graph_with_nodes(6);
        let [a, b, c, d, e, f] = [n[0], n[1], n[2], n[3], n[4], n[5]];
        both(&mut g, a, b, 1.0);
        both(&mut g, a, e, 2.0);
        both(&mut g, e, f, 2.0);
        both(&mut g, f, d, 2.0);
        both(&mut g, b, c, 1.0);
        both(&mut g, c, d, 1.0);
        (g, n)
    }
}

// ── Bitset ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod bitset {
    use crate::Bitset;

    #[test]
    fn empty() {
        let b = Bitset::new();
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
        assert!(!b.exists(0));
        assert!(!b.exists(10_000));
    }

    #[test]
    fn set_and_clear_across_words() {
        let mut b = Bitset::new();
        for i in [0, 63, 64, 130, 1_000] {
            b.set(i, true);
        }
        for i in [0, 63, 64, 130, 1_000] {
            assert!(b.exists(i), "bit {i}");
        }
        assert!(!b.exists(1));
        assert!(!b.exists(65));
        assert_eq!(b.count_ones(), 5);
        assert_eq!(b.len(), 1_001);

        b.set(1_000, false);
        assert!(!b.exists(1_000));
        assert_eq!(b.len(), 131);
    }

    #[test]
    fn clearing_past_end_does_not_grow() {
        let mut b = Bitset::with_capacity(8);
        b.set(5_000, false);
        assert!(b.is_empty());
        assert!(!b.exists(5_000));
    }

    #[test]
    fn set_is_idempotent() {
        let mut b = Bitset::new();
        b.set(7, true);
        b.set(7, true);
        assert_eq!(b.count_ones(), 1);
        b.clear();
        assert!(b.is_empty());
    }
}

// ── Priority queue ────────────────────────────────────────────────────────────

#[cfg(test)]
mod heap {
    use gs_core::NodeId;
    use proptest::prelude::*;

    use crate::{FrontierEntry, PriorityQueue};

    fn entry(node: u32, cost: f32) -> FrontierEntry {
        FrontierEntry { cost, ..FrontierEntry::source(NodeId(node)) }
    }

    #[test]
    fn empty_queue_yields_none() {
        let mut q = PriorityQueue::new();
        assert!(q.peek_min().is_none());
        assert!(q.delete_min().is_none());
    }

    #[test]
    fn pops_in_cost_order() {
        let mut q = PriorityQueue::new();
        for (node, cost) in [(0, 5.0), (1, 1.0), (2, 3.0), (3, 0.5), (4, 4.0)] {
            q.insert(entry(node, cost));
        }
        assert_eq!(q.peek_min().unwrap().node, NodeId(3));
        let order: Vec<u32> = std::iter::from_fn(|| q.delete_min()).map(|e| e.node.0).collect();
        assert_eq!(order, vec![3, 1, 2, 4, 0]);
        assert!(q.is_empty());
    }

    #[test]
    fn duplicate_nodes_are_kept() {
        let mut q = PriorityQueue::new();
        q.insert(entry(7, 9.0));
        q.insert(entry(7, 2.0));
        assert_eq!(q.len(), 2);
        assert_eq!(q.delete_min().unwrap().cost, 2.0);
        assert_eq!(q.delete_min().unwrap().cost, 9.0);
    }

    #[test]
    fn source_entry_has_no_predecessor() {
        let e = FrontierEntry::source(NodeId(4));
        assert_eq!(e.cost, 0.0);
        assert_eq!(e.depth, 0);
        assert_eq!(e.previous, None);
    }

    proptest! {
        #[test]
        fn delete_min_is_non_decreasing(costs in prop::collection::vec(0.0f32..1_000.0, 0..200)) {
            let mut q = PriorityQueue::new();
            for (i, &c) in costs.iter().enumerate() {
                q.insert(entry(i as u32, c));
            }
            let popped: Vec<f32> = std::iter::from_fn(|| q.delete_min()).map(|e| e.cost).collect();
            prop_assert_eq!(popped.len(), costs.len());
            prop_assert!(popped.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}

// ── Graph structure ───────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use gs_core::NodeId;

    use super::helpers::{graph_with_nodes, key};
    use crate::{EdgeDirection, EdgeMeta, Graph, GraphError};

    #[test]
    fn empty_graph() {
        let g = Graph::new();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert!(g.out_edges(NodeId(0)).is_empty());
        assert!(g.position(NodeId(0)).is_none());
    }

    #[test]
    fn ids_are_sequential() {
        let mut g = Graph::new();
        let a = g.add_node(key(6.2, -75.5));
        let b = g.add_node(key(6.3, -75.5));
        assert_eq!((a, b), (NodeId(0), NodeId(1)));
        assert_eq!(g.node(b).unwrap().id, b);
        assert_eq!(g.node(a).unwrap().rank, 0);
        let p = g.position(a).unwrap();
        assert!((p.lat - 6.2).abs() < 1e-6 && (p.lon + 75.5).abs() < 1e-6);
    }

    #[test]
    fn bidirectional_writes_four_entries() {
        let (mut g, n) = graph_with_nodes(2);
        g.relate(n[0], n[1], 3.0, EdgeDirection::Bidirectional, EdgeMeta::default()).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.out_edges(n[0])[0].node, n[1]);
        assert_eq!(g.out_edges(n[1])[0].node, n[0]);
        assert_eq!(g.in_edges(n[0])[0].node, n[1]);
        assert_eq!(g.in_edges(n[1])[0].node, n[0]);
    }

    #[test]
    fn one_way_directions() {
        let (mut g, n) = graph_with_nodes(4);
        g.relate(n[0], n[1], 1.0, EdgeDirection::LeftToRight, EdgeMeta::default()).unwrap();
        g.relate(n[2], n[3], 1.0, EdgeDirection::RightToLeft, EdgeMeta::default()).unwrap();

        assert_eq!(g.out_degree(n[0]), 1);
        assert_eq!(g.out_degree(n[1]), 0);
        assert_eq!(g.in_degree(n[1]), 1);

        assert_eq!(g.out_degree(n[2]), 0);
        assert_eq!(g.out_degree(n[3]), 1);
        assert_eq!(g.out_edges(n[3])[0].node, n[2]);
        assert_eq!(g.in_edges(n[2])[0].node, n[3]);
    }

    #[test]
    fn outgoing_and_incoming_agree() {
        let (mut g, n) = graph_with_nodes(5);
        let pairs = [(0, 1, 1.5), (1, 2, 2.5), (2, 0, 0.5), (3, 4, 7.0), (1, 3, 1.0)];
        for (a, b, w) in pairs {
            g.relate(n[a], n[b], w, EdgeDirection::LeftToRight, EdgeMeta::with_distance(w * 2.0))
                .unwrap();
        }
        for node in g.nodes() {
            for e in g.out_edges(node.id) {
                let back = g.in_edges(e.node).iter().find(|i| i.node == node.id).unwrap();
                assert_eq!(back.weight, e.weight);
                assert_eq!(back.meta, e.meta);
            }
        }
        let total_in: usize = g.nodes().iter().map(|n| g.in_degree(n.id)).sum();
        assert_eq!(total_in, g.edge_count());
    }

    #[test]
    fn relate_unknown_node_is_rejected() {
        let (mut g, n) = graph_with_nodes(2);
        let err = g
            .relate(n[0], NodeId(9), 1.0, EdgeDirection::Bidirectional, EdgeMeta::default())
            .unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(NodeId(9))));
        assert_eq!(g.edge_count(), 0, "nothing written on failure");
    }
}

// ── Search scenarios ──────────────────────────────────────────────────────────

#[cfg(test)]
mod search {
    use gs_core::NodeId;

    use super::helpers::{both, chain, graph_with_nodes, hexagon};
    use crate::{Criteria, DijkstraSearch, GraphError, Termination, INFINITE};

    #[test]
    fn chain_cost() {
        let (g, n) = chain();
        let r = DijkstraSearch::new(&Criteria::between(n[0], n[3])).run(&g);
        assert_eq!(r.termination, Termination::TargetReached);
        assert_eq!(r.cost_to(n[3]).unwrap(), 6.0);
        assert_eq!(r.nodes_to(n[3]).unwrap(), n);
    }

    #[test]
    fn hexagon_prefers_cheaper_route() {
        let (g, n) = hexagon();
        let r = DijkstraSearch::new(&Criteria::between(n[0], n[5])).run(&g);
        assert_eq!(r.cost_to(n[5]).unwrap(), 4.0);
        assert_eq!(r.nodes_to(n[5]).unwrap(), vec![n[0], n[4], n[5]]);
    }

    #[test]
    fn hexagon_full_exploration() {
        let (g, n) = hexagon();
        let r = DijkstraSearch::new(&Criteria::from_sources([n[0]])).run(&g);
        assert_eq!(r.termination, Termination::FrontierExhausted);
        let expected = [0.0, 1.0, 2.0, 3.0, 2.0, 4.0];
        for (id, want) in n.iter().zip(expected) {
            assert_eq!(r.costs.get(*id), Some(want), "node {id}");
        }
        assert_eq!(r.tree.len(), 6);
    }

    #[test]
    fn unreachable_target() {
        let (mut g, n) = graph_with_nodes(4);
        both(&mut g, n[0], n[1], 1.0);
        both(&mut g, n[2], n[3], 1.0);

        let r = DijkstraSearch::new(&Criteria::between(n[0], n[3])).run(&g);
        assert_eq!(r.termination, Termination::FrontierExhausted);
        assert!(matches!(r.cost_to(n[3]), Err(GraphError::NoPath { target }) if target == n[3]));
        assert_eq!(r.costs.get_or_infinite(n[3]), INFINITE);
        assert!(r.path_to(n[3], &g).is_err());
    }

    #[test]
    fn multiple_sources_take_minimum() {
        // 0 -5- 1 -5- 2 -1- 3   sources 0 and 3
        let (mut g, n) = graph_with_nodes(4);
        both(&mut g, n[0], n[1], 5.0);
        both(&mut g, n[1], n[2], 5.0);
        both(&mut g, n[2], n[3], 1.0);

        let search = DijkstraSearch::new(&Criteria::from_sources([n[0], n[3]]));
        assert!(search.is_source(n[0]) && search.is_source(n[3]));
        assert!(!search.is_source(n[1]));
        assert_eq!(search.target(), None);

        let r = search.run(&g);
        assert_eq!(r.costs.get(n[0]), Some(0.0));
        assert_eq!(r.costs.get(n[3]), Some(0.0));
        assert_eq!(r.costs.get(n[2]), Some(1.0));
        assert_eq!(r.costs.get(n[1]), Some(5.0));
        assert_eq!(r.nodes_to(n[2]).unwrap(), vec![n[3], n[2]]);
    }

    #[test]
    fn source_equals_target() {
        let (g, n) = chain();
        let r = DijkstraSearch::new(&Criteria::between(n[2], n[2])).run(&g);
        assert_eq!(r.termination, Termination::TargetReached);
        assert_eq!(r.cost_to(n[2]).unwrap(), 0.0);
        assert_eq!(r.tree.len(), 1);
        assert_eq!(r.path_to(n[2], &g).unwrap().len(), 1);
    }

    #[test]
    fn one_way_edge_is_respected() {
        let (mut g, n) = graph_with_nodes(2);
        g.relate(n[0], n[1], 1.0, crate::EdgeDirection::LeftToRight, Default::default()).unwrap();

        let forward = DijkstraSearch::new(&Criteria::between(n[0], n[1])).run(&g);
        assert_eq!(forward.cost_to(n[1]).unwrap(), 1.0);
        let backward = DijkstraSearch::new(&Criteria::between(n[1], n[0])).run(&g);
        assert!(backward.cost_to(n[0]).is_err());
    }

    #[test]
    fn no_sources_is_empty() {
        let (g, _) = chain();
        let r = DijkstraSearch::new(&Criteria::default()).run(&g);
        assert!(r.tree.is_empty());
        assert!(r.costs.is_empty());
        assert_eq!(r.termination, Termination::FrontierExhausted);
    }

    #[test]
    fn only_first_target_stops_the_search() {
        let (g, n) = chain();
        let criteria = Criteria::between(n[0], n[1]).with_target(n[3]);
        let r = DijkstraSearch::new(&criteria).run(&g);
        assert_eq!(r.termination, Termination::TargetReached);
        assert!(r.tree.tree_id(n[3]).is_none());
        assert_eq!(r.costs.get(n[3]), None);
        assert_eq!(r.tree.len(), 2);
        assert!(r.costs.get(NodeId(2)).is_none(), "target is not relaxed");
    }
}

// ── Shortest-path tree ────────────────────────────────────────────────────────

#[cfg(test)]
mod tree {
    use super::helpers::{chain, hexagon};
    use crate::{Criteria, DijkstraSearch};

    #[test]
    fn tree_nodes_point_back_to_graph() {
        let (g, n) = hexagon();
        let r = DijkstraSearch::new(&Criteria::from_sources([n[0]])).run(&g);
        for &id in &n {
            let t = r.tree.tree_id(id).unwrap();
            assert_eq!(r.tree.origin(t), Some(id));
            assert_eq!(r.tree.cost(t), r.costs.get(id));
        }
        // The first finalized node is the source.
        assert_eq!(r.tree.origin(gs_core::NodeId(0)), Some(n[0]));
    }

    #[test]
    fn roots_have_no_parent_and_edges_hold_deltas() {
        let (g, n) = chain();
        let r = DijkstraSearch::new(&Criteria::from_sources([n[0]])).run(&g);
        let root = r.tree.tree_id(n[0]).unwrap();
        assert_eq!(r.tree.parent(root), None);

        // One edge per non-root tree node.
        assert_eq!(r.tree.graph().edge_count(), r.tree.len() - 1);

        let t3 = r.tree.tree_id(n[3]).unwrap();
        let t2 = r.tree.tree_id(n[2]).unwrap();
        assert_eq!(r.tree.parent(t3), Some(t2));
        let edge = r.tree.graph().in_edges(t3)[0];
        assert_eq!(edge.weight, 3.0);
        assert_eq!(edge.meta.distance_m, 30.0);
        assert_eq!(r.tree.cost(t3), Some(6.0));
        assert_eq!(r.tree.distance(t3), Some(60.0));
    }

    #[test]
    fn path_coords_are_target_first() {
        let (g, n) = chain();
        let r = DijkstraSearch::new(&Criteria::between(n[0], n[3])).run(&g);
        let t3 = r.tree.tree_id(n[3]).unwrap();

        let back = r.tree.path_coords(t3, &g);
        let expected: Vec<_> = n.iter().rev().map(|&id| g.position(id).unwrap()).collect();
        assert_eq!(back, expected);
        assert_eq!(r.tree.path_nodes(t3), n.iter().rev().copied().collect::<Vec<_>>());

        let forward = r.path_to(n[3], &g).unwrap();
        assert_eq!(forward.first(), g.position(n[0]).as_ref());
        assert_eq!(forward.last(), g.position(n[3]).as_ref());
    }

    #[test]
    fn unknown_tree_id_gives_empty_path() {
        let (g, n) = chain();
        let r = DijkstraSearch::new(&Criteria::between(n[0], n[1])).run(&g);
        assert!(r.tree.path_nodes(gs_core::NodeId(99)).is_empty());
        assert!(r.tree.path_coords(gs_core::NodeId(99), &g).is_empty());
    }
}

// ── Property: agrees with Bellman-Ford ────────────────────────────────────────

#[cfg(test)]
mod oracle {
    use gs_core::NodeId;
    use proptest::prelude::*;

    use super::helpers::graph_with_nodes;
    use crate::{Criteria, DijkstraSearch, EdgeDirection, EdgeMeta};

    /// Bellman-Ford over directed `(from, to, weight)` edges.
    fn bellman_ford(n: usize, edges: &[(usize, usize, u8)], source: usize) -> Vec<Option<u32>> {
        let mut dist = vec![None; n];
        dist[source] = Some(0u32);
        for _ in 0..n {
            for &(a, b, w) in edges {
                if let Some(da) = dist[a] {
                    let cand = da + w as u32;
                    if dist[b].is_none_or(|db| cand < db) {
                        dist[b] = Some(cand);
                    }
                }
            }
        }
        dist
    }

    fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize, u8)>)> {
        (2usize..14).prop_flat_map(|n| {
            let edge = (0..n, 0..n, 1u8..20);
            (Just(n), prop::collection::vec(edge, 0..40))
        })
    }

    proptest! {
        #[test]
        fn costs_match_bellman_ford((n, edges) in arb_graph()) {
            let (mut g, ids) = graph_with_nodes(n);
            for &(a, b, w) in &edges {
                g.relate(ids[a], ids[b], w as f32, EdgeDirection::LeftToRight, EdgeMeta::default())
                    .unwrap();
            }

            let r = DijkstraSearch::new(&Criteria::from_sources([NodeId(0)])).run(&g);
            let expected = bellman_ford(n, &edges, 0);

            for (i, want) in expected.into_iter().enumerate() {
                let got = r.costs.get(ids[i]);
                prop_assert_eq!(got, want.map(|c| c as f32), "node {}", i);
                // Tree weights sum to the reported cost.
                if want.is_some() {
                    let t = r.tree.tree_id(ids[i]).unwrap();
                    let mut sum = 0.0f32;
                    let mut cur = t;
                    while let Some(p) = r.tree.parent(cur) {
                        sum += r.tree.graph().in_edges(cur)[0].weight;
                        cur = p;
                    }
                    prop_assert_eq!(sum, got.unwrap());
                }
            }
        }
    }
}

// ── Node index ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use gs_core::GeoPoint;

    use super::helpers::{both, graph_with_nodes, key};
    use crate::{EdgeDirection, EdgeMeta, Graph};

    #[test]
    fn empty_graph_has_empty_index() {
        let idx = Graph::new().build_node_index();
        assert!(idx.is_empty());
        assert!(idx.snap(GeoPoint::new(6.25, -75.6)).is_none());
        assert!(idx.within(GeoPoint::new(6.25, -75.6), 1e6).is_empty());
    }

    #[test]
    fn only_nodes_with_outgoing_edges_are_indexed() {
        let (mut g, n) = graph_with_nodes(4);
        g.relate(n[0], n[1], 1.0, EdgeDirection::LeftToRight, EdgeMeta::default()).unwrap();
        both(&mut g, n[2], n[3], 1.0);

        let idx = g.build_node_index();
        assert_eq!(idx.len(), 3, "n[1] is a dead end");
        assert_eq!(idx.kdtree().dim(), 2);

        // Querying exactly at n[1] snaps to a neighbour instead.
        let (snapped, d) = idx.snap(g.position(n[1]).unwrap()).unwrap();
        assert_ne!(snapped, n[1]);
        assert!(d > 50.0 && d < 200.0, "about 0.001 degrees away, got {d}");
    }

    #[test]
    fn snap_picks_nearest() {
        let mut g = Graph::new();
        let a = g.add_node(key(6.2442, -75.5812));
        let b = g.add_node(key(6.2518, -75.5636));
        let c = g.add_node(key(6.2300, -75.5900));
        both(&mut g, a, b, 1.0);
        both(&mut g, b, c, 1.0);

        let idx = g.build_node_index();
        assert_eq!(idx.snap(GeoPoint::new(6.2440, -75.5810)).unwrap().0, a);
        assert_eq!(idx.snap(GeoPoint::new(6.2520, -75.5640)).unwrap().0, b);
        let (at_c, d) = idx.snap(GeoPoint::new(6.2300, -75.5900)).unwrap();
        assert_eq!(at_c, c);
        assert!(d < 1.0);
    }

    #[test]
    fn within_radius() {
        let (mut g, n) = graph_with_nodes(5);
        for w in n.windows(2) {
            both(&mut g, w[0], w[1], 1.0);
        }
        let idx = g.build_node_index();
        let centre = g.position(n[2]).unwrap();

        // Neighbours are about 111 projected metres apart at this latitude.
        let mut near = idx.within(centre, 150.0);
        near.sort();
        assert_eq!(near, vec![n[1], n[2], n[3]]);
        assert_eq!(idx.within(centre, 1.0), vec![n[2]]);
        assert_eq!(idx.within(centre, 10_000.0).len(), 5);
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "serde"))]
mod serde_json_roundtrip {
    use super::helpers::hexagon;
    use crate::Graph;

    #[test]
    fn graph_survives_json() {
        let (g, n) = hexagon();
        let text = serde_json::to_string(&g).unwrap();
        let back: Graph = serde_json::from_str(&text).unwrap();
        assert_eq!(back.node_count(), g.node_count());
        assert_eq!(back.edge_count(), g.edge_count());
        for &id in &n {
            assert_eq!(back.node(id), g.node(id));
            assert_eq!(back.out_edges(id), g.out_edges(id));
            assert_eq!(back.in_edges(id), g.in_edges(id));
        }
    }
}

// ── Parallel batch ────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parallel"))]
mod batch {
    use super::helpers::hexagon;
    use crate::{search_many, Criteria, DijkstraSearch};

    #[test]
    fn matches_sequential_runs() {
        let (g, n) = hexagon();
        let criteria: Vec<Criteria> = n.iter().map(|&s| Criteria::between(s, n[5])).collect();
        let responses = search_many(&g, &criteria);
        assert_eq!(responses.len(), criteria.len());
        for (c, r) in criteria.iter().zip(&responses) {
            let solo = DijkstraSearch::new(c).run(&g);
            assert_eq!(r.cost_to(n[5]).unwrap(), solo.cost_to(n[5]).unwrap());
        }
        assert_eq!(responses[0].cost_to(n[5]).unwrap(), 4.0);
    }
}
