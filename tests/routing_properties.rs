//! Graph-wide shortest-path properties on the bundled store.

mod fixtures;

use aisle_router::graph::{PointId, StoreGraph};
use aisle_router::shortest_path::{dijkstra, PathEngine};
use aisle_router::traits::PathOracle;

use fixtures::id;

fn all_points(graph: &StoreGraph) -> Vec<PointId> {
    graph.points().map(|point| point.name.clone()).collect()
}

#[test]
fn test_distance_and_path_are_symmetric() {
    let graph = StoreGraph::bundled();
    let points = all_points(&graph);

    for p in &points {
        for q in &points {
            let forward = dijkstra(&graph, p, q).unwrap();
            let backward = dijkstra(&graph, q, p).unwrap();
            assert_eq!(forward.distance, backward.distance, "{} <-> {}", p, q);
        }
    }

    // through the cache the reverse path is exactly the reversed forward path
    let engine = PathEngine::new(&graph);
    for p in &points {
        for q in &points {
            let forward = engine.shortest_path(p, q).unwrap();
            let backward = engine.shortest_path(q, p).unwrap();
            assert_eq!(forward.reversed(), backward, "{} <-> {}", p, q);
        }
    }
}

#[test]
fn test_self_path_is_zero() {
    let graph = StoreGraph::bundled();
    let engine = PathEngine::new(&graph);
    for p in all_points(&graph) {
        let result = engine.shortest_path(&p, &p).unwrap();
        assert_eq!(result.path, vec![p.clone()]);
        assert_eq!(result.distance, 0.0);
    }
}

#[test]
fn test_triangle_inequality() {
    let graph = StoreGraph::bundled();
    let engine = PathEngine::new(&graph);
    let points = all_points(&graph);

    for p in &points {
        for q in &points {
            for r in &points {
                let pr = engine.shortest_path(p, r).unwrap().distance;
                let pq = engine.shortest_path(p, q).unwrap().distance;
                let qr = engine.shortest_path(q, r).unwrap().distance;
                assert!(pr <= pq + qr, "d({p},{r})={pr} > d({p},{q})+d({q},{r})={}", pq + qr);
            }
        }
    }
}

#[test]
fn test_paths_walk_real_edges() {
    let graph = StoreGraph::bundled();
    let points = all_points(&graph);

    for p in &points {
        for q in &points {
            let result = dijkstra(&graph, p, q).unwrap();
            assert_eq!(result.path.first(), Some(p));
            assert_eq!(result.path.last(), Some(q));

            let walked: f64 = result
                .path
                .windows(2)
                .map(|pair| {
                    graph
                        .edge_cost(pair[0].as_str(), pair[1].as_str())
                        .unwrap_or_else(|| panic!("{} -> {} is not an edge", pair[0], pair[1]))
                })
                .sum();
            assert_eq!(walked, result.distance, "path cost for {} -> {}", p, q);
        }
    }
}

#[test]
fn test_each_pair_searched_once() {
    let graph = StoreGraph::bundled();
    let engine = PathEngine::new(&graph);
    let points = all_points(&graph);

    for _ in 0..3 {
        for p in &points {
            for q in &points {
                engine.shortest_path(p, q).unwrap();
            }
        }
    }

    let n = points.len();
    let unordered_pairs = n * (n - 1) / 2;
    // self paths are answered without searching or caching
    assert_eq!(engine.cache().len(), unordered_pairs);
    assert_eq!(engine.searches(), unordered_pairs);
}

#[test]
fn test_unknown_point_is_reported() {
    let graph = StoreGraph::bundled();
    let engine = PathEngine::new(&graph);
    let err = engine.shortest_path(&id("J"), &id("K")).unwrap_err();
    assert!(matches!(err, aisle_router::error::RouteError::UnknownPoint(p) if p == "K"));
    assert!(engine.cache().is_empty());
}

#[test]
fn test_concurrent_queries_share_cache() {
    let graph = StoreGraph::bundled();
    let engine = PathEngine::new(&graph);
    let points = all_points(&graph);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for p in &points {
                    for q in &points {
                        let cached = engine.shortest_path(p, q).unwrap();
                        let fresh = dijkstra(&graph, p, q).unwrap();
                        assert_eq!(cached.distance, fresh.distance);
                    }
                }
            });
        }
    });

    let n = points.len();
    assert_eq!(engine.cache().len(), n * (n - 1) / 2);
    assert_eq!(engine.searches(), n * (n - 1) / 2, "each pair searched once across threads");
}
