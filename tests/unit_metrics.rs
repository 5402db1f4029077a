// tests/unit_metrics.rs
//! Structural metrics on graphs small enough to verify by hand.

use fracture_core::error::FractureError;
use fracture_core::graph::{AliveMask, DepGraph, GraphBuilder};
use fracture_core::metrics::assortativity::assortativity;
use fracture_core::metrics::clustering::{average_clustering, ClusteringOptions};
use fracture_core::metrics::components;
use fracture_core::metrics::degree::{self, DegreeKind};
use fracture_core::metrics::paths::{average_shortest_path, PathOptions};
use fracture_core::metrics::{summarize, MetricsOptions};

fn cycle(n: usize) -> DepGraph {
    let mut b = GraphBuilder::new("cycle");
    for i in 0..n {
        let u = format!("n{i}");
        let v = format!("n{}", (i + 1) % n);
        b.add_edge(&u, &v).unwrap();
    }
    b.build()
}

fn star(leaves: usize) -> DepGraph {
    let mut b = GraphBuilder::new("star");
    for i in 0..leaves {
        b.add_edge("hub", &format!("leaf{i}")).unwrap();
    }
    b.build()
}

#[test]
fn five_cycle_average_path_is_one_and_a_half() {
    let g = cycle(5);
    let s = average_shortest_path(&g, &PathOptions::default()).unwrap();

    assert!(s.exact);
    assert_eq!(s.lcc_size, 5);
    assert_eq!(s.pairs_counted, 20);
    assert!((s.average - 1.5).abs() < 1e-12);
    assert_eq!(s.max_distance, 2);
}

#[test]
fn five_cycle_assortativity_is_undefined() {
    // Every endpoint has the same in and out degree, so the degree
    // variance on both sides of every edge is zero.
    let err = assortativity(&cycle(5)).unwrap_err();
    match err {
        FractureError::UndefinedMetric { metric, .. } => assert_eq!(metric, "assortativity"),
        other => panic!("expected undefined metric, got {other}"),
    }
}

#[test]
fn star_assortativity_is_undefined() {
    let err = assortativity(&star(6)).unwrap_err();
    assert!(matches!(err, FractureError::UndefinedMetric { .. }));
}

#[test]
fn directed_paths_respect_edge_direction() {
    let mut b = GraphBuilder::new("chain");
    b.add_edge("a", "b").unwrap();
    b.add_edge("b", "c").unwrap();
    let g = b.build();

    let directed = PathOptions {
        directed: true,
        ..PathOptions::default()
    };
    let s = average_shortest_path(&g, &directed).unwrap();

    // Reachable ordered pairs: a->b, a->c, b->c.
    assert_eq!(s.pairs_counted, 3);
    assert!((s.average - 4.0 / 3.0).abs() < 1e-12);
}

#[test]
fn edgeless_graph_has_no_path_metric() {
    let mut b = GraphBuilder::new("isolated");
    b.add_node("alone");
    let g = b.build();

    let err = average_shortest_path(&g, &PathOptions::default()).unwrap_err();
    assert!(matches!(err, FractureError::DisconnectedGraph { .. }));
}

#[test]
fn triangle_clusters_fully_and_star_not_at_all() {
    let mut b = GraphBuilder::new("triangle");
    b.add_edge("a", "b").unwrap();
    b.add_edge("b", "c").unwrap();
    b.add_edge("c", "a").unwrap();
    let triangle = average_clustering(&b.build(), &ClusteringOptions::default()).unwrap();
    assert!((triangle.average - 1.0).abs() < 1e-12);

    let s = average_clustering(&star(5), &ClusteringOptions::default()).unwrap();
    assert_eq!(s.eligible_nodes, 1, "only the hub has two neighbors");
    assert!((s.average - 0.0).abs() < 1e-12);
}

#[test]
fn degree_distribution_of_a_star() {
    let g = star(6);
    let dist = degree::distribution(&g, DegreeKind::Out);

    assert_eq!(dist.get(&6), Some(&1));
    assert_eq!(dist.get(&0), Some(&6));
    assert_eq!(degree::max(&g, DegreeKind::Out), 6);
    assert!((degree::mean(&g, DegreeKind::Total) - 12.0 / 7.0).abs() < 1e-12);
}

#[test]
fn top_hubs_break_degree_ties_by_lowest_id() {
    let mut b = GraphBuilder::new("t");
    // x and y both have out-degree 2; x was added first.
    b.add_edge("x", "a").unwrap();
    b.add_edge("x", "b").unwrap();
    b.add_edge("y", "a").unwrap();
    b.add_edge("y", "b").unwrap();
    let g = b.build();

    let hubs = degree::top_hubs(&g, 2);
    assert_eq!(hubs.len(), 2);
    assert_eq!(g.label(hubs[0].0), "x");
    assert_eq!(g.label(hubs[1].0), "y");
    assert_eq!(hubs[0].1, 2);
}

#[test]
fn killing_the_hub_shatters_a_star() {
    let g = star(8);
    let mut mask = AliveMask::all_alive(g.node_count());

    assert_eq!(components::largest_component_size(&g, &mask), 9);
    assert_eq!(components::component_count(&g, &mask), 1);

    let hub = g.node_id("hub").unwrap();
    mask.kill(hub);

    let (largest, count) = components::component_stats(&g, &mask);
    assert_eq!(largest, 1);
    assert_eq!(count, 8);
}

#[test]
fn lcc_members_come_back_sorted() {
    let mut b = GraphBuilder::new("two");
    b.add_edge("a", "b").unwrap();
    b.add_edge("b", "c").unwrap();
    b.add_edge("x", "y").unwrap();
    let g = b.build();
    let mask = AliveMask::all_alive(g.node_count());

    let members = components::largest_component_members(&g, &mask);
    let labels: Vec<&str> = members.iter().map(|&id| g.label(id)).collect();
    assert_eq!(labels, vec!["a", "b", "c"]);
}

#[test]
fn summary_folds_undefined_metrics_into_notes() {
    let summary = summarize(&cycle(5), &MetricsOptions::default()).unwrap();

    assert_eq!(summary.nodes, 5);
    assert_eq!(summary.edges, 5);
    assert_eq!(summary.largest_component, 5);
    assert_eq!(summary.components, 1);
    assert!(summary.assortativity.is_none());
    assert!((summary.avg_path_length.unwrap() - 1.5).abs() < 1e-12);
    assert!(summary.path_exact);
    assert!(summary
        .notes
        .iter()
        .any(|n| n.contains("assortativity undefined")));
}

#[test]
fn summary_serializes_to_json() {
    let summary = summarize(&star(3), &MetricsOptions::default()).unwrap();
    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"nodes\":4"));
    assert!(json.contains("\"largest_component\":4"));
}
