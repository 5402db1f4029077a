// tests/unit_graph.rs
//! Builder, adjacency lookups, alive mask, and edge-list round trips.

use std::io::Cursor;
use std::path::Path;

use fracture_core::edgelist::{self, LoadOptions};
use fracture_core::error::FractureError;
use fracture_core::graph::{AliveMask, GraphBuilder};

fn parse(text: &str, opts: &LoadOptions) -> fracture_core::edgelist::LoadOutcome {
    edgelist::parse_edge_list(Cursor::new(text), "fixture", Path::new("fixture.tsv"), opts)
        .expect("fixture should parse")
}

#[test]
fn builder_assigns_ids_in_first_seen_order() {
    let mut b = GraphBuilder::new("t");
    b.add_edge("main.c", "lib.h").unwrap();
    b.add_edge("lib.h", "types.h").unwrap();
    let g = b.build();

    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.label(0), "main.c");
    assert_eq!(g.label(2), "types.h");
    assert_eq!(g.node_id("lib.h").unwrap(), 1);
}

#[test]
fn neighbor_lookups_are_slices_both_directions() {
    let mut b = GraphBuilder::new("t");
    b.add_edge("a", "b").unwrap();
    b.add_edge("a", "c").unwrap();
    b.add_edge("c", "b").unwrap();
    let g = b.build();

    let a = g.node_id("a").unwrap();
    let b_id = g.node_id("b").unwrap();
    let c = g.node_id("c").unwrap();

    assert_eq!(g.out_neighbors(a), &[b_id, c]);
    assert_eq!(g.in_neighbors(b_id), &[a, c]);
    assert_eq!(g.degree("b").unwrap(), (2, 0));
    assert!(g.has_edge(a, c));
    assert!(!g.has_edge(c, a));
    assert!(g.connected(c, a), "connected() ignores direction");
}

#[test]
fn unknown_label_is_a_typed_error() {
    let g = GraphBuilder::new("t").build();
    let err = g.node_id("ghost.h").unwrap_err();
    assert!(matches!(err, FractureError::NodeNotFound { .. }));
}

#[test]
fn self_loops_drop_by_default_and_survive_on_request() {
    let mut b = GraphBuilder::new("t");
    b.add_edge("x", "x").unwrap();
    b.add_edge("x", "y").unwrap();
    assert_eq!(b.self_loops_dropped(), 1);
    assert_eq!(b.build().edge_count(), 1);

    let mut keep = GraphBuilder::new("t").keep_self_loops(true);
    keep.add_edge("x", "x").unwrap();
    assert_eq!(keep.build().edge_count(), 1);
}

#[test]
fn duplicate_edges_merge_unless_strict() {
    let mut b = GraphBuilder::new("t");
    b.add_edge("a", "b").unwrap();
    b.add_edge("a", "b").unwrap();
    assert_eq!(b.duplicates_merged(), 1);
    assert_eq!(b.build().edge_count(), 1);

    let mut strict = GraphBuilder::new("t").strict_edges(true);
    strict.add_edge("a", "b").unwrap();
    let err = strict.add_edge("a", "b").unwrap_err();
    assert!(matches!(err, FractureError::DuplicateEdge { .. }));
}

#[test]
fn mask_kill_is_idempotent() {
    let mut b = GraphBuilder::new("t");
    b.add_edge("a", "b").unwrap();
    let g = b.build();

    let mut mask = AliveMask::all_alive(g.node_count());
    assert_eq!(mask.alive_count(), 2);
    assert!(mask.kill(0));
    assert!(!mask.kill(0), "second kill is a no-op");
    assert_eq!(mask.alive_count(), 1);
    assert_eq!(mask.alive_ids().collect::<Vec<_>>(), vec![1]);

    mask.revive_all();
    assert_eq!(mask.removed_count(), 0);
}

#[test]
fn parser_skips_comments_and_tolerates_extra_columns() {
    let text = "% konect header\n\
                # another comment\n\
                \n\
                a\tb\n\
                b\tc\t1.0\t2004\n";
    let outcome = parse(text, &LoadOptions::default());

    assert_eq!(outcome.lines_total, 5);
    assert_eq!(outcome.comments_skipped, 3);
    assert_eq!(outcome.graph.node_count(), 3);
    assert_eq!(outcome.graph.edge_count(), 2);
}

#[test]
fn parser_reports_line_number_for_short_rows() {
    let err = edgelist::parse_edge_list(
        Cursor::new("a\tb\nlonely\n"),
        "bad",
        Path::new("bad.tsv"),
        &LoadOptions::default(),
    )
    .unwrap_err();

    match err {
        FractureError::Parse { line, .. } => assert_eq!(line, 2),
        other => panic!("expected a parse error, got {other}"),
    }
}

#[test]
fn exclude_patterns_filter_edges_by_either_endpoint() {
    let opts = LoadOptions {
        exclude: vec![regex::Regex::new(r"^vendor/").unwrap()],
        ..LoadOptions::default()
    };
    let outcome = parse("app.c\tvendor/zlib.h\ncore.c\tapp.c\n", &opts);

    assert_eq!(outcome.edges_excluded, 1);
    assert_eq!(outcome.graph.edge_count(), 1);
    assert!(outcome.graph.node_id("vendor/zlib.h").is_err());
}

#[test]
fn edge_list_round_trip_preserves_structure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kernel.tsv");

    let mut b = GraphBuilder::new("kernel");
    b.add_edge("init/main.c", "include/linux/sched.h").unwrap();
    b.add_edge("init/main.c", "include/linux/fs.h").unwrap();
    b.add_edge("include/linux/fs.h", "include/linux/types.h")
        .unwrap();
    let original = b.build();

    edgelist::write_edge_list(&original, &path).unwrap();
    let reread = edgelist::read_edge_list(&path, &LoadOptions::default())
        .unwrap()
        .graph;

    assert_eq!(reread.node_count(), original.node_count());
    assert_eq!(reread.edge_count(), original.edge_count());
    for (u, v) in original.edges() {
        let ru = reread.node_id(original.label(u)).unwrap();
        let rv = reread.node_id(original.label(v)).unwrap();
        assert!(reread.has_edge(ru, rv), "missing edge after round trip");
    }
}
