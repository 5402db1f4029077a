// src/edgelist.rs
//! Edge-list interchange, KONECT style.
//!
//! One directed edge per line, `source<TAB>target`, with `%` or `#` comment
//! lines and blank lines ignored. Extra columns (weights, timestamps) are
//! tolerated and dropped. Isolated nodes are not representable in this
//! format, so a graph only round-trips exactly when every node touches at
//! least one edge.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use regex::Regex;

use crate::error::{FractureError, Result};
use crate::graph::{DepGraph, GraphBuilder};

pub struct LoadOptions {
    /// Fail on exact duplicate edges instead of merging them.
    pub strict_edges: bool,
    /// Keep `u -> u` edges instead of dropping them.
    pub keep_self_loops: bool,
    /// Edges touching a label that matches any pattern are skipped.
    pub exclude: Vec<Regex>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            strict_edges: false,
            keep_self_loops: false,
            exclude: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub graph: DepGraph,
    pub lines_total: usize,
    pub comments_skipped: usize,
    pub edges_excluded: usize,
    pub self_loops_dropped: usize,
    pub duplicates_merged: usize,
}

/// Reads an edge-list file into a graph named after the file stem.
///
/// # Errors
/// I/O failures and malformed lines (fewer than two fields) are reported
/// with the file path; parse errors carry the 1-based line number.
pub fn read_edge_list(path: &Path, opts: &LoadOptions) -> Result<LoadOutcome> {
    let file = File::open(path).map_err(|e| FractureError::Io {
        source: e,
        path: path.to_path_buf(),
    })?;
    let name = path
        .file_stem()
        .map_or_else(|| "graph".to_string(), |s| s.to_string_lossy().into_owned());
    parse_edge_list(BufReader::new(file), &name, path, opts)
}

/// Parses edge-list text from any reader. `origin` only labels errors.
///
/// # Errors
/// Same failure modes as [`read_edge_list`].
pub fn parse_edge_list<R: BufRead>(
    reader: R,
    name: &str,
    origin: &Path,
    opts: &LoadOptions,
) -> Result<LoadOutcome> {
    let mut builder = GraphBuilder::new(name)
        .strict_edges(opts.strict_edges)
        .keep_self_loops(opts.keep_self_loops);
    let mut lines_total = 0;
    let mut comments_skipped = 0;
    let mut edges_excluded = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| FractureError::Io {
            source: e,
            path: origin.to_path_buf(),
        })?;
        lines_total += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') || trimmed.starts_with('#') {
            comments_skipped += 1;
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let (Some(source), Some(target)) = (fields.next(), fields.next()) else {
            return Err(FractureError::Parse {
                path: origin.to_path_buf(),
                line: idx + 1,
                reason: format!("expected `source<TAB>target`, got {trimmed:?}"),
            });
        };

        if is_excluded(source, &opts.exclude) || is_excluded(target, &opts.exclude) {
            edges_excluded += 1;
            continue;
        }

        builder.add_edge(source, target)?;
    }

    let self_loops_dropped = builder.self_loops_dropped();
    let duplicates_merged = builder.duplicates_merged();
    Ok(LoadOutcome {
        graph: builder.build(),
        lines_total,
        comments_skipped,
        edges_excluded,
        self_loops_dropped,
        duplicates_merged,
    })
}

fn is_excluded(label: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|re| re.is_match(label))
}

/// Writes the graph back out in the same format this crate reads.
///
/// # Errors
/// Returns an I/O error tagged with `path`.
pub fn write_edge_list(g: &DepGraph, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| FractureError::Io {
        source: e,
        path: path.to_path_buf(),
    })?;
    let mut out = BufWriter::new(file);
    write_edges(g, &mut out).map_err(|e| FractureError::Io {
        source: e,
        path: path.to_path_buf(),
    })
}

/// Format core shared by file export and stdout export.
///
/// # Errors
/// Propagates writer failures.
pub fn write_edges<W: Write>(g: &DepGraph, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "% {}: {} nodes, {} edges", g.name(), g.node_count(), g.edge_count())?;
    for (u, v) in g.edges() {
        writeln!(out, "{}\t{}", g.label(u), g.label(v))?;
    }
    out.flush()
}
