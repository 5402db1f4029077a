// src/metrics/summary.rs
//! One-shot structural summary of a graph.

use serde::Serialize;

use crate::error::{FractureError, Result};
use crate::graph::{AliveMask, DepGraph};
use crate::metrics::clustering::{self, ClusteringOptions};
use crate::metrics::components;
use crate::metrics::degree::{self, DegreeKind};
use crate::metrics::paths::{self, PathOptions};

#[derive(Default)]
pub struct MetricsOptions {
    pub paths: PathOptions,
    pub clustering: ClusteringOptions,
}

/// Everything the `stats` command reports, in serializable form.
#[derive(Debug, Clone, Serialize)]
pub struct GraphSummary {
    pub name: String,
    pub nodes: usize,
    pub edges: usize,
    pub density: f64,
    pub mean_total_degree: f64,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    pub largest_component: usize,
    pub components: usize,
    /// None when the degree sequence makes the correlation undefined.
    pub assortativity: Option<f64>,
    /// None when the graph has no edges.
    pub avg_path_length: Option<f64>,
    pub path_exact: bool,
    /// None when the graph has no nodes.
    pub clustering: Option<f64>,
    pub clustering_exact: bool,
    /// Human-readable reasons for any None metric above.
    pub notes: Vec<String>,
    pub duration_ms: u128,
}

/// Computes the full summary. Undefined metrics degrade to `None` with a
/// note instead of failing the whole run.
///
/// # Errors
/// Only genuinely unexpected metric failures propagate; the known
/// degenerate cases are folded into the summary.
pub fn summarize(g: &DepGraph, opts: &MetricsOptions) -> Result<GraphSummary> {
    let start = std::time::Instant::now();
    let mask = AliveMask::all_alive(g.node_count());
    let mut notes = Vec::new();

    let n = g.node_count();
    let density = if n < 2 {
        0.0
    } else {
        g.edge_count() as f64 / (n as f64 * (n as f64 - 1.0))
    };

    let assortativity = match super::assortativity::assortativity(g) {
        Ok(r) => Some(r),
        Err(FractureError::UndefinedMetric { reason, .. }) => {
            notes.push(format!("assortativity undefined: {reason}"));
            None
        }
        Err(e) => return Err(e),
    };

    let (avg_path_length, path_exact) = match paths::average_shortest_path(g, &opts.paths) {
        Ok(s) => {
            if !s.exact {
                notes.push(format!(
                    "path length sampled from {} of {} sources",
                    s.sources_used, s.lcc_size
                ));
            }
            (Some(s.average), s.exact)
        }
        Err(FractureError::DisconnectedGraph { .. }) => {
            notes.push("path length undefined: graph has no edges".to_string());
            (None, true)
        }
        Err(e) => return Err(e),
    };

    let (clustering, clustering_exact) = match clustering::average_clustering(g, &opts.clustering)
    {
        Ok(s) => {
            if !s.exact {
                notes.push(format!(
                    "clustering estimated from {} wedge samples",
                    opts.clustering.trials
                ));
            }
            (Some(s.average), s.exact)
        }
        Err(FractureError::UndefinedMetric { reason, .. }) => {
            notes.push(format!("clustering undefined: {reason}"));
            (None, true)
        }
        Err(e) => return Err(e),
    };

    Ok(GraphSummary {
        name: g.name().to_string(),
        nodes: n,
        edges: g.edge_count(),
        density,
        mean_total_degree: degree::mean(g, DegreeKind::Total),
        max_in_degree: degree::max(g, DegreeKind::In),
        max_out_degree: degree::max(g, DegreeKind::Out),
        largest_component: components::largest_component_size(g, &mask),
        components: components::component_count(g, &mask),
        assortativity,
        avg_path_length,
        path_exact,
        clustering,
        clustering_exact,
        notes,
        duration_ms: start.elapsed().as_millis(),
    })
}
