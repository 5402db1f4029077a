// src/metrics/assortativity.rs
//! Degree assortativity: do heavy nodes link to heavy nodes?
//!
//! Pearson correlation of (out-degree of source, in-degree of target) over
//! every directed edge. Negative values mean hubs attach to leaves, which is
//! the usual shape of include graphs.

use crate::error::{FractureError, Result};
use crate::graph::DepGraph;

/// Degree correlation coefficient in [-1, 1].
///
/// # Errors
/// Returns `UndefinedMetric` on a graph with no edges, or when either
/// endpoint degree sequence has zero variance (a k-regular structure such
/// as a simple cycle). The variance test is done in integer arithmetic, so
/// it cannot be fooled by floating-point noise.
pub fn assortativity(g: &DepGraph) -> Result<f64> {
    let m = g.edge_count() as i128;
    if m == 0 {
        return Err(FractureError::UndefinedMetric {
            metric: "assortativity",
            reason: "graph has no edges".to_string(),
        });
    }

    let (mut sum_x, mut sum_y) = (0i128, 0i128);
    let (mut sum_xy, mut sum_xx, mut sum_yy) = (0i128, 0i128, 0i128);
    for (u, v) in g.edges() {
        let x = g.out_degree(u) as i128;
        let y = g.in_degree(v) as i128;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
        sum_yy += y * y;
    }

    let var_x = m * sum_xx - sum_x * sum_x;
    let var_y = m * sum_yy - sum_y * sum_y;
    if var_x == 0 || var_y == 0 {
        return Err(FractureError::UndefinedMetric {
            metric: "assortativity",
            reason: "zero degree variance across edge endpoints".to_string(),
        });
    }

    let cov = (m * sum_xy - sum_x * sum_y) as f64;
    Ok(cov / ((var_x as f64).sqrt() * (var_y as f64).sqrt()))
}
