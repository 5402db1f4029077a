// src/attack/curve.rs
//! Robustness curves: what an attack leaves behind, step by step.

use std::io::Write;

use serde::Serialize;

/// Why an attack run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every node was removed.
    Exhausted,
    /// The largest component fell to or under the configured fraction.
    ThresholdReached,
    /// An external stop request landed between steps.
    Interrupted,
}

impl StopReason {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StopReason::Exhausted => "exhausted",
            StopReason::ThresholdReached => "threshold",
            StopReason::Interrupted => "interrupted",
        }
    }
}

/// One measurement, taken after a removal batch (or before the first).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CurvePoint {
    /// Nodes removed so far.
    pub removed: usize,
    /// Fraction of the initial node count removed.
    pub removed_fraction: f64,
    /// Largest weakly connected component among survivors.
    pub lcc_size: usize,
    /// `lcc_size` over the initial node count.
    pub lcc_fraction: f64,
    /// Weak component count among survivors.
    pub components: usize,
}

/// Completed attack trajectory. Constructed only by the simulator; nothing
/// here mutates after the run ends.
#[derive(Debug, Clone, Serialize)]
pub struct RobustnessCurve {
    pub graph: String,
    pub strategy: String,
    pub initial_nodes: usize,
    /// Largest component before any removal; the first point repeats it.
    pub initial_lcc: usize,
    pub points: Vec<CurvePoint>,
    pub stop: StopReason,
    pub duration_ms: u128,
}

impl RobustnessCurve {
    /// Schneider-style robustness index: the mean surviving LCC fraction
    /// across all post-removal measurements. Lower means the strategy
    /// dismantled the graph faster.
    #[must_use]
    pub fn robustness_index(&self) -> f64 {
        let post: Vec<f64> = self
            .points
            .iter()
            .filter(|p| p.removed > 0)
            .map(|p| p.lcc_fraction)
            .collect();
        if post.is_empty() {
            return 0.0;
        }
        post.iter().sum::<f64>() / post.len() as f64
    }

    /// Fraction removed at which the LCC first dropped to half its starting
    /// size, if the run got that far.
    #[must_use]
    pub fn half_life(&self) -> Option<f64> {
        let half = self.initial_lcc as f64 / 2.0;
        self.points
            .iter()
            .find(|p| (p.lcc_size as f64) <= half)
            .map(|p| p.removed_fraction)
    }

    /// Writes the curve as TSV: a `%` header line, then one row per point.
    ///
    /// # Errors
    /// Propagates writer failures.
    pub fn write_tsv<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(
            out,
            "% {} strategy={} nodes={} initial_lcc={} stop={}",
            self.graph,
            self.strategy,
            self.initial_nodes,
            self.initial_lcc,
            self.stop.label()
        )?;
        writeln!(out, "removed\tremoved_frac\tlcc_size\tlcc_frac\tcomponents")?;
        for p in &self.points {
            writeln!(
                out,
                "{}\t{:.6}\t{}\t{:.6}\t{}",
                p.removed, p.removed_fraction, p.lcc_size, p.lcc_fraction, p.components
            )?;
        }
        out.flush()
    }
}
