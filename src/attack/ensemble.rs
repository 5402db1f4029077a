// src/attack/ensemble.rs
//! Repeated attack trials against one shared graph.
//!
//! Trials are independent: each gets its own mask and removal queue, so
//! they run on the rayon pool with nothing but the immutable graph in
//! common. Random trials shift the base seed by the trial index; any other
//! strategy is deterministic, so extra trials would just repeat the first
//! and are collapsed to one.

use std::sync::atomic::AtomicBool;

use rayon::prelude::*;
use serde::Serialize;

use crate::attack::curve::RobustnessCurve;
use crate::attack::simulator::{AttackConfig, AttackRun};
use crate::error::{FractureError, Result};
use crate::graph::DepGraph;

/// Runs `trials` independent attacks. The stop flag is shared, so one
/// interrupt request winds down every trial at its next batch boundary.
///
/// # Errors
/// Propagates validation failures from any trial.
pub fn run_trials(
    g: &DepGraph,
    config: &AttackConfig,
    trials: usize,
    stop_flag: &AtomicBool,
) -> Result<Vec<RobustnessCurve>> {
    let trials = if config.strategy.is_randomized() {
        trials.max(1)
    } else {
        1
    };
    (0..trials as u64)
        .into_par_iter()
        .map(|i| {
            let cfg = AttackConfig {
                strategy: config.strategy.with_seed_offset(i),
                step: config.step,
                stop: config.stop,
            };
            AttackRun::new(g, cfg)?.run_until(stop_flag)
        })
        .collect()
}

/// Per-step aggregate across trials.
#[derive(Debug, Clone, Serialize)]
pub struct MeanPoint {
    pub removed: usize,
    pub removed_fraction: f64,
    pub mean_lcc_fraction: f64,
    pub min_lcc_fraction: f64,
    pub max_lcc_fraction: f64,
    /// Trials that reached this step; threshold stops can end some early.
    pub trials: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnsembleSummary {
    pub graph: String,
    pub strategy: String,
    pub trials: usize,
    /// Mean of the per-trial robustness indices.
    pub mean_robustness: f64,
    pub points: Vec<MeanPoint>,
}

impl EnsembleSummary {
    /// TSV mirror of [`RobustnessCurve::write_tsv`] for the averaged curve.
    ///
    /// # Errors
    /// Propagates writer failures.
    pub fn write_tsv<W: std::io::Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(
            out,
            "% {} strategy={} trials={} mean_robustness={:.6}",
            self.graph, self.strategy, self.trials, self.mean_robustness
        )?;
        writeln!(
            out,
            "removed\tremoved_frac\tmean_lcc_frac\tmin_lcc_frac\tmax_lcc_frac\ttrials"
        )?;
        for p in &self.points {
            writeln!(
                out,
                "{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{}",
                p.removed,
                p.removed_fraction,
                p.mean_lcc_fraction,
                p.min_lcc_fraction,
                p.max_lcc_fraction,
                p.trials
            )?;
        }
        out.flush()
    }
}

/// Averages trial curves point-by-point. All trials share a batch size, so
/// point `k` sits at the same removal count in every curve that has it.
///
/// # Errors
/// `Config` when called with no curves.
pub fn aggregate(curves: &[RobustnessCurve]) -> Result<EnsembleSummary> {
    let Some(first) = curves.first() else {
        return Err(FractureError::Config(
            "cannot aggregate zero trial curves".to_string(),
        ));
    };

    let longest = curves.iter().map(|c| c.points.len()).max().unwrap_or(0);
    let mut points = Vec::with_capacity(longest);
    for k in 0..longest {
        let step: Vec<&RobustnessCurve> =
            curves.iter().filter(|c| c.points.len() > k).collect();
        let fracs: Vec<f64> = step.iter().map(|c| c.points[k].lcc_fraction).collect();
        let sum: f64 = fracs.iter().sum();
        let min = fracs.iter().copied().fold(f64::INFINITY, f64::min);
        let max = fracs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        points.push(MeanPoint {
            removed: step[0].points[k].removed,
            removed_fraction: step[0].points[k].removed_fraction,
            mean_lcc_fraction: sum / fracs.len() as f64,
            min_lcc_fraction: min,
            max_lcc_fraction: max,
            trials: fracs.len(),
        });
    }

    let mean_robustness =
        curves.iter().map(RobustnessCurve::robustness_index).sum::<f64>() / curves.len() as f64;

    Ok(EnsembleSummary {
        graph: first.graph.clone(),
        strategy: first.strategy.clone(),
        trials: curves.len(),
        mean_robustness,
        points,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::{aggregate, run_trials};
    use crate::attack::simulator::AttackConfig;
    use crate::attack::strategy::{Ranking, Strategy};
    use crate::graph::{DepGraph, GraphBuilder};

    fn ring(n: usize) -> DepGraph {
        let mut b = GraphBuilder::new("ring");
        let labels: Vec<String> = (0..n).map(|i| format!("n{i}")).collect();
        for i in 0..n {
            b.add_edge(&labels[i], &labels[(i + 1) % n]).unwrap();
        }
        b.build()
    }

    #[test]
    fn random_trials_are_reproducible() {
        let g = ring(12);
        let config = AttackConfig::new(Strategy::Random { seed: 100 });
        let flag = AtomicBool::new(false);
        let a = run_trials(&g, &config, 4, &flag).unwrap();
        let b = run_trials(&g, &config, 4, &flag).unwrap();
        for (ca, cb) in a.iter().zip(&b) {
            let la: Vec<usize> = ca.points.iter().map(|p| p.lcc_size).collect();
            let lb: Vec<usize> = cb.points.iter().map(|p| p.lcc_size).collect();
            assert_eq!(la, lb);
        }
    }

    #[test]
    fn trials_differ_across_seeds() {
        let g = ring(24);
        let config = AttackConfig::new(Strategy::Random { seed: 100 });
        let flag = AtomicBool::new(false);
        let curves = run_trials(&g, &config, 4, &flag).unwrap();
        // At least one pair of trials should disagree somewhere.
        let first: Vec<usize> = curves[0].points.iter().map(|p| p.lcc_size).collect();
        assert!(curves.iter().skip(1).any(|c| {
            let l: Vec<usize> = c.points.iter().map(|p| p.lcc_size).collect();
            l != first
        }));
    }

    #[test]
    fn deterministic_strategies_collapse_to_one_trial() {
        let g = ring(6);
        let config = AttackConfig::new(Strategy::Degree {
            ranking: Ranking::Static,
        });
        let flag = AtomicBool::new(false);
        let curves = run_trials(&g, &config, 8, &flag).unwrap();
        assert_eq!(curves.len(), 1);
    }

    #[test]
    fn aggregate_means_each_step() {
        let g = ring(6);
        let config = AttackConfig::new(Strategy::Random { seed: 5 });
        let flag = AtomicBool::new(false);
        let curves = run_trials(&g, &config, 3, &flag).unwrap();
        let summary = aggregate(&curves).unwrap();
        assert_eq!(summary.trials, 3);
        // Exhaustion runs all share a length of n + 1 points.
        assert_eq!(summary.points.len(), 7);
        assert_eq!(summary.points[0].mean_lcc_fraction, 1.0);
        let last = summary.points.last().unwrap();
        assert_eq!(last.mean_lcc_fraction, 0.0);
        assert!(summary.mean_robustness > 0.0);
    }

    #[test]
    fn aggregate_rejects_empty_input() {
        assert!(aggregate(&[]).is_err());
    }
}
