// src/attack/simulator.rs
//! The attack loop.
//!
//! Lifecycle is encoded in the types: a validated [`AttackRun`] is the
//! initialized state, `run` (or `run_until`) is the running state, and the
//! returned [`RobustnessCurve`] is the completed result. `run` consumes the
//! run, so a finished curve can never be extended or re-entered.
//!
//! A stop flag is polled between removal batches only; whatever was
//! measured before the flag flipped remains a valid partial curve.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::attack::curve::{CurvePoint, RobustnessCurve, StopReason};
use crate::attack::strategy::{Strategy, VictimQueue};
use crate::error::{FractureError, Result};
use crate::graph::{AliveMask, DepGraph};
use crate::metrics::components;

/// How many nodes go per removal batch.
#[derive(Debug, Clone, Copy)]
pub enum StepSize {
    /// Fixed node count per batch.
    Nodes(usize),
    /// Fraction of the initial node count per batch, rounded, minimum one.
    Fraction(f64),
}

impl Default for StepSize {
    fn default() -> Self {
        StepSize::Nodes(1)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub enum StopCondition {
    /// Keep going until every node is gone.
    #[default]
    Exhaustion,
    /// Stop once the LCC is at or below this fraction of its initial size.
    LccThreshold(f64),
}

#[derive(Debug)]
pub struct AttackConfig {
    pub strategy: Strategy,
    pub step: StepSize,
    pub stop: StopCondition,
}

impl AttackConfig {
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            step: StepSize::default(),
            stop: StopCondition::default(),
        }
    }
}

/// A validated attack, ready to execute against a shared graph.
#[derive(Debug)]
pub struct AttackRun<'g> {
    graph: &'g DepGraph,
    config: AttackConfig,
    batch: usize,
}

impl<'g> AttackRun<'g> {
    /// Validates the configuration against the graph.
    ///
    /// # Errors
    /// `EmptyGraph` when there is nothing to attack; `Config` when the step
    /// size or threshold is out of range.
    pub fn new(graph: &'g DepGraph, config: AttackConfig) -> Result<Self> {
        if graph.is_empty() {
            return Err(FractureError::EmptyGraph {
                graph: graph.name().to_string(),
            });
        }
        let batch = match config.step {
            StepSize::Nodes(0) => {
                return Err(FractureError::Config(
                    "step size must remove at least one node".to_string(),
                ))
            }
            StepSize::Nodes(k) => k,
            StepSize::Fraction(f) if f > 0.0 && f <= 1.0 => {
                ((f * graph.node_count() as f64).round() as usize).max(1)
            }
            StepSize::Fraction(f) => {
                return Err(FractureError::Config(format!(
                    "step fraction must be in (0, 1], got {f}"
                )))
            }
        };
        if let StopCondition::LccThreshold(t) = config.stop {
            if !(0.0..1.0).contains(&t) {
                return Err(FractureError::Config(format!(
                    "stop threshold must be in [0, 1), got {t}"
                )));
            }
        }
        Ok(Self {
            graph,
            config,
            batch,
        })
    }

    /// Runs the attack to its stop condition.
    ///
    /// # Errors
    /// None beyond construction today; the signature leaves room for
    /// strategies that can fail mid-run.
    pub fn run(self) -> Result<RobustnessCurve> {
        self.run_until(&AtomicBool::new(false))
    }

    /// Runs the attack, polling `stop_flag` between batches. When the flag
    /// flips, the curve measured so far comes back with
    /// [`StopReason::Interrupted`].
    ///
    /// # Errors
    /// Same as [`AttackRun::run`].
    pub fn run_until(self, stop_flag: &AtomicBool) -> Result<RobustnessCurve> {
        let start = Instant::now();
        let g = self.graph;
        let n0 = g.node_count();
        let mut mask = AliveMask::all_alive(n0);
        let mut queue = VictimQueue::build(g, &self.config.strategy);

        let (s0, c0) = components::component_stats(g, &mask);
        let mut points = vec![CurvePoint {
            removed: 0,
            removed_fraction: 0.0,
            lcc_size: s0,
            lcc_fraction: s0 as f64 / n0 as f64,
            components: c0,
        }];

        let stop = loop {
            if stop_flag.load(Ordering::Relaxed) {
                break StopReason::Interrupted;
            }

            let mut removed_now = 0;
            while removed_now < self.batch {
                let Some(victim) = queue.next_victim(g, &mask) else {
                    break;
                };
                mask.kill(victim);
                removed_now += 1;
            }
            if removed_now == 0 {
                break StopReason::Exhausted;
            }

            let removed = n0 - mask.alive_count();
            let (lcc, comps) = components::component_stats(g, &mask);
            points.push(CurvePoint {
                removed,
                removed_fraction: removed as f64 / n0 as f64,
                lcc_size: lcc,
                lcc_fraction: lcc as f64 / n0 as f64,
                components: comps,
            });

            if let StopCondition::LccThreshold(t) = self.config.stop {
                if (lcc as f64) <= t * s0 as f64 {
                    break StopReason::ThresholdReached;
                }
            }
            if mask.alive_count() == 0 {
                break StopReason::Exhausted;
            }
        };

        Ok(RobustnessCurve {
            graph: g.name().to_string(),
            strategy: self.config.strategy.label().to_string(),
            initial_nodes: n0,
            initial_lcc: s0,
            points,
            stop,
            duration_ms: start.elapsed().as_millis(),
        })
    }
}
