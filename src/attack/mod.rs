// src/attack/mod.rs
//! Attack simulation: remove nodes by some strategy, watch the largest
//! component decay, and record the trajectory.

pub mod curve;
pub mod ensemble;
pub mod simulator;
pub mod strategy;

pub use curve::{CurvePoint, RobustnessCurve, StopReason};
pub use ensemble::{aggregate, run_trials, EnsembleSummary, MeanPoint};
pub use simulator::{AttackConfig, AttackRun, StepSize, StopCondition};
pub use strategy::{Ranking, Strategy, DEFAULT_BETWEENNESS_SAMPLES};
