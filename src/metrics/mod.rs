// src/metrics/mod.rs
//! Structural metrics over the dependency graph.

pub mod assortativity;
pub mod clustering;
pub mod components;
pub mod degree;
pub mod paths;
pub mod summary;

pub use summary::{summarize, GraphSummary, MetricsOptions};
