// src/lib.rs
pub mod attack;
pub mod cli;
pub mod config;
pub mod edgelist;
pub mod error;
pub mod exit;
pub mod graph;
pub mod metrics;
pub mod report;
