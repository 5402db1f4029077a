// src/cli/mod.rs
//! Command-line surface.

pub mod args;
pub mod dispatch;
pub mod handlers;

pub use args::{Cli, Commands, StrategyArg};
pub use dispatch::execute;
