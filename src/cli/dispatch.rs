// src/cli/dispatch.rs
//! Maps parsed commands onto their handlers.

use anyhow::Result;

use super::args::Commands;
use super::handlers::{self, AttackArgs};
use crate::exit::FractureExit;

/// Executes the parsed command.
///
/// # Errors
/// Returns whatever the command handler fails with.
pub fn execute(command: Commands) -> Result<FractureExit> {
    match command {
        Commands::Stats {
            input,
            directed,
            format,
            output,
        } => handlers::handle_stats(&input, directed, format, output.as_deref()),
        Commands::Hubs { input, top } => handlers::handle_hubs(&input, top),
        Commands::Attack {
            input,
            strategy,
            seed,
            dynamic,
            trials,
            steps,
            threshold,
            samples,
            baseline,
            format,
            output,
        } => handlers::handle_attack(&AttackArgs {
            input,
            strategy,
            seed,
            dynamic,
            trials,
            steps,
            threshold,
            samples,
            baseline,
            format,
            output,
        }),
        Commands::Compare {
            input,
            strategies,
            seed,
            dynamic,
            trials,
            steps,
        } => handlers::handle_compare(&input, &strategies, seed, dynamic, trials, steps),
        Commands::Baseline {
            input,
            seed,
            output,
        } => handlers::handle_baseline(&input, seed, output.as_deref()),
        Commands::Export { input, output } => handlers::handle_export(&input, output.as_deref()),
    }
}
