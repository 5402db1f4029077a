// src/bin/fracture.rs
use std::process;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use fracture_core::cli::{self, Cli};
use fracture_core::error::FractureError;
use fracture_core::exit::FractureExit;

fn main() {
    match run() {
        Ok(exit) => process::exit(exit.code()),
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            process::exit(exit_for(&e).code());
        }
    }
}

fn run() -> Result<FractureExit> {
    let cli = Cli::parse();
    cli::execute(cli.command)
}

/// Bad input gets its own exit code so scripts can tell "fix your
/// edge list" apart from "the tool broke".
fn exit_for(e: &anyhow::Error) -> FractureExit {
    match e.downcast_ref::<FractureError>() {
        Some(
            FractureError::Parse { .. }
            | FractureError::Config(_)
            | FractureError::InvalidSeed
            | FractureError::DuplicateEdge { .. }
            | FractureError::Pattern(_),
        ) => FractureExit::InvalidInput,
        _ => FractureExit::Error,
    }
}
