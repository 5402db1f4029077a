// src/cli/args.rs
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::report::OutputFormat;

#[derive(Parser)]
#[command(
    name = "fracture",
    version,
    about = "Dependency-graph robustness analyzer"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Remove nodes in a seeded random order
    Random,
    /// Remove the highest total-degree node first
    Degree,
    /// Remove the most depended-upon node first
    Indegree,
    /// Remove by sampled betweenness centrality
    Betweenness,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Structural metrics: degrees, components, paths, clustering
    Stats {
        /// Edge-list file, one `source<TAB>target` per line
        #[arg(value_name = "EDGELIST")]
        input: PathBuf,
        /// Respect edge direction in path metrics
        #[arg(long)]
        directed: bool,
        /// Emit machine-readable output instead of the terminal view
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Write output to a file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// List the heaviest includers by out-degree
    Hubs {
        #[arg(value_name = "EDGELIST")]
        input: PathBuf,
        #[arg(long, short, default_value = "5")]
        top: usize,
    },
    /// Remove nodes by a strategy and record the robustness curve
    Attack {
        #[arg(value_name = "EDGELIST")]
        input: PathBuf,
        #[arg(long, short, value_enum)]
        strategy: StrategyArg,
        /// Seed for randomized choices; required for `--strategy random`
        #[arg(long)]
        seed: Option<u64>,
        /// Re-rank degrees against survivors after every removal
        #[arg(long)]
        dynamic: bool,
        /// Independent trials; only random orders differ between trials
        #[arg(long)]
        trials: Option<usize>,
        /// Measurement steps across the run (0 = measure every removal)
        #[arg(long)]
        steps: Option<usize>,
        /// Stop once the LCC falls to this fraction of its initial size
        #[arg(long, value_name = "FRACTION")]
        threshold: Option<f64>,
        /// Pivot count for betweenness ranking
        #[arg(long)]
        samples: Option<usize>,
        /// Also attack a degree-matched random twin and compare
        #[arg(long)]
        baseline: bool,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Run several strategies against one graph and rank the damage
    Compare {
        #[arg(value_name = "EDGELIST")]
        input: PathBuf,
        /// Comma-separated strategy list; defaults to all of them
        #[arg(long, value_enum, value_delimiter = ',')]
        strategies: Vec<StrategyArg>,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        dynamic: bool,
        #[arg(long)]
        trials: Option<usize>,
        #[arg(long)]
        steps: Option<usize>,
    },
    /// Emit a degree-matched Erdos-Renyi twin as an edge list
    Baseline {
        #[arg(value_name = "EDGELIST")]
        input: PathBuf,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Re-emit the graph as normalized TSV after cleanup
    Export {
        #[arg(value_name = "EDGELIST")]
        input: PathBuf,
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}
