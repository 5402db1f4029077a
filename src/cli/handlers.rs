// src/cli/handlers.rs
//! One handler per subcommand. Handlers own all terminal output; the
//! library layers below them stay silent.

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use anyhow::Result;
use colored::Colorize;

use crate::attack::{
    aggregate, run_trials, AttackConfig, Ranking, StepSize, StopCondition, Strategy,
    DEFAULT_BETWEENNESS_SAMPLES,
};
use crate::cli::args::StrategyArg;
use crate::config::{FractureToml, StopRule};
use crate::edgelist::{self, LoadOutcome};
use crate::error::FractureError;
use crate::exit::FractureExit;
use crate::graph::random;
use crate::metrics::{self, degree};
use crate::report::{export, terminal, OutputFormat};

fn load(input: &Path, config: &FractureToml, quiet: bool) -> Result<LoadOutcome> {
    let opts = config.load_options()?;
    let outcome = edgelist::read_edge_list(input, &opts)?;
    if !quiet {
        terminal::print_load(&outcome);
    }
    Ok(outcome)
}

fn confirm_saved(what: &str, output: Option<&Path>) {
    if let Some(path) = output {
        println!(
            "{} {what} written to {}",
            "Saved".green().bold(),
            path.display()
        );
    }
}

/// # Errors
/// Load, metric, and export failures.
pub fn handle_stats(
    input: &Path,
    directed: bool,
    format: Option<OutputFormat>,
    output: Option<&Path>,
) -> Result<FractureExit> {
    let config = FractureToml::load(Path::new("."))?;
    let machine = format.is_some() || output.is_some();
    let outcome = load(input, &config, machine && output.is_none())?;

    let mut opts = config.metrics_options();
    if directed {
        opts.paths.directed = true;
    }
    let summary = metrics::summarize(&outcome.graph, &opts)?;

    if machine {
        export::write_summary(&summary, format.unwrap_or_default(), output)?;
        confirm_saved("summary", output);
    } else {
        terminal::print_summary(&summary);
    }
    Ok(FractureExit::Success)
}

/// # Errors
/// Load failures.
pub fn handle_hubs(input: &Path, top: usize) -> Result<FractureExit> {
    let config = FractureToml::load(Path::new("."))?;
    let outcome = load(input, &config, false)?;
    let hubs = degree::top_hubs(&outcome.graph, top);
    terminal::print_hubs(&outcome.graph, &hubs);
    Ok(FractureExit::Success)
}

pub struct AttackArgs {
    pub input: PathBuf,
    pub strategy: StrategyArg,
    pub seed: Option<u64>,
    pub dynamic: bool,
    pub trials: Option<usize>,
    pub steps: Option<usize>,
    pub threshold: Option<f64>,
    pub samples: Option<usize>,
    pub baseline: bool,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
}

/// # Errors
/// Load failures, attack validation (empty graph, bad step or threshold,
/// missing seed for a random order), and export failures.
pub fn handle_attack(args: &AttackArgs) -> Result<FractureExit> {
    let config = FractureToml::load(Path::new("."))?;
    let machine = args.format.is_some() || args.output.is_some();
    let quiet = machine && args.output.is_none();
    let outcome = load(&args.input, &config, quiet)?;
    let g = &outcome.graph;

    if args.dynamic && !matches!(args.strategy, StrategyArg::Degree | StrategyArg::Indegree) {
        eprintln!(
            "{}",
            "note: --dynamic only affects the degree strategies".dimmed()
        );
    }

    let attack = AttackConfig {
        strategy: resolve_strategy(args.strategy, args.seed, args.dynamic, args.samples, &config)?,
        step: step_size(args.steps, &config),
        stop: stop_condition(args.threshold, &config),
    };
    let trials = args.trials.unwrap_or(config.simulation.trials);
    let never = AtomicBool::new(false);

    let curves = run_trials(g, &attack, trials, &never)?;
    if curves.len() == 1 {
        if !quiet {
            terminal::print_curve(&curves[0]);
        }
        if machine {
            export::write_curve(
                &curves[0],
                args.format.unwrap_or_default(),
                args.output.as_deref(),
            )?;
            confirm_saved("curve", args.output.as_deref());
        }
    } else {
        let summary = aggregate(&curves)?;
        if !quiet {
            terminal::print_ensemble(&summary);
        }
        if machine {
            export::write_ensemble(
                &summary,
                args.format.unwrap_or_default(),
                args.output.as_deref(),
            )?;
            confirm_saved("mean curve", args.output.as_deref());
        }
    }

    if args.baseline {
        let twin_seed = args.seed.unwrap_or(config.metrics.sampling_seed);
        let er = random::matched_to(g, twin_seed)?;
        let er_curves = run_trials(&er, &attack, trials, &never)?;
        terminal::print_baseline(&aggregate(&curves)?, &aggregate(&er_curves)?);
    }
    Ok(FractureExit::Success)
}

/// # Errors
/// Same failure modes as [`handle_attack`], once per strategy.
pub fn handle_compare(
    input: &Path,
    strategies: &[StrategyArg],
    seed: u64,
    dynamic: bool,
    trials: Option<usize>,
    steps: Option<usize>,
) -> Result<FractureExit> {
    let config = FractureToml::load(Path::new("."))?;
    let outcome = load(input, &config, false)?;
    let g = &outcome.graph;

    let chosen: Vec<StrategyArg> = if strategies.is_empty() {
        vec![
            StrategyArg::Degree,
            StrategyArg::Indegree,
            StrategyArg::Betweenness,
            StrategyArg::Random,
        ]
    } else {
        strategies.to_vec()
    };

    let trials = trials.unwrap_or(config.simulation.trials);
    let never = AtomicBool::new(false);
    let mut runs = Vec::with_capacity(chosen.len());
    for arg in chosen {
        // Exhaustion only: truncated curves would make the R values
        // incomparable across strategies.
        let attack = AttackConfig {
            strategy: resolve_strategy(arg, Some(seed), dynamic, None, &config)?,
            step: step_size(steps, &config),
            stop: StopCondition::Exhaustion,
        };
        let curves = run_trials(g, &attack, trials, &never)?;
        runs.push(aggregate(&curves)?);
    }
    terminal::print_comparison(g.name(), &runs);
    Ok(FractureExit::Success)
}

/// # Errors
/// Load failures and write failures for the generated twin.
pub fn handle_baseline(input: &Path, seed: u64, output: Option<&Path>) -> Result<FractureExit> {
    let config = FractureToml::load(Path::new("."))?;
    let outcome = load(input, &config, output.is_none())?;
    let er = random::matched_to(&outcome.graph, seed)?;

    match output {
        Some(path) => {
            edgelist::write_edge_list(&er, path)?;
            println!(
                "{} {} ({} nodes, {} edges)",
                "Generated".green().bold(),
                er.name().bold(),
                er.node_count(),
                er.edge_count()
            );
            confirm_saved("edge list", output);
        }
        None => {
            let mut out = std::io::stdout().lock();
            edgelist::write_edges(&er, &mut out)?;
        }
    }
    Ok(FractureExit::Success)
}

/// # Errors
/// Load and write failures.
pub fn handle_export(input: &Path, output: Option<&Path>) -> Result<FractureExit> {
    let config = FractureToml::load(Path::new("."))?;
    let outcome = load(input, &config, output.is_none())?;

    match output {
        Some(path) => {
            edgelist::write_edge_list(&outcome.graph, path)?;
            confirm_saved("edge list", output);
        }
        None => {
            let mut out = std::io::stdout().lock();
            edgelist::write_edges(&outcome.graph, &mut out)?;
        }
    }
    Ok(FractureExit::Success)
}

fn resolve_strategy(
    arg: StrategyArg,
    seed: Option<u64>,
    dynamic: bool,
    samples: Option<usize>,
    config: &FractureToml,
) -> std::result::Result<Strategy, FractureError> {
    let ranking = if dynamic {
        Ranking::Dynamic
    } else {
        Ranking::Static
    };
    Ok(match arg {
        StrategyArg::Random => Strategy::Random {
            seed: seed.ok_or(FractureError::InvalidSeed)?,
        },
        StrategyArg::Degree => Strategy::Degree { ranking },
        StrategyArg::Indegree => Strategy::InDegree { ranking },
        StrategyArg::Betweenness => Strategy::Betweenness {
            samples: samples.unwrap_or(DEFAULT_BETWEENNESS_SAMPLES),
            seed: seed.unwrap_or(config.metrics.sampling_seed),
        },
    })
}

fn step_size(cli_steps: Option<usize>, config: &FractureToml) -> StepSize {
    match cli_steps {
        None => config.step_size(),
        Some(0) => StepSize::Nodes(1),
        Some(steps) => StepSize::Fraction(1.0 / steps as f64),
    }
}

fn stop_condition(threshold: Option<f64>, config: &FractureToml) -> StopCondition {
    match threshold {
        Some(t) => StopCondition::LccThreshold(t),
        None => match config.simulation.stop {
            StopRule::Exhaustion => StopCondition::Exhaustion,
            StopRule::Threshold => StopCondition::LccThreshold(config.simulation.threshold),
        },
    }
}
