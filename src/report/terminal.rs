// src/report/terminal.rs
//! Human-facing output. Everything machine-readable goes through
//! `report::export` instead.

use colored::Colorize;

use crate::attack::{EnsembleSummary, RobustnessCurve};
use crate::edgelist::LoadOutcome;
use crate::graph::{DepGraph, NodeId};
use crate::metrics::GraphSummary;

/// Node count past which the slow metrics deserve a heads-up.
pub const LARGE_GRAPH_NODES: usize = 50_000;

pub fn print_load(outcome: &LoadOutcome) {
    let g = &outcome.graph;
    println!(
        "{} {} ({} nodes, {} edges)",
        "Loaded".green().bold(),
        g.name().bold(),
        g.node_count(),
        g.edge_count()
    );
    if outcome.self_loops_dropped > 0 {
        println!(
            "  {}",
            format!("{} self-loops dropped", outcome.self_loops_dropped).dimmed()
        );
    }
    if outcome.duplicates_merged > 0 {
        println!(
            "  {}",
            format!("{} duplicate edges merged", outcome.duplicates_merged).dimmed()
        );
    }
    if outcome.edges_excluded > 0 {
        println!(
            "  {}",
            format!("{} edges excluded by pattern", outcome.edges_excluded).dimmed()
        );
    }
    if g.node_count() > LARGE_GRAPH_NODES {
        println!(
            "{} {} nodes; exact paths and betweenness ranking switch to sampling",
            "warning:".yellow().bold(),
            g.node_count()
        );
    }
}

pub fn print_summary(s: &GraphSummary) {
    println!();
    println!("{}", format!("Structure of {}", s.name).bold());
    row("nodes", &s.nodes.to_string());
    row("edges", &s.edges.to_string());
    row("density", &format!("{:.6}", s.density));
    row("mean degree", &format!("{:.3}", s.mean_total_degree));
    row(
        "max degree",
        &format!("{} in / {} out", s.max_in_degree, s.max_out_degree),
    );
    row(
        "largest component",
        &format!("{} of {}", s.largest_component, s.nodes),
    );
    row("components", &s.components.to_string());
    row("assortativity", &fmt_metric(s.assortativity, 4));
    row(
        "avg path length",
        &annotate(fmt_metric(s.avg_path_length, 3), s.path_exact),
    );
    row(
        "clustering",
        &annotate(fmt_metric(s.clustering, 4), s.clustering_exact),
    );
    for note in &s.notes {
        println!("  {}", format!("note: {note}").dimmed());
    }
    println!("  {}", format!("({} ms)", s.duration_ms).dimmed());
}

fn row(label: &str, value: &str) {
    println!("  {:<18} {}", format!("{label}:").cyan(), value);
}

fn fmt_metric(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(
        || "undefined".dimmed().to_string(),
        |v| format!("{v:.decimals$}"),
    )
}

fn annotate(value: String, exact: bool) -> String {
    if exact {
        value
    } else {
        format!("{value} {}", "(sampled)".dimmed())
    }
}

pub fn print_hubs(g: &DepGraph, hubs: &[(NodeId, usize)]) {
    println!("{}", format!("Top hubs of {}", g.name()).bold());
    for (rank, &(id, out)) in hubs.iter().enumerate() {
        println!(
            "  {:>2}. {:<40} {} out / {} in",
            rank + 1,
            g.label(id),
            out.to_string().bold(),
            g.in_degree(id)
        );
    }
}

pub fn print_curve(c: &RobustnessCurve) {
    println!();
    println!(
        "{} {} attack on {}",
        "Completed".green().bold(),
        c.strategy.bold(),
        c.graph.bold()
    );
    row("stop", c.stop.label());
    row(
        "initial LCC",
        &format!("{} of {} nodes", c.initial_lcc, c.initial_nodes),
    );
    row("points", &c.points.len().to_string());
    row("robustness R", &format!("{:.4}", c.robustness_index()));
    match c.half_life() {
        Some(f) => row("half-life", &format!("{:.1}% removed", f * 100.0)),
        None => row("half-life", &"not reached".dimmed().to_string()),
    }
    println!("  {}", format!("({} ms)", c.duration_ms).dimmed());

    println!("  {:<10} {:<10} {:<10} {}", "removed", "lcc", "frac", "components");
    for p in milestone_points(c) {
        println!(
            "  {:<10} {:<10} {:<10.4} {}",
            p.removed, p.lcc_size, p.lcc_fraction, p.components
        );
    }
}

/// All points for short runs, roughly deciles for long ones. The final
/// point always shows.
fn milestone_points(c: &RobustnessCurve) -> Vec<crate::attack::CurvePoint> {
    if c.points.len() <= 12 {
        return c.points.clone();
    }
    let stride = c.points.len() / 10;
    let mut rows: Vec<_> = c.points.iter().copied().step_by(stride.max(1)).collect();
    let last = c.points[c.points.len() - 1];
    if rows.last().map(|p| p.removed) != Some(last.removed) {
        rows.push(last);
    }
    rows
}

pub fn print_ensemble(s: &EnsembleSummary) {
    println!();
    println!(
        "{} {} attack on {} ({} trials)",
        "Completed".green().bold(),
        s.strategy.bold(),
        s.graph.bold(),
        s.trials
    );
    row("mean robustness R", &format!("{:.4}", s.mean_robustness));
    row("points", &s.points.len().to_string());

    println!(
        "  {:<10} {:<10} {:<10} {}",
        "removed", "mean", "min", "max"
    );
    let rows: Vec<&crate::attack::MeanPoint> = if s.points.len() <= 12 {
        s.points.iter().collect()
    } else {
        let stride = (s.points.len() / 10).max(1);
        let mut sampled: Vec<_> = s.points.iter().step_by(stride).collect();
        if let Some(last) = s.points.last() {
            if sampled.last().map(|p| p.removed) != Some(last.removed) {
                sampled.push(last);
            }
        }
        sampled
    };
    for p in rows {
        println!(
            "  {:<10} {:<10.4} {:<10.4} {:.4}",
            p.removed, p.mean_lcc_fraction, p.min_lcc_fraction, p.max_lcc_fraction
        );
    }
}

pub fn print_baseline(real: &EnsembleSummary, twin: &EnsembleSummary) {
    println!();
    println!("{}", "Against a degree-matched random twin".bold());
    row(&real.graph, &format!("R {:.4}", real.mean_robustness));
    row(&twin.graph, &format!("R {:.4}", twin.mean_robustness));
    if real.mean_robustness > 0.0 && twin.mean_robustness > 0.0 {
        let ratio = twin.mean_robustness / real.mean_robustness;
        let verdict = if ratio >= 1.0 {
            format!("{ratio:.2}x more fragile than its random twin")
        } else {
            format!("{:.2}x more robust than its random twin", 1.0 / ratio)
        };
        println!("  {}", verdict.dimmed());
    }
}

pub fn print_comparison(graph: &str, runs: &[EnsembleSummary]) {
    println!();
    println!("{}", format!("Attack comparison on {graph}").bold());
    println!(
        "  {:<14} {:>7} {:>12} {:>9}",
        "strategy", "trials", "robustness", "points"
    );
    let mut ordered: Vec<&EnsembleSummary> = runs.iter().collect();
    ordered.sort_by(|a, b| a.mean_robustness.total_cmp(&b.mean_robustness));
    for r in &ordered {
        println!(
            "  {:<14} {:>7} {:>12.4} {:>9}",
            r.strategy,
            r.trials,
            r.mean_robustness,
            r.points.len()
        );
    }
    if let (Some(worst), Some(best)) = (ordered.first(), ordered.last()) {
        if worst.strategy != best.strategy {
            println!(
                "  {}",
                format!(
                    "{} dismantles fastest (R {:.4} vs {:.4} for {})",
                    worst.strategy, worst.mean_robustness, best.mean_robustness, best.strategy
                )
                .dimmed()
            );
        }
    }
}
