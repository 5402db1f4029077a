// src/report/export.rs
//! Machine-readable output: TSV for spreadsheets and gnuplot, JSON for
//! everything else. A missing target path means stdout.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;

use crate::attack::{EnsembleSummary, RobustnessCurve};
use crate::error::{FractureError, Result};
use crate::metrics::GraphSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Tsv,
    Json,
}

/// Writes a single-trial curve.
///
/// # Errors
/// File creation, write, and JSON serialization failures.
pub fn write_curve(
    curve: &RobustnessCurve,
    format: OutputFormat,
    target: Option<&Path>,
) -> Result<()> {
    match format {
        OutputFormat::Tsv => {
            let mut out = sink(target)?;
            curve.write_tsv(&mut out).map_err(|e| io_err(e, target))
        }
        OutputFormat::Json => write_json(curve, target),
    }
}

/// Writes an averaged multi-trial curve.
///
/// # Errors
/// Same failure modes as [`write_curve`].
pub fn write_ensemble(
    summary: &EnsembleSummary,
    format: OutputFormat,
    target: Option<&Path>,
) -> Result<()> {
    match format {
        OutputFormat::Tsv => {
            let mut out = sink(target)?;
            summary.write_tsv(&mut out).map_err(|e| io_err(e, target))
        }
        OutputFormat::Json => write_json(summary, target),
    }
}

/// Writes a graph summary; the TSV form is `metric<TAB>value` rows.
///
/// # Errors
/// Same failure modes as [`write_curve`].
pub fn write_summary(
    summary: &GraphSummary,
    format: OutputFormat,
    target: Option<&Path>,
) -> Result<()> {
    match format {
        OutputFormat::Tsv => {
            let mut out = sink(target)?;
            summary_tsv(summary, &mut out).map_err(|e| io_err(e, target))
        }
        OutputFormat::Json => write_json(summary, target),
    }
}

fn summary_tsv<W: Write>(s: &GraphSummary, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "% {}", s.name)?;
    writeln!(out, "nodes\t{}", s.nodes)?;
    writeln!(out, "edges\t{}", s.edges)?;
    writeln!(out, "density\t{:.8}", s.density)?;
    writeln!(out, "mean_total_degree\t{:.6}", s.mean_total_degree)?;
    writeln!(out, "max_in_degree\t{}", s.max_in_degree)?;
    writeln!(out, "max_out_degree\t{}", s.max_out_degree)?;
    writeln!(out, "largest_component\t{}", s.largest_component)?;
    writeln!(out, "components\t{}", s.components)?;
    writeln!(out, "assortativity\t{}", opt(s.assortativity))?;
    writeln!(out, "avg_path_length\t{}", opt(s.avg_path_length))?;
    writeln!(out, "clustering\t{}", opt(s.clustering))?;
    out.flush()
}

fn opt(v: Option<f64>) -> String {
    v.map_or_else(|| "nan".to_string(), |x| format!("{x:.6}"))
}

fn write_json<T: Serialize>(value: &T, target: Option<&Path>) -> Result<()> {
    let mut out = sink(target)?;
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out).map_err(|e| io_err(e, target))?;
    out.flush().map_err(|e| io_err(e, target))
}

fn sink(target: Option<&Path>) -> Result<Box<dyn Write>> {
    match target {
        Some(path) => {
            let file = File::create(path).map_err(|e| FractureError::Io {
                source: e,
                path: path.to_path_buf(),
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}

fn io_err(source: std::io::Error, target: Option<&Path>) -> FractureError {
    FractureError::Io {
        source,
        path: target.map_or_else(|| PathBuf::from("<stdout>"), Path::to_path_buf),
    }
}
