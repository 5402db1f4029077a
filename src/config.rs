// src/config.rs
//! `fracture.toml` settings.
//!
//! Every field has a default, so a missing file or an empty section is
//! fine; the CLI flags override whatever the file says.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::attack::StepSize;
use crate::edgelist::LoadOptions;
use crate::error::{FractureError, Result};
use crate::metrics::clustering::ClusteringOptions;
use crate::metrics::paths::PathOptions;
use crate::metrics::MetricsOptions;

pub const CONFIG_FILE: &str = "fracture.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FractureToml {
    #[serde(default)]
    pub io: IoConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IoConfig {
    /// Drop `u -> u` edges while loading.
    #[serde(default = "default_true")]
    pub drop_self_loops: bool,
    /// Fail on exact duplicate edges instead of merging them.
    #[serde(default)]
    pub strict_edges: bool,
    /// Regex patterns; edges touching a matching label are skipped.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            drop_self_loops: true,
            strict_edges: false,
            exclude: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Largest component size that still gets exact all-sources BFS.
    #[serde(default = "default_max_exact_sources")]
    pub max_exact_sources: usize,
    /// BFS sources drawn when sampling path lengths.
    #[serde(default = "default_path_samples")]
    pub path_samples: usize,
    /// Respect edge direction in path metrics.
    #[serde(default)]
    pub directed_paths: bool,
    /// Largest node count that still gets exact clustering.
    #[serde(default = "default_max_exact_clustering")]
    pub max_exact_clustering_nodes: usize,
    /// Wedge samples drawn when estimating clustering.
    #[serde(default = "default_clustering_trials")]
    pub clustering_trials: usize,
    /// Seed shared by all metric sampling.
    #[serde(default = "default_sampling_seed")]
    pub sampling_seed: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            max_exact_sources: default_max_exact_sources(),
            path_samples: default_path_samples(),
            directed_paths: false,
            max_exact_clustering_nodes: default_max_exact_clustering(),
            clustering_trials: default_clustering_trials(),
            sampling_seed: default_sampling_seed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Independent trials for randomized strategies.
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Measurement steps across the whole attack; 0 means measure after
    /// every single removal.
    #[serde(default)]
    pub steps: usize,
    #[serde(default)]
    pub stop: StopRule,
    /// LCC fraction that triggers the `threshold` stop rule.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            steps: 0,
            stop: StopRule::default(),
            threshold: default_threshold(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopRule {
    #[default]
    Exhaustion,
    Threshold,
}

const fn default_true() -> bool {
    true
}
const fn default_max_exact_sources() -> usize {
    1_000
}
const fn default_path_samples() -> usize {
    512
}
const fn default_max_exact_clustering() -> usize {
    10_000
}
const fn default_clustering_trials() -> usize {
    100_000
}
const fn default_sampling_seed() -> u64 {
    42
}
const fn default_trials() -> usize {
    1
}
const fn default_threshold() -> f64 {
    0.25
}

impl FractureToml {
    /// Loads `fracture.toml` from `dir`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    /// Unreadable or unparsable files are errors; absence is not.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|e| FractureError::Io {
            source: e,
            path: path.clone(),
        })?;
        Self::parse(&text).map_err(|e| match e {
            FractureError::Config(msg) => {
                FractureError::Config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Parses config text.
    ///
    /// # Errors
    /// `Config` with the toml parser's message.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| FractureError::Config(e.to_string()))
    }

    /// Compiles the `[io]` section into loader options.
    ///
    /// # Errors
    /// `Pattern` when an exclude regex does not compile.
    pub fn load_options(&self) -> Result<LoadOptions> {
        let exclude = self
            .io
            .exclude
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(LoadOptions {
            strict_edges: self.io.strict_edges,
            keep_self_loops: !self.io.drop_self_loops,
            exclude,
        })
    }

    #[must_use]
    pub fn metrics_options(&self) -> MetricsOptions {
        MetricsOptions {
            paths: PathOptions {
                directed: self.metrics.directed_paths,
                max_exact_sources: self.metrics.max_exact_sources,
                samples: self.metrics.path_samples,
                seed: self.metrics.sampling_seed,
            },
            clustering: ClusteringOptions {
                max_exact_nodes: self.metrics.max_exact_clustering_nodes,
                trials: self.metrics.clustering_trials,
                seed: self.metrics.sampling_seed,
            },
        }
    }

    /// Translates `[simulation].steps` into a batch size: `steps = 0` is
    /// one node per batch, otherwise the attack is split into that many
    /// measurement steps.
    #[must_use]
    pub fn step_size(&self) -> StepSize {
        match self.simulation.steps {
            0 => StepSize::Nodes(1),
            steps => StepSize::Fraction(1.0 / steps as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FractureToml, StopRule};

    #[test]
    fn empty_text_is_all_defaults() {
        let cfg = FractureToml::parse("").unwrap();
        assert!(cfg.io.drop_self_loops);
        assert!(!cfg.io.strict_edges);
        assert_eq!(cfg.metrics.path_samples, 512);
        assert_eq!(cfg.metrics.sampling_seed, 42);
        assert_eq!(cfg.simulation.trials, 1);
        assert_eq!(cfg.simulation.stop, StopRule::Exhaustion);
    }

    #[test]
    fn partial_sections_override_selectively() {
        let cfg = FractureToml::parse(
            r#"
[io]
strict_edges = true
exclude = ["^vendor/"]

[simulation]
steps = 50
stop = "threshold"
threshold = 0.1
"#,
        )
        .unwrap();
        assert!(cfg.io.strict_edges);
        assert!(cfg.io.drop_self_loops);
        assert_eq!(cfg.simulation.steps, 50);
        assert_eq!(cfg.simulation.stop, StopRule::Threshold);
        assert!((cfg.simulation.threshold - 0.1).abs() < 1e-12);
        assert_eq!(cfg.metrics.clustering_trials, 100_000);
    }

    #[test]
    fn bad_exclude_pattern_is_an_error() {
        let cfg = FractureToml::parse("[io]\nexclude = [\"(\"]\n").unwrap();
        assert!(cfg.load_options().is_err());
    }

    #[test]
    fn garbage_toml_is_a_config_error() {
        assert!(FractureToml::parse("not [ toml").is_err());
    }

    #[test]
    fn steps_map_to_batch_fractions() {
        let cfg = FractureToml::parse("[simulation]\nsteps = 50\n").unwrap();
        match cfg.step_size() {
            crate::attack::StepSize::Fraction(f) => assert!((f - 0.02).abs() < 1e-12),
            crate::attack::StepSize::Nodes(_) => panic!("expected fraction"),
        }
    }
}
