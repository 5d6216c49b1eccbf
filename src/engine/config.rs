//! Reasoner configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{HprError, HprResult};

use super::history::Inference;

/// Tunable constants of the reasoner.
///
/// The certainty factors are heuristics of plausible reasoning theory and
/// are kept as configuration rather than derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasonerConfig {
    /// Maximum number of nested inference frames.
    pub max_depth: u32,
    /// Answers kept per question (and per operator).
    pub max_answers: usize,
    /// Inference frames allowed per question before every branch backtracks.
    pub max_calls: u64,
    /// Penalty for generalizing after specializing on the same focus (or the reverse).
    pub gen_spec_degradation: f32,
    pub abduction_degradation: f32,
    /// Dependency intensity a context needs to count as relevant.
    pub min_dependency_intensity: f32,
    /// Intensity used when no context of a hierarchical link is relevant.
    pub unverified_context_intensity: f32,
    /// Derivation lines kept per path.
    pub max_trace_lines: usize,
    /// Operators the recall fan-out skips.
    pub disabled: Vec<Inference>,
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            max_depth: 7,
            max_answers: 3,
            max_calls: 250_000,
            gen_spec_degradation: 0.3,
            abduction_degradation: 0.3,
            min_dependency_intensity: 0.1,
            unverified_context_intensity: 0.1,
            max_trace_lines: 30,
            disabled: vec![
                Inference::Abduction,
                Inference::Causality,
                Inference::Attribute,
            ],
        }
    }
}

impl ReasonerConfig {
    /// Default constants with exactly `operators` enabled.
    pub fn only(operators: &[Inference]) -> Self {
        Self {
            disabled: Inference::OPERATORS
                .iter()
                .copied()
                .filter(|op| !operators.contains(op))
                .collect(),
            ..Self::default()
        }
    }

    pub fn is_enabled(&self, inference: Inference) -> bool {
        !self.disabled.contains(&inference)
    }

    pub fn enable(&mut self, inference: Inference) {
        self.disabled.retain(|i| *i != inference);
    }

    pub fn disable(&mut self, inference: Inference) {
        if !self.disabled.contains(&inference) {
            self.disabled.push(inference);
        }
    }

    /// Read a TOML configuration file; missing keys take their defaults.
    pub fn load(path: &Path) -> HprResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| HprError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|e| HprError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write this configuration as TOML.
    pub fn save(&self, path: &Path) -> HprResult<()> {
        let text = toml::to_string_pretty(self).map_err(|e| HprError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, text).map_err(|source| HprError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}
