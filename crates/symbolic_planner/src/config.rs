//! Configuration for the planner.

use std::path::Path;

use serde::{Deserialize, Serialize};
use symbolic_logic::InferenceEngine;

use crate::error::{Error, Result};

/// Defines how a `Planner` searches and how its goal tests are chained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Largest depth bound tried by `Planner::plan`.
    pub max_depth: usize,
    /// Pass budget for every forward-chaining run; `None` chains until the fixpoint.
    pub max_fixpoint_passes: Option<usize>,
    /// Stop deepening once a bound fails without hitting the depth cutoff.
    pub stop_when_exhausted: bool,
    /// Reject rule bases that use one predicate name with two arities.
    pub check_arity: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            max_fixpoint_passes: None,
            stop_when_exhausted: true,
            check_arity: true,
        }
    }
}

impl PlannerConfig {
    /// Creates a configuration with the given depth bound.
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Tries every depth bound up to `max_depth`, even after the search space
    /// has been exhausted.
    pub fn exhaustive(max_depth: usize) -> Self {
        Self {
            max_depth,
            stop_when_exhausted: false,
            ..Default::default()
        }
    }

    /// A configuration that guards every inference run with a pass budget,
    /// for rule bases that are not known to saturate.
    pub fn guarded(max_depth: usize, max_passes: usize) -> Self {
        Self {
            max_depth,
            max_fixpoint_passes: Some(max_passes),
            ..Default::default()
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_fixpoint_limit(mut self, passes: usize) -> Self {
        self.max_fixpoint_passes = Some(passes);
        self
    }

    pub fn with_early_exhaustion(mut self, enabled: bool) -> Self {
        self.stop_when_exhausted = enabled;
        self
    }

    pub fn with_arity_check(mut self, enabled: bool) -> Self {
        self.check_arity = enabled;
        self
    }

    /// Checks the configuration for values the planner cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::Config("max_depth must be at least 1".into()));
        }
        if self.max_fixpoint_passes == Some(0) {
            return Err(Error::Config(
                "max_fixpoint_passes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Builds the inference engine used for goal tests, deliberation and effects.
    pub fn engine(&self) -> InferenceEngine {
        let engine = InferenceEngine::new().with_arity_check(self.check_arity);
        match self.max_fixpoint_passes {
            Some(passes) => engine.with_max_passes(passes),
            None => engine,
        }
    }

    /// Parses and validates a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
