//! Level definitions
//!
//! A level definition bundles the candidate role graphs and the blueprint
//! catalogue for one level. It is authored as JSON.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};
#[cfg(feature = "std")]
use std::path::Path;
#[cfg(feature = "std")]
use thiserror::Error;

use crate::config::GenerationConfig;
use crate::dungeon::{RoomBlueprint, RoomRoleGraph};

/// Errors raised while loading a level definition
#[cfg(feature = "std")]
#[derive(Error, Debug)]
pub enum LevelLoadError {
    #[error("could not read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid level definition: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything needed to generate one level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    #[serde(default)]
    pub name: String,
    pub role_graphs: Vec<RoomRoleGraph>,
    pub blueprints: Vec<RoomBlueprint>,
    /// Per-level retry budgets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationConfig>,
}

impl LevelDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Budgets from the level, or the defaults
    pub fn generation_config(&self) -> GenerationConfig {
        self.generation.unwrap_or_default()
    }

    #[cfg(feature = "std")]
    pub fn from_json_str(json: &str) -> Result<Self, LevelLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(feature = "std")]
    /// Load a level definition from a JSON file
    pub fn load(path: &Path) -> Result<Self, LevelLoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    #[cfg(feature = "std")]
    pub fn to_json_string(&self) -> Result<String, LevelLoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
