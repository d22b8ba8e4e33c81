//! Error types for layout generation
//!
//! Overlaps and doorway mismatches are not errors: they are absorbed by the
//! placement engine's backtracking and never show up here.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use thiserror::Error;

use crate::config::ConfigError;

/// The role graph cannot be walked
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphIntegrityError {
    #[error("role graph '{graph}' has no entrance node")]
    MissingEntrance { graph: String },

    #[error("role graph '{graph}' has more than one entrance node ('{first}', '{second}')")]
    MultipleEntrances { graph: String, first: String, second: String },

    #[error("entrance node '{id}' must not have parents")]
    EntranceHasParent { id: String },

    #[error("node '{id}' has no parent")]
    Orphan { id: String },

    #[error("node '{id}' references unknown node '{missing}'")]
    UnknownNode { id: String, missing: String },

    #[error("node '{id}' was reached before its parent '{parent}' was placed")]
    ParentNotPlaced { id: String, parent: String },

    #[error("node '{id}' was reached twice; the role graph is not a tree")]
    Revisited { id: String },
}

/// Dungeon registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("room '{0}' is already in the registry")]
    DuplicateRoom(String),
}

/// Reported to the caller of `DungeonGenerator::generate`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("level definition has no role graphs")]
    NoRoleGraphs,

    #[error("invalid generation config: {0}")]
    Config(#[from] ConfigError),

    #[error("no layout found after {outer_attempts} graph attempts ({passes} placement passes)")]
    ExhaustedRetryBudget { outer_attempts: u32, passes: u32 },
}
