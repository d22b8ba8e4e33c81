//! Generation budgets
//!
//! The outer budget bounds how many role graphs are tried; the inner budget
//! bounds how many times the placement of one graph is rebuilt from scratch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of role graphs tried before giving up
pub const DEFAULT_MAX_DUNGEON_BUILD_ATTEMPTS: u32 = 10;

/// Default number of rebuilds per role graph (one extra pass is always run)
pub const DEFAULT_MAX_DUNGEON_REBUILD_ATTEMPTS_FOR_NODE_GRAPH: u32 = 10;

/// Errors raised by configuration validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_dungeon_build_attempts must be at least 1")]
    ZeroBuildAttempts,
}

/// Retry budgets for [`crate::dungeon::DungeonGenerator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Outer loop: how many times a fresh role graph is drawn
    pub max_dungeon_build_attempts: u32,

    /// Inner loop: how many times a failed graph is rebuilt before moving on
    pub max_dungeon_rebuild_attempts_for_node_graph: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_dungeon_build_attempts: DEFAULT_MAX_DUNGEON_BUILD_ATTEMPTS,
            max_dungeon_rebuild_attempts_for_node_graph:
                DEFAULT_MAX_DUNGEON_REBUILD_ATTEMPTS_FOR_NODE_GRAPH,
        }
    }
}

impl GenerationConfig {
    pub fn new(max_dungeon_build_attempts: u32, max_dungeon_rebuild_attempts_for_node_graph: u32) -> Self {
        Self {
            max_dungeon_build_attempts,
            max_dungeon_rebuild_attempts_for_node_graph,
        }
    }

    /// Placement passes run for a single graph
    pub fn passes_per_graph(&self) -> u32 {
        self.max_dungeon_rebuild_attempts_for_node_graph.saturating_add(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_dungeon_build_attempts == 0 {
            return Err(ConfigError::ZeroBuildAttempts);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.max_dungeon_build_attempts, 10);
        assert_eq!(config.max_dungeon_rebuild_attempts_for_node_graph, 10);
        assert_eq!(config.passes_per_graph(), 11);
    }

    #[test]
    fn test_zero_outer_budget_rejected() {
        let config = GenerationConfig::new(0, 3);
        assert_eq!(config.validate(), Err(ConfigError::ZeroBuildAttempts));
        assert!(GenerationConfig::new(1, 0).validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{ "max_dungeon_build_attempts": 3 }"#).unwrap();
        assert_eq!(config.max_dungeon_build_attempts, 3);
        assert_eq!(config.max_dungeon_rebuild_attempts_for_node_graph, 10);
    }
}
