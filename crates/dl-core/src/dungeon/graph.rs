//! Abstract room-role graphs
//!
//! A graph says which kinds of room exist on a level and which room each one
//! hangs off. It is a tree rooted at the single entrance node.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};

use super::blueprint::RoomRole;
use super::errors::GraphIntegrityError;

/// One abstract room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRoleNode {
    pub id: String,
    pub role: RoomRole,
    /// Only the first entry is used for placement
    #[serde(default)]
    pub parent_ids: Vec<String>,
    #[serde(default)]
    pub child_ids: Vec<String>,
}

impl RoomRoleNode {
    pub fn new(id: impl Into<String>, role: RoomRole) -> Self {
        Self {
            id: id.into(),
            role,
            parent_ids: Vec::new(),
            child_ids: Vec::new(),
        }
    }

    pub fn is_entrance(&self) -> bool {
        self.role == RoomRole::Entrance
    }

    /// Parent this node is placed against
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_ids.first().map(String::as_str)
    }
}

/// A candidate level topology
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRoleGraph {
    #[serde(default)]
    pub name: String,
    pub nodes: Vec<RoomRoleNode>,
}

impl RoomRoleGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Add a node, linking it under `parent` when given.
    ///
    /// The parent must already be in the graph for the link to be recorded
    /// on both sides.
    pub fn add_node(&mut self, id: impl Into<String>, role: RoomRole, parent: Option<&str>) -> &mut Self {
        let mut node = RoomRoleNode::new(id, role);
        if let Some(parent_id) = parent {
            node.parent_ids.push(parent_id.to_string());
            if let Some(p) = self.nodes.iter_mut().find(|n| n.id == parent_id) {
                p.child_ids.push(node.id.clone());
            }
        }
        self.nodes.push(node);
        self
    }

    pub fn node(&self, id: &str) -> Option<&RoomRoleNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// First node with the entrance role
    pub fn entrance(&self) -> Option<&RoomRoleNode> {
        self.nodes.iter().find(|n| n.is_entrance())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check the authoring invariants: one parentless entrance that is
    /// nobody's child, every reference resolves, every other node has a parent.
    pub fn validate(&self) -> Result<(), GraphIntegrityError> {
        let mut entrance: Option<&RoomRoleNode> = None;
        for node in &self.nodes {
            if !node.is_entrance() {
                continue;
            }
            if let Some(first) = entrance {
                return Err(GraphIntegrityError::MultipleEntrances {
                    graph: self.name.clone(),
                    first: first.id.clone(),
                    second: node.id.clone(),
                });
            }
            if !node.parent_ids.is_empty() {
                return Err(GraphIntegrityError::EntranceHasParent { id: node.id.clone() });
            }
            entrance = Some(node);
        }
        let entrance = entrance.ok_or_else(|| GraphIntegrityError::MissingEntrance {
            graph: self.name.clone(),
        })?;

        for node in &self.nodes {
            for other in node.parent_ids.iter().chain(node.child_ids.iter()) {
                if self.node(other).is_none() {
                    return Err(GraphIntegrityError::UnknownNode {
                        id: node.id.clone(),
                        missing: other.clone(),
                    });
                }
            }
            if node.child_ids.iter().any(|c| *c == entrance.id) {
                return Err(GraphIntegrityError::EntranceHasParent { id: entrance.id.clone() });
            }
            if !node.is_entrance() && node.parent_ids.is_empty() {
                return Err(GraphIntegrityError::Orphan { id: node.id.clone() });
            }
        }
        Ok(())
    }
}
