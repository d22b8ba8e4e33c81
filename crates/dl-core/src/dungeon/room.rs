//! Placed rooms
//!
//! A `PlacedRoom` is a blueprint instance sitting at a world position. It owns
//! a private copy of the blueprint's doorways so that connection state from
//! one attempt never reaches the catalogue or another room.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};

use super::blueprint::{RoomBlueprint, RoomRole};
use super::doorway::{Direction, Doorway};
use super::graph::RoomRoleNode;
use super::rect::{Bounds, GridPos};

/// A room positioned in world space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedRoom {
    /// Id of the role-graph node this room realises
    pub id: String,
    pub blueprint_guid: String,
    /// Role of the node (`Corridor` stays `Corridor` even when a
    /// `CorridorNS` blueprint was used)
    pub role: RoomRole,
    pub world_lower_bounds: GridPos,
    pub world_upper_bounds: GridPos,
    /// Blueprint-local lower corner, used to map doorway positions
    pub template_lower_bounds: GridPos,
    pub doorways: Vec<Doorway>,
    pub parent_id: Option<String>,
    pub child_ids: Vec<String>,
    pub spawn_positions: Vec<GridPos>,
    pub prefab: String,
    pub is_positioned: bool,
    pub is_clear_of_enemies: bool,
    pub is_previously_visited: bool,
    /// Set once the renderer has been told to materialise this room
    pub is_instantiated: bool,
}

impl PlacedRoom {
    /// Instantiate `blueprint` for `node` at `world_bounds`.
    ///
    /// The room is not yet positioned; the caller flips `is_positioned` once
    /// the bounds have passed the overlap test.
    pub fn from_blueprint(node: &RoomRoleNode, blueprint: &RoomBlueprint, world_bounds: Bounds) -> Self {
        Self {
            id: node.id.clone(),
            blueprint_guid: blueprint.guid.clone(),
            role: node.role,
            world_lower_bounds: world_bounds.lower,
            world_upper_bounds: world_bounds.upper,
            template_lower_bounds: blueprint.lower_bounds,
            doorways: blueprint.fresh_doorways(),
            parent_id: node.parent_id().map(str::to_string),
            child_ids: node.child_ids.clone(),
            spawn_positions: blueprint.spawn_positions.clone(),
            prefab: blueprint.prefab.clone(),
            is_positioned: false,
            is_clear_of_enemies: blueprint.enemy_spawns.is_empty(),
            is_previously_visited: false,
            is_instantiated: false,
        }
    }

    pub fn world_bounds(&self) -> Bounds {
        Bounds::new(self.world_lower_bounds, self.world_upper_bounds)
    }

    /// Map a blueprint-local position into world space
    pub fn to_world(&self, local: GridPos) -> GridPos {
        self.world_lower_bounds + (local - self.template_lower_bounds)
    }

    /// World tile of doorway `index`, `None` if missing or out of `i32` range
    pub fn doorway_world_position(&self, index: usize) -> Option<GridPos> {
        let local = self.doorways.get(index)?.position;
        self.world_lower_bounds
            .checked_add(local.checked_sub(self.template_lower_bounds)?)
    }

    /// Check if a world tile is inside this room
    pub fn contains(&self, pos: GridPos) -> bool {
        self.world_bounds().contains(pos)
    }

    /// Indices of doorways still open for a child
    pub fn available_doorways(&self) -> Vec<usize> {
        self.doorways
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_available())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn available_doorway_count(&self) -> usize {
        self.doorways.iter().filter(|d| d.is_available()).count()
    }

    pub fn connected_doorways(&self) -> impl Iterator<Item = &Doorway> {
        self.doorways.iter().filter(|d| d.connected)
    }

    /// Connected doorway facing `orientation`, if any
    pub fn connected_doorway_facing(&self, orientation: Direction) -> Option<&Doorway> {
        self.connected_doorways().find(|d| d.orientation == orientation)
    }

    pub fn is_entrance(&self) -> bool {
        self.role == RoomRole::Entrance
    }

    /// Center tile, rounded toward the lower corner
    pub fn center(&self) -> GridPos {
        let b = self.world_bounds();
        GridPos::new(
            b.lower.x + (b.width() - 1) / 2,
            b.lower.y + (b.height() - 1) / 2,
        )
    }
}
