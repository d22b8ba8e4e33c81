//! Room roles, blueprints and the blueprint catalogue

#[cfg(not(feature = "std"))]
use crate::compat::*;

use hashbrown::HashMap;
use log::warn;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::doorway::{Direction, Doorway};
use super::rect::{Bounds, GridPos};
use crate::rng::LayoutRng;

/// What a room is for.
///
/// `Corridor` only appears on graph nodes: the concrete orientation
/// (`CorridorNS` or `CorridorEW`) is decided when the parent doorway is known.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RoomRole {
    Entrance,
    Corridor,
    #[serde(rename = "corridor-ns")]
    #[strum(serialize = "corridor-ns")]
    CorridorNS,
    #[serde(rename = "corridor-ew")]
    #[strum(serialize = "corridor-ew")]
    CorridorEW,
    Generic,
    Boss,
    Shop,
    Chest,
    Exit,
    #[default]
    None,
}

impl RoomRole {
    pub fn is_corridor(self) -> bool {
        matches!(self, RoomRole::Corridor | RoomRole::CorridorNS | RoomRole::CorridorEW)
    }

    /// Blueprint role to draw from when attaching a room of this role to a
    /// parent doorway facing `parent_facing`.
    pub fn blueprint_role_for(self, parent_facing: Direction) -> RoomRole {
        match self {
            RoomRole::Corridor if parent_facing.is_vertical() => RoomRole::CorridorNS,
            RoomRole::Corridor if parent_facing.is_horizontal() => RoomRole::CorridorEW,
            other => other,
        }
    }
}

/// An authored room template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomBlueprint {
    pub guid: String,
    pub role: RoomRole,
    pub lower_bounds: GridPos,
    pub upper_bounds: GridPos,
    #[serde(default)]
    pub doorways: Vec<Doorway>,
    /// Tiles where the embedding game may spawn things; not interpreted here
    #[serde(default)]
    pub spawn_positions: Vec<GridPos>,
    /// Enemy spawn entries; a room without any starts cleared
    #[serde(default)]
    pub enemy_spawns: Vec<String>,
    /// Renderable prefab reference, passed through untouched
    #[serde(default)]
    pub prefab: String,
}

impl RoomBlueprint {
    pub fn new(guid: impl Into<String>, role: RoomRole, bounds: Bounds) -> Self {
        Self {
            guid: guid.into(),
            role,
            lower_bounds: bounds.lower,
            upper_bounds: bounds.upper,
            doorways: Vec::new(),
            spawn_positions: Vec::new(),
            enemy_spawns: Vec::new(),
            prefab: String::new(),
        }
    }

    /// Builder-style doorway helper
    pub fn with_doorway(mut self, x: i32, y: i32, orientation: Direction) -> Self {
        self.doorways.push(Doorway::new(GridPos::new(x, y), orientation));
        self
    }

    pub fn with_enemy_spawn(mut self, spawn: impl Into<String>) -> Self {
        self.enemy_spawns.push(spawn.into());
        self
    }

    /// Local bounding box
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.lower_bounds, self.upper_bounds)
    }

    /// Index of the doorway facing `orientation`
    pub fn doorway_facing(&self, orientation: Direction) -> Option<usize> {
        if orientation == Direction::None {
            return None;
        }
        self.doorways.iter().position(|d| d.orientation == orientation)
    }

    /// Deep copy of the doorway list with fresh connection state
    pub fn fresh_doorways(&self) -> Vec<Doorway> {
        self.doorways.iter().map(Doorway::fresh_copy).collect()
    }

    /// Drop duplicate-direction doorways, keeping the first of each.
    /// Returns how many were removed.
    fn dedup_doorways(&mut self) -> usize {
        let before = self.doorways.len();
        let mut seen: Vec<Direction> = Vec::with_capacity(4);
        self.doorways.retain(|d| {
            if d.orientation == Direction::None {
                return true;
            }
            if seen.contains(&d.orientation) {
                false
            } else {
                seen.push(d.orientation);
                true
            }
        });
        before - self.doorways.len()
    }
}

/// Read-only blueprint lookup keyed by guid.
///
/// Input order is kept so that random picks are reproducible for a seed.
#[derive(Debug, Clone, Default)]
pub struct BlueprintCatalogue {
    blueprints: Vec<RoomBlueprint>,
    by_guid: HashMap<String, usize>,
}

impl BlueprintCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalogue.
    ///
    /// Duplicate guids are reported and the first one in input order wins.
    /// Blueprints with inverted or oversized bounds are skipped; extra doorways for an
    /// already-used direction are dropped.
    pub fn from_blueprints<I>(blueprints: I) -> Self
    where
        I: IntoIterator<Item = RoomBlueprint>,
    {
        let mut catalogue = Self::new();
        for blueprint in blueprints {
            catalogue.insert(blueprint);
        }
        catalogue
    }

    /// Add one blueprint. Returns false if it was rejected.
    pub fn insert(&mut self, mut blueprint: RoomBlueprint) -> bool {
        if self.by_guid.contains_key(&blueprint.guid) {
            warn!("duplicate room blueprint guid '{}', keeping the first one", blueprint.guid);
            return false;
        }
        if !blueprint.bounds().is_valid() {
            warn!(
                "room blueprint '{}' has inverted bounds {:?}-{:?}, skipping",
                blueprint.guid, blueprint.lower_bounds, blueprint.upper_bounds
            );
            return false;
        }
        if blueprint.bounds().checked_extent().is_none() {
            warn!(
                "room blueprint '{}' spans more than the i32 coordinate range, skipping",
                blueprint.guid
            );
            return false;
        }
        let dropped = blueprint.dedup_doorways();
        if dropped > 0 {
            warn!(
                "room blueprint '{}' has {} extra doorway(s) for an already used direction",
                blueprint.guid, dropped
            );
        }
        self.by_guid.insert(blueprint.guid.clone(), self.blueprints.len());
        self.blueprints.push(blueprint);
        true
    }

    pub fn get(&self, guid: &str) -> Option<&RoomBlueprint> {
        self.by_guid.get(guid).map(|&i| &self.blueprints[i])
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoomBlueprint> {
        self.blueprints.iter()
    }

    /// All blueprints tagged `role`, in input order
    pub fn with_role(&self, role: RoomRole) -> Vec<&RoomBlueprint> {
        self.blueprints.iter().filter(|b| b.role == role).collect()
    }

    /// Uniformly random blueprint tagged `role`
    pub fn random_with_role(&self, role: RoomRole, rng: &mut LayoutRng) -> Option<&RoomBlueprint> {
        let candidates = self.with_role(role);
        rng.choose(&candidates).copied()
    }
}
