//! Dungeon layout
//!
//! Contains room geometry, doorways, blueprints, role graphs, the placement
//! engine and the registry of placed rooms.

mod blueprint;
mod doorway;
mod errors;
mod generator;
mod graph;
mod observer;
mod placement;
mod rect;
mod registry;
mod room;

pub use blueprint::{BlueprintCatalogue, RoomBlueprint, RoomRole};
pub use doorway::{child_world_bounds, Direction, Doorway};
pub use errors::{GenerationError, GraphIntegrityError, RegistryError};
pub use generator::{generate_dungeon, DungeonGenerator, GenerationReport};
pub use graph::{RoomRoleGraph, RoomRoleNode};
pub use observer::{NullObserver, RoomObserver};
pub use placement::{place_against_parent, place_entrance, PassOutcome, PassStep, PlacementPass};
pub use rect::{interval_overlaps, overlaps, Bounds, GridPos};
pub use registry::DungeonRegistry;
pub use room::PlacedRoom;
