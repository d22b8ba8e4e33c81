//! Callbacks into the embedding application
//!
//! The generator never paints tiles or spawns scene content itself; it tells
//! a `RoomObserver` when rooms should appear or go away.

use super::room::PlacedRoom;

/// Receives layout lifecycle events. All methods default to no-ops.
pub trait RoomObserver {
    /// A room of a successful layout should be materialised.
    /// Called once per room, in registry insertion order.
    fn room_instantiated(&mut self, _room: &PlacedRoom) {}

    /// The player's starting room is known. Called once per successful layout.
    fn current_room_changed(&mut self, _room: &PlacedRoom) {}

    /// A previously instantiated room is being discarded.
    fn room_destroyed(&mut self, _room: &PlacedRoom) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl RoomObserver for NullObserver {}
