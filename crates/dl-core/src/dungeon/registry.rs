//! The dungeon registry: every placed room of the current level, by node id

#[cfg(not(feature = "std"))]
use crate::compat::*;

use hashbrown::HashMap;

use super::errors::RegistryError;
use super::observer::RoomObserver;
use super::rect::{Bounds, GridPos};
use super::room::PlacedRoom;

/// Keyed store of placed rooms.
///
/// Rooms are kept in insertion order, which is also the order they are
/// handed to the renderer.
#[derive(Debug, Clone, Default)]
pub struct DungeonRegistry {
    rooms: Vec<PlacedRoom>,
    by_id: HashMap<String, usize>,
    current_room: Option<String>,
}

impl DungeonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every room.
    ///
    /// Rooms that were handed to the renderer get exactly one
    /// `room_destroyed` call; clearing an empty registry does nothing.
    pub fn clear(&mut self, observer: &mut dyn RoomObserver) {
        for room in self.rooms.drain(..) {
            if room.is_instantiated {
                observer.room_destroyed(&room);
            }
        }
        self.by_id.clear();
        self.current_room = None;
    }

    pub fn insert(&mut self, room: PlacedRoom) -> Result<(), RegistryError> {
        if self.by_id.contains_key(&room.id) {
            return Err(RegistryError::DuplicateRoom(room.id));
        }
        self.by_id.insert(room.id.clone(), self.rooms.len());
        self.rooms.push(room);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&PlacedRoom> {
        self.by_id.get(id).map(|&i| &self.rooms[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut PlacedRoom> {
        match self.by_id.get(id) {
            Some(&i) => Some(&mut self.rooms[i]),
            None => None,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Rooms in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &PlacedRoom> {
        self.rooms.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlacedRoom> {
        self.rooms.iter_mut()
    }

    /// Check `bounds` against every positioned room
    pub fn overlaps_any(&self, bounds: &Bounds) -> bool {
        self.rooms
            .iter()
            .filter(|r| r.is_positioned)
            .any(|r| r.world_bounds().overlaps(bounds))
    }

    /// Room covering a world tile
    pub fn room_at(&self, pos: GridPos) -> Option<&PlacedRoom> {
        self.rooms.iter().find(|r| r.is_positioned && r.contains(pos))
    }

    /// Smallest rectangle containing every positioned room
    pub fn extent(&self) -> Option<Bounds> {
        self.rooms
            .iter()
            .filter(|r| r.is_positioned)
            .map(PlacedRoom::world_bounds)
            .reduce(|a, b| a.union(&b))
    }

    pub fn current_room(&self) -> Option<&PlacedRoom> {
        self.current_room.as_deref().and_then(|id| self.get(id))
    }

    pub fn has_current_room(&self) -> bool {
        self.current_room.is_some()
    }

    pub fn set_current_room(&mut self, id: &str) {
        self.current_room = Some(id.to_string());
    }

    /// Doorways still open for a child, summed over all rooms
    pub fn available_doorway_count(&self) -> usize {
        self.rooms.iter().map(PlacedRoom::available_doorway_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::blueprint::{RoomBlueprint, RoomRole};
    use crate::dungeon::graph::RoomRoleNode;

    #[derive(Default)]
    struct Destroyed(Vec<String>);

    impl RoomObserver for Destroyed {
        fn room_destroyed(&mut self, room: &PlacedRoom) {
            self.0.push(room.id.clone());
        }
    }

    fn room(id: &str, bounds: Bounds) -> PlacedRoom {
        let node = RoomRoleNode::new(id, RoomRole::Generic);
        let bp = RoomBlueprint::new("bp", RoomRole::Generic, Bounds::from_coords(0, 0, 4, 4));
        let mut room = PlacedRoom::from_blueprint(&node, &bp, bounds);
        room.is_positioned = true;
        room
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = DungeonRegistry::new();
        registry.insert(room("a", Bounds::from_coords(0, 0, 4, 4))).unwrap();
        registry.insert(room("b", Bounds::from_coords(10, 0, 14, 4))).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("b").unwrap().world_lower_bounds, GridPos::new(10, 0));
        assert!(registry.get("c").is_none());
        let ids: Vec<_> = registry.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut registry = DungeonRegistry::new();
        registry.insert(room("a", Bounds::from_coords(0, 0, 4, 4))).unwrap();
        let err = registry.insert(room("a", Bounds::from_coords(9, 9, 10, 10))).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateRoom("a".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_overlaps_any_ignores_unpositioned() {
        let mut registry = DungeonRegistry::new();
        let mut pending = room("a", Bounds::from_coords(0, 0, 4, 4));
        pending.is_positioned = false;
        registry.insert(pending).unwrap();
        assert!(!registry.overlaps_any(&Bounds::from_coords(2, 2, 3, 3)));

        registry.get_mut("a").unwrap().is_positioned = true;
        assert!(registry.overlaps_any(&Bounds::from_coords(2, 2, 3, 3)));
        assert!(!registry.overlaps_any(&Bounds::from_coords(5, 0, 6, 4)));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut registry = DungeonRegistry::new();
        let mut shown = room("shown", Bounds::from_coords(0, 0, 4, 4));
        shown.is_instantiated = true;
        registry.insert(shown).unwrap();
        registry.insert(room("hidden", Bounds::from_coords(10, 0, 14, 4))).unwrap();
        registry.set_current_room("shown");

        let mut observer = Destroyed::default();
        registry.clear(&mut observer);
        assert!(registry.is_empty());
        assert!(registry.current_room().is_none());
        registry.clear(&mut observer);
        assert!(registry.is_empty());

        assert_eq!(observer.0, vec!["shown".to_string()]);
    }

    #[test]
    fn test_room_at_and_extent() {
        let mut registry = DungeonRegistry::new();
        assert!(registry.extent().is_none());
        registry.insert(room("a", Bounds::from_coords(0, 0, 4, 4))).unwrap();
        registry.insert(room("b", Bounds::from_coords(6, -3, 8, 1))).unwrap();
        assert_eq!(registry.room_at(GridPos::new(7, -2)).unwrap().id, "b");
        assert!(registry.room_at(GridPos::new(5, 0)).is_none());
        assert_eq!(registry.extent(), Some(Bounds::from_coords(0, -3, 8, 4)));
    }

    #[test]
    fn test_current_room_pointer() {
        let mut registry = DungeonRegistry::new();
        registry.insert(room("a", Bounds::from_coords(0, 0, 4, 4))).unwrap();
        assert!(!registry.has_current_room());
        registry.set_current_room("a");
        assert_eq!(registry.current_room().unwrap().id, "a");
    }
}
