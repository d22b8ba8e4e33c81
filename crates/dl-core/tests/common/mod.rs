//! Shared fixtures for the integration tests

#![allow(dead_code)]

use dl_core::dungeon::{
    Bounds, Direction, DungeonRegistry, PlacedRoom, RoomBlueprint, RoomObserver, RoomRole, RoomRoleGraph,
};
use dl_core::{LayoutRng, LevelDefinition};

/// Records every observer callback in order
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<String>,
}

impl EventLog {
    pub fn count(&self, prefix: &str) -> usize {
        self.events.iter().filter(|e| e.starts_with(prefix)).count()
    }
}

impl RoomObserver for EventLog {
    fn room_instantiated(&mut self, room: &PlacedRoom) {
        self.events.push(format!("instantiated:{}", room.id));
    }

    fn current_room_changed(&mut self, room: &PlacedRoom) {
        self.events.push(format!("current:{}", room.id));
    }

    fn room_destroyed(&mut self, room: &PlacedRoom) {
        self.events.push(format!("destroyed:{}", room.id));
    }
}

/// Room with a doorway in the middle of every wall
pub fn four_door_room(guid: &str, role: RoomRole, w: i32, h: i32) -> RoomBlueprint {
    RoomBlueprint::new(guid, role, Bounds::from_coords(0, 0, w, h))
        .with_doorway(w / 2, h, Direction::North)
        .with_doorway(w / 2, 0, Direction::South)
        .with_doorway(w, h / 2, Direction::East)
        .with_doorway(0, h / 2, Direction::West)
}

pub fn corridor_ns(guid: &str, len: i32) -> RoomBlueprint {
    RoomBlueprint::new(guid, RoomRole::CorridorNS, Bounds::from_coords(0, 0, 2, len))
        .with_doorway(1, len, Direction::North)
        .with_doorway(1, 0, Direction::South)
}

pub fn corridor_ew(guid: &str, len: i32) -> RoomBlueprint {
    RoomBlueprint::new(guid, RoomRole::CorridorEW, Bounds::from_coords(0, 0, len, 2))
        .with_doorway(len, 1, Direction::East)
        .with_doorway(0, 1, Direction::West)
}

/// The three-room chain: entrance -> corridor-ew -> generic
pub fn chain_level() -> LevelDefinition {
    let mut graph = RoomRoleGraph::new("chain");
    graph
        .add_node("entrance", RoomRole::Entrance, None)
        .add_node("corridor", RoomRole::CorridorEW, Some("entrance"))
        .add_node("room", RoomRole::Generic, Some("corridor"));

    let mut level = LevelDefinition::new("chain");
    level.role_graphs.push(graph);
    level.blueprints = vec![
        RoomBlueprint::new("entrance-bp", RoomRole::Entrance, Bounds::from_coords(0, 0, 4, 4))
            .with_doorway(4, 2, Direction::East),
        RoomBlueprint::new("corridor-bp", RoomRole::CorridorEW, Bounds::from_coords(0, 0, 2, 2))
            .with_doorway(0, 1, Direction::West)
            .with_doorway(2, 1, Direction::East),
        RoomBlueprint::new("room-bp", RoomRole::Generic, Bounds::from_coords(0, 0, 4, 4))
            .with_doorway(0, 2, Direction::West),
    ];
    level
}

/// Catalogue with every placeable role
pub fn full_catalogue() -> Vec<RoomBlueprint> {
    vec![
        four_door_room("entrance", RoomRole::Entrance, 6, 6),
        four_door_room("generic-small", RoomRole::Generic, 4, 4),
        four_door_room("generic-wide", RoomRole::Generic, 10, 4),
        four_door_room("shop", RoomRole::Shop, 6, 4),
        four_door_room("chest", RoomRole::Chest, 2, 2),
        four_door_room("boss", RoomRole::Boss, 10, 10),
        four_door_room("exit", RoomRole::Exit, 4, 4),
        corridor_ns("corridor-ns-short", 4),
        corridor_ns("corridor-ns-long", 9),
        corridor_ew("corridor-ew-short", 4),
        corridor_ew("corridor-ew-long", 9),
    ]
}

/// Random tree with `size` nodes rooted at an entrance
pub fn random_tree(seed: u64, size: usize) -> RoomRoleGraph {
    const ROLES: [RoomRole; 6] = [
        RoomRole::Corridor,
        RoomRole::Generic,
        RoomRole::Shop,
        RoomRole::Chest,
        RoomRole::Boss,
        RoomRole::Exit,
    ];
    let mut rng = LayoutRng::new(seed);
    let mut graph = RoomRoleGraph::new(format!("tree-{seed}"));
    graph.add_node("n0", RoomRole::Entrance, None);
    for i in 1..size {
        let parent = format!("n{}", rng.choose_index(i).unwrap_or(0));
        let role = *rng.choose(&ROLES).unwrap_or(&RoomRole::Generic);
        graph.add_node(format!("n{i}"), role, Some(parent.as_str()));
    }
    graph
}

/// Every pair of positioned rooms is disjoint
pub fn assert_no_overlaps(registry: &DungeonRegistry) {
    let rooms: Vec<_> = registry.iter().collect();
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            assert!(
                !a.world_bounds().overlaps(&b.world_bounds()),
                "rooms '{}' {:?} and '{}' {:?} overlap",
                a.id,
                a.world_bounds(),
                b.id,
                b.world_bounds()
            );
        }
    }
}

/// Number of connected, adjacent, opposite-facing doorway pairs between two rooms
pub fn linking_doorway_pairs(parent: &PlacedRoom, child: &PlacedRoom) -> usize {
    let mut pairs = 0;
    for p in parent.doorways.iter().filter(|d| d.connected) {
        for c in child.doorways.iter().filter(|d| d.connected) {
            let facing = p.orientation.opposite() == Some(c.orientation);
            let adjacent = parent.to_world(p.position) + p.orientation.offset() == child.to_world(c.position);
            if facing && adjacent {
                pairs += 1;
            }
        }
    }
    pairs
}

/// Every non-entrance room is linked to its parent by exactly one doorway pair
pub fn assert_connected(registry: &DungeonRegistry) {
    for room in registry.iter() {
        let Some(parent_id) = &room.parent_id else {
            assert!(room.is_entrance(), "room '{}' has no parent", room.id);
            continue;
        };
        let parent = registry
            .get(parent_id)
            .unwrap_or_else(|| panic!("parent '{parent_id}' of '{}' missing", room.id));
        assert_eq!(
            linking_doorway_pairs(parent, room),
            1,
            "room '{}' is not linked to parent '{}' by exactly one doorway pair",
            room.id,
            parent_id
        );
    }
}
