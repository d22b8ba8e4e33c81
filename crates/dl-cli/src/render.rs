//! Text rendering of a generated layout

use std::fmt::Write;

use dl_core::dungeon::{DungeonRegistry, GridPos, PlacedRoom};

pub const WALL: char = '#';
pub const FLOOR: char = '.';
pub const DOOR_CONNECTED: char = '+';
pub const DOOR_UNUSED: char = '-';
pub const ENTRANCE: char = '@';
pub const EMPTY: char = ' ';

/// Character grid covering the registry's extent.
///
/// Row 0 is the northernmost row, since `+y` is North in world space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiMap {
    origin: GridPos,
    width: usize,
    rows: Vec<Vec<char>>,
}

impl AsciiMap {
    pub fn from_registry(registry: &DungeonRegistry) -> Option<Self> {
        let extent = registry.extent()?;
        let width = extent.width() as usize;
        let height = extent.height() as usize;
        let mut map = Self {
            origin: GridPos::new(extent.lower.x, extent.upper.y),
            width,
            rows: vec![vec![EMPTY; width]; height],
        };
        for room in registry.iter().filter(|r| r.is_positioned) {
            map.draw_room(room);
        }
        Some(map)
    }

    fn draw_room(&mut self, room: &PlacedRoom) {
        let b = room.world_bounds();
        for y in b.lower.y..=b.upper.y {
            for x in b.lower.x..=b.upper.x {
                let edge = x == b.lower.x || x == b.upper.x || y == b.lower.y || y == b.upper.y;
                self.set(GridPos::new(x, y), if edge { WALL } else { FLOOR });
            }
        }
        for door in &room.doorways {
            let c = if door.connected { DOOR_CONNECTED } else { DOOR_UNUSED };
            self.set(room.to_world(door.position), c);
        }
        if room.is_entrance() {
            self.set(room.center(), ENTRANCE);
        }
    }

    fn set(&mut self, pos: GridPos, c: char) {
        let col = pos.x - self.origin.x;
        let row = self.origin.y - pos.y;
        if col < 0 || row < 0 {
            return;
        }
        if let Some(cell) = self.rows.get_mut(row as usize).and_then(|r| r.get_mut(col as usize)) {
            *cell = c;
        }
    }

    /// Character at a world tile
    pub fn get(&self, pos: GridPos) -> Option<char> {
        let col = usize::try_from(pos.x - self.origin.x).ok()?;
        let row = usize::try_from(self.origin.y - pos.y).ok()?;
        self.rows.get(row)?.get(col).copied()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.rows.len());
        for row in &self.rows {
            let line: String = row.iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

/// One line per room in placement order
pub fn room_table(registry: &DungeonRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:<12} {:<20} {:>14} {:>14} {:>5}  {}",
        "id", "role", "blueprint", "lower", "upper", "doors", "parent"
    );
    for room in registry.iter() {
        let connected = room.connected_doorways().count();
        let _ = writeln!(
            out,
            "{:<16} {:<12} {:<20} {:>14} {:>14} {:>2}/{:<2}  {}",
            room.id,
            room.role.to_string(),
            room.blueprint_guid,
            format!("({}, {})", room.world_lower_bounds.x, room.world_lower_bounds.y),
            format!("({}, {})", room.world_upper_bounds.x, room.world_upper_bounds.y),
            connected,
            room.doorways.len(),
            room.parent_id.as_deref().unwrap_or("-"),
        );
    }
    out
}
