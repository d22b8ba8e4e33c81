//! Doorways and doorway matching
//!
//! A child room is attached to a parent by pairing one of the parent's free
//! doorways with the child doorway facing the opposite way.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::rect::{Bounds, GridPos};

/// Compass direction a doorway faces
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    #[default]
    None,
}

impl Direction {
    /// Opposite compass direction; `None` has no opposite.
    pub fn opposite(self) -> Option<Direction> {
        match self {
            Direction::North => Some(Direction::South),
            Direction::South => Some(Direction::North),
            Direction::East => Some(Direction::West),
            Direction::West => Some(Direction::East),
            Direction::None => None,
        }
    }

    /// Unit step in this direction
    pub fn offset(self) -> GridPos {
        match self {
            Direction::North => GridPos::new(0, 1),
            Direction::South => GridPos::new(0, -1),
            Direction::East => GridPos::new(1, 0),
            Direction::West => GridPos::new(-1, 0),
            Direction::None => GridPos::ZERO,
        }
    }

    /// North or South
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// East or West
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }
}

/// A doorway slot on a room.
///
/// Blueprints hold the template; every placed room owns its own copy so that
/// connection state never leaks back into the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doorway {
    /// Position in blueprint-local coordinates
    pub position: GridPos,
    pub orientation: Direction,
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub unavailable: bool,

    // Tile-copy metadata, only read by the renderer
    #[serde(default)]
    pub copy_from: GridPos,
    #[serde(default)]
    pub copy_width: u32,
    #[serde(default)]
    pub copy_height: u32,
}

impl Doorway {
    pub fn new(position: GridPos, orientation: Direction) -> Self {
        Self {
            position,
            orientation,
            connected: false,
            unavailable: false,
            copy_from: GridPos::ZERO,
            copy_width: 0,
            copy_height: 0,
        }
    }

    /// Still a candidate for attaching a child room
    pub fn is_available(&self) -> bool {
        !self.connected && !self.unavailable
    }

    /// Strike this doorway from further placement attempts
    pub fn mark_unavailable(&mut self) {
        self.unavailable = true;
    }

    /// Record a successful connection. Connected doorways are also unavailable.
    pub fn mark_connected(&mut self) {
        self.connected = true;
        self.unavailable = true;
    }

    /// Copy of the template with fresh connection state
    pub fn fresh_copy(&self) -> Doorway {
        Doorway {
            connected: false,
            unavailable: false,
            ..self.clone()
        }
    }
}

/// World rectangle for a child blueprint attached to a parent doorway.
///
/// The child's matching doorway lands one tile beyond the parent doorway in
/// the direction the parent doorway faces, so the doorway tiles are adjacent
/// while the two room rectangles stay disjoint under the closed overlap test.
/// Returns `None` when the result does not fit in `i32` coordinates.
pub fn child_world_bounds(
    parent_door_world: GridPos,
    parent_orientation: Direction,
    child_template: Bounds,
    child_door_local: GridPos,
) -> Option<Bounds> {
    let door_to_lower = child_template.lower.checked_sub(child_door_local)?;
    let lower = parent_door_world
        .checked_add(parent_orientation.offset())?
        .checked_add(door_to_lower)?;
    child_template.checked_moved_to(lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_opposites_pair_up() {
        for dir in Direction::iter() {
            match dir.opposite() {
                Some(opp) => {
                    assert_ne!(dir, opp);
                    assert_eq!(opp.opposite(), Some(dir));
                    assert_eq!(dir.offset() + opp.offset(), GridPos::ZERO);
                }
                None => assert_eq!(dir, Direction::None),
            }
        }
    }

    #[test]
    fn test_axes() {
        assert!(Direction::North.is_vertical());
        assert!(Direction::South.is_vertical());
        assert!(Direction::East.is_horizontal());
        assert!(!Direction::West.is_vertical());
        assert!(!Direction::None.is_vertical() && !Direction::None.is_horizontal());
    }

    #[test]
    fn test_connected_implies_unavailable() {
        let mut door = Doorway::new(GridPos::new(4, 2), Direction::East);
        assert!(door.is_available());
        door.mark_connected();
        assert!(door.connected && door.unavailable);
        assert!(!door.is_available());

        let copy = door.fresh_copy();
        assert!(copy.is_available());
        assert_eq!(copy.orientation, Direction::East);
        assert_eq!(copy.position, GridPos::new(4, 2));
    }

    #[test]
    fn test_child_bounds_east() {
        // Parent east doorway at (4,2); corridor west doorway at local (0,1)
        let bounds = child_world_bounds(
            GridPos::new(4, 2),
            Direction::East,
            Bounds::from_coords(0, 0, 2, 2),
            GridPos::new(0, 1),
        );
        assert_eq!(bounds, Some(Bounds::from_coords(5, 1, 7, 3)));
    }

    #[test]
    fn test_child_bounds_each_direction_clears_parent() {
        let parent = Bounds::from_coords(0, 0, 4, 4);
        let template = Bounds::from_coords(0, 0, 2, 2);
        let cases = [
            (GridPos::new(2, 4), Direction::North, GridPos::new(1, 0)),
            (GridPos::new(2, 0), Direction::South, GridPos::new(1, 2)),
            (GridPos::new(4, 2), Direction::East, GridPos::new(0, 1)),
            (GridPos::new(0, 2), Direction::West, GridPos::new(2, 1)),
        ];
        for (door, dir, child_door) in cases {
            let bounds = child_world_bounds(door, dir, template, child_door).unwrap();
            assert!(!bounds.overlaps(&parent), "{dir} child overlaps parent: {bounds:?}");
            // Doorway tiles are adjacent
            let child_door_world = bounds.lower + child_door - template.lower;
            assert_eq!(child_door_world, door + dir.offset());
        }
    }

    #[test]
    fn test_child_bounds_with_offset_template() {
        // Template that does not start at the origin
        let bounds = child_world_bounds(
            GridPos::new(10, 10),
            Direction::North,
            Bounds::from_coords(-2, -1, 2, 3),
            GridPos::new(0, -1),
        )
        .unwrap();
        assert_eq!(bounds.lower, GridPos::new(8, 11));
        assert_eq!(bounds.upper, GridPos::new(12, 15));
    }

    #[test]
    fn test_child_bounds_past_i32_edge() {
        let template = Bounds::from_coords(0, 0, 4, 4);
        // Doorway already on the last representable column
        assert_eq!(
            child_world_bounds(GridPos::new(i32::MAX, 2), Direction::East, template, GridPos::new(0, 2)),
            None
        );
        // Room would start in range but end past it
        assert_eq!(
            child_world_bounds(GridPos::new(i32::MAX - 2, 2), Direction::East, template, GridPos::new(0, 2)),
            None
        );
        assert_eq!(
            child_world_bounds(GridPos::new(i32::MIN, 2), Direction::West, template, GridPos::new(4, 2)),
            None
        );
        assert_eq!(
            child_world_bounds(GridPos::new(i32::MAX - 6, 2), Direction::East, template, GridPos::new(0, 2)),
            Some(Bounds::from_coords(i32::MAX - 5, 0, i32::MAX - 1, 4))
        );
    }
}
