//! Tile coordinates and axis-aligned room rectangles
//!
//! Rectangles are closed on both ends: a room with bounds `(0,0)-(4,4)`
//! covers 5×5 tiles. Overlap uses the same closed intervals, so two rooms
//! that merely share an edge are reported as overlapping.

use core::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// An integer tile position. `+y` points North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const ZERO: GridPos = GridPos { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise add, `None` on `i32` overflow
    pub fn checked_add(self, rhs: GridPos) -> Option<GridPos> {
        Some(GridPos::new(self.x.checked_add(rhs.x)?, self.y.checked_add(rhs.y)?))
    }

    /// Component-wise subtract, `None` on `i32` overflow
    pub fn checked_sub(self, rhs: GridPos) -> Option<GridPos> {
        Some(GridPos::new(self.x.checked_sub(rhs.x)?, self.y.checked_sub(rhs.y)?))
    }
}

impl Add for GridPos {
    type Output = GridPos;

    fn add(self, rhs: GridPos) -> GridPos {
        GridPos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for GridPos {
    type Output = GridPos;

    fn sub(self, rhs: GridPos) -> GridPos {
        GridPos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        GridPos::new(x, y)
    }
}

/// A closed rectangle of tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower-left corner
    pub lower: GridPos,
    /// Upper-right corner
    pub upper: GridPos,
}

impl Bounds {
    pub const fn new(lower: GridPos, upper: GridPos) -> Self {
        Self { lower, upper }
    }

    /// Build from raw corner coordinates
    pub const fn from_coords(lx: i32, ly: i32, hx: i32, hy: i32) -> Self {
        Self {
            lower: GridPos::new(lx, ly),
            upper: GridPos::new(hx, hy),
        }
    }

    /// Number of tile columns, 0 if inverted
    pub fn width(&self) -> i32 {
        self.upper.x.saturating_sub(self.lower.x).saturating_add(1).max(0)
    }

    /// Number of tile rows, 0 if inverted
    pub fn height(&self) -> i32 {
        self.upper.y.saturating_sub(self.lower.y).saturating_add(1).max(0)
    }

    /// Corner-to-corner extent (`upper - lower`)
    pub fn extent(&self) -> GridPos {
        self.upper - self.lower
    }

    /// Corner-to-corner extent, `None` if it does not fit in `i32`
    pub fn checked_extent(&self) -> Option<GridPos> {
        self.upper.checked_sub(self.lower)
    }

    /// Check if the rectangle is valid (has positive area)
    pub fn is_valid(&self) -> bool {
        self.upper.x >= self.lower.x && self.upper.y >= self.lower.y
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x >= self.lower.x && pos.x <= self.upper.x && pos.y >= self.lower.y && pos.y <= self.upper.y
    }

    /// Move both corners by `offset`
    pub fn translated(&self, offset: GridPos) -> Bounds {
        Bounds::new(self.lower + offset, self.upper + offset)
    }

    /// Same-sized rectangle with its lower corner at `lower`
    pub fn moved_to(&self, lower: GridPos) -> Bounds {
        Bounds::new(lower, lower + self.extent())
    }

    /// Like [`Bounds::moved_to`], `None` if the upper corner would overflow
    pub fn checked_moved_to(&self, lower: GridPos) -> Option<Bounds> {
        Some(Bounds::new(lower, lower.checked_add(self.checked_extent()?)?))
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::from_coords(
            self.lower.x.min(other.lower.x),
            self.lower.y.min(other.lower.y),
            self.upper.x.max(other.upper.x),
            self.upper.y.max(other.upper.y),
        )
    }

    /// Check if this rectangle overlaps another (closed intervals)
    pub fn overlaps(&self, other: &Bounds) -> bool {
        overlaps(self, other)
    }
}

/// Closed interval overlap on a single axis
pub fn interval_overlaps(min_a: i32, max_a: i32, min_b: i32, max_b: i32) -> bool {
    min_a.max(min_b) <= max_a.min(max_b)
}

/// Two rectangles overlap iff their X intervals and Y intervals both overlap.
///
/// Touching edges count as overlap; the placement offset keeps a doorway
/// step between neighbouring rooms so that adjacent rooms never touch.
pub fn overlaps(a: &Bounds, b: &Bounds) -> bool {
    interval_overlaps(a.lower.x, a.upper.x, b.lower.x, b.upper.x)
        && interval_overlaps(a.lower.y, a.upper.y, b.lower.y, b.upper.y)
}
