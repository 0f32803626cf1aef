use serde::{Serialize, Deserialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::config::grid::{DEFAULT_ROWS, DEFAULT_COLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The 8-connected neighbours of this cell, skipping any that would have a
    /// negative coordinate.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        const OFFSETS: [(isize, isize); 8] = [
            (-1, -1), (0, -1), (1, -1),
            (-1, 0),           (1, 0),
            (-1, 1),  (0, 1),  (1, 1),
        ];
        OFFSETS.into_iter().filter_map(move |(dx, dy)| {
            Some(Position {
                x: self.x.checked_add_signed(dx)?,
                y: self.y.checked_add_signed(dy)?,
            })
        })
    }

    /// Row-major ordering key (y first, then x).
    pub fn row_major(&self) -> (usize, usize) {
        (self.y, self.x)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangle `[0, cols) x [0, rows)` rendered as the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub rows: usize,
    pub cols: usize,
}

impl GridBounds {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows: rows.max(1), cols: cols.max(1) }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.cols && pos.y < self.rows
    }

    /// Grow (never shrink) so that `pos` lies inside. Returns true if either
    /// dimension changed.
    pub fn grow_to_include(&mut self, pos: Position) -> bool {
        let rows = self.rows.max(pos.y + 1);
        let cols = self.cols.max(pos.x + 1);
        let grew = rows != self.rows || cols != self.cols;
        self.rows = rows;
        self.cols = cols;
        grew
    }

    /// Every cell inside the bounds, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| Position { x, y }))
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(String);

impl SpaceId {
    pub fn generate() -> Self {
        SpaceId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SpaceId {
    fn from(id: String) -> Self {
        SpaceId(id)
    }
}

impl From<&str> for SpaceId {
    fn from(id: &str) -> Self {
        SpaceId(id.to_string())
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-owned fields carried by a space. Stored and returned verbatim, never
/// inspected by the allocator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpacePayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub capacity: Value,
    #[serde(default)]
    pub status: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpace {
    pub id: SpaceId,
    pub position: Position,
    #[serde(flatten)]
    pub payload: SpacePayload,
}

/// Consistent view of the whole layout at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub bounds: GridBounds,
    pub spaces: Vec<GridSpace>,
}
