//! Owned grid state and the operations that mutate it.
//!
//! `GridLayout` holds every placed space, a reverse index from cell to space,
//! and the current bounds. All mutations go through `&mut self`, so whoever owns
//! the layout (the allocator actor) is its single writer.

use std::collections::HashMap;
use log::info;

use crate::config::grid::MAX_GRID_EXTENT;
use crate::grid::error::GridError;
use crate::grid::frontier::compute_frontier;
use crate::grid::types::{GridBounds, GridSpace, LayoutSnapshot, Position, SpaceId, SpacePayload};

/// Turn client-supplied signed coordinates into a grid position.
///
/// Negative coordinates and coordinates at or beyond `MAX_GRID_EXTENT` are
/// rejected with `InvalidPosition`.
pub fn validate_position(x: i64, y: i64) -> Result<Position, GridError> {
    let in_range = |v: i64| v >= 0 && (v as u64) < MAX_GRID_EXTENT as u64;
    if in_range(x) && in_range(y) {
        Ok(Position::new(x as usize, y as usize))
    } else {
        Err(GridError::InvalidPosition { x, y })
    }
}

fn check_extent(pos: Position) -> Result<(), GridError> {
    if pos.x < MAX_GRID_EXTENT && pos.y < MAX_GRID_EXTENT {
        Ok(())
    } else {
        Err(GridError::InvalidPosition {
            x: i64::try_from(pos.x).unwrap_or(i64::MAX),
            y: i64::try_from(pos.y).unwrap_or(i64::MAX),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    spaces: HashMap<SpaceId, GridSpace>,
    occupancy: HashMap<Position, SpaceId>,
    bounds: GridBounds,
}

impl GridLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    pub fn get(&self, id: &SpaceId) -> Result<&GridSpace, GridError> {
        self.spaces.get(id).ok_or_else(|| GridError::NotFound(id.clone()))
    }

    pub fn occupant(&self, pos: Position) -> Option<&SpaceId> {
        self.occupancy.get(&pos)
    }

    /// All spaces, ordered row-major by position.
    pub fn spaces(&self) -> Vec<GridSpace> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut spaces: Vec<GridSpace> = self.spaces.values().cloned().collect();
        spaces.sort_by_key(|s| s.position.row_major());
        spaces
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            bounds: self.bounds,
            spaces: self.spaces(),
        }
    }

    /// Cells a caller may offer for a new placement.
    pub fn frontier(&self) -> Vec<Position> {
        compute_frontier(self.occupancy.keys().copied(), self.bounds)
    }

    /// Grow the bounds so `pos` lies inside them. Never shrinks; calling it
    /// with a cell already inside is a no-op.
    pub fn ensure_capacity(&mut self, pos: Position) -> Result<GridBounds, GridError> {
        check_extent(pos)?;
        if self.bounds.contains(pos) {
            return Ok(self.bounds);
        }
        if self.bounds.grow_to_include(pos) {
            info!(
                "[GridAllocator] Grid grew to rows={} cols={} for cell {}",
                self.bounds.rows, self.bounds.cols, pos
            );
        }
        Ok(self.bounds)
    }

    /// Create a new space at `pos`, growing the grid if `pos` lies outside it.
    pub fn place(&mut self, pos: Position, payload: SpacePayload) -> Result<GridSpace, GridError> {
        check_extent(pos)?;
        if let Some(occupant) = self.occupant(pos) {
            return Err(GridError::Conflict { position: pos, occupant: occupant.clone() });
        }
        self.ensure_capacity(pos)?;

        let id = loop {
            let candidate = SpaceId::generate();
            if !self.spaces.contains_key(&candidate) {
                break candidate;
            }
        };
        let space = GridSpace { id: id.clone(), position: pos, payload };
        self.occupancy.insert(pos, id.clone());
        self.spaces.insert(id, space.clone());
        info!("[GridAllocator] Placed space {} at {}", space.id, pos);
        Ok(space)
    }

    /// Move an existing space to `pos`. Moving a space onto its own cell is a
    /// successful no-op.
    pub fn relocate(&mut self, id: &SpaceId, pos: Position) -> Result<GridSpace, GridError> {
        check_extent(pos)?;
        let current = self.get(id)?.position;
        if current == pos {
            return self.get(id).cloned();
        }
        if let Some(occupant) = self.occupant(pos) {
            return Err(GridError::Conflict { position: pos, occupant: occupant.clone() });
        }
        self.ensure_capacity(pos)?;

        self.occupancy.remove(&current);
        self.occupancy.insert(pos, id.clone());
        let space = self
            .spaces
            .get_mut(id)
            .ok_or_else(|| GridError::NotFound(id.clone()))?;
        space.position = pos;
        info!("[GridAllocator] Relocated space {} from {} to {}", id, current, pos);
        Ok(space.clone())
    }

    /// Replace the caller-owned fields of a space. Position and bounds are untouched.
    pub fn update_details(&mut self, id: &SpaceId, payload: SpacePayload) -> Result<GridSpace, GridError> {
        let space = self
            .spaces
            .get_mut(id)
            .ok_or_else(|| GridError::NotFound(id.clone()))?;
        space.payload = payload;
        info!("[GridAllocator] Updated details of space {}", id);
        Ok(space.clone())
    }

    /// Delete a space and free its cell. The bounds keep their size.
    pub fn remove(&mut self, id: &SpaceId) -> Result<GridSpace, GridError> {
        let space = self
            .spaces
            .remove(id)
            .ok_or_else(|| GridError::NotFound(id.clone()))?;
        self.occupancy.remove(&space.position);
        info!("[GridAllocator] Removed space {} from {}", id, space.position);
        Ok(space)
    }
}
