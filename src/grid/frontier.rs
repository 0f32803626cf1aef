use std::collections::HashSet;

use crate::config::grid::MAX_GRID_EXTENT;
use crate::grid::types::{GridBounds, Position};

/// Compute the cells that may be offered for a new placement.
///
/// The result is the union of every 8-connected neighbour of an occupied cell
/// and every empty cell inside `bounds`, minus the occupied cells themselves.
/// Neighbours at or past `MAX_GRID_EXTENT` are dropped, since placing there
/// is always rejected.
/// Cells are returned row-major (y, then x) without duplicates.
pub fn compute_frontier<I>(occupied: I, bounds: GridBounds) -> Vec<Position>
where
    I: IntoIterator<Item = Position>,
{
    let occupied: HashSet<Position> = occupied.into_iter().collect();

    let mut candidates: HashSet<Position> = occupied
        .iter()
        .flat_map(|pos| pos.neighbors())
        .collect();
    candidates.extend(bounds.cells());
    candidates.retain(|pos| {
        pos.x < MAX_GRID_EXTENT && pos.y < MAX_GRID_EXTENT && !occupied.contains(pos)
    });

    let mut frontier: Vec<Position> = candidates.into_iter().collect();
    frontier.sort_by_key(Position::row_major);
    frontier
}
