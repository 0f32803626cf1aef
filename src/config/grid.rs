//! Grid configuration constants.
//!
//! This module defines the initial grid dimensions and the hard limit on how far
//! the grid may grow.

/// Rows of a freshly created grid.
pub const DEFAULT_ROWS: usize = 1;

/// Columns of a freshly created grid.
pub const DEFAULT_COLS: usize = 1;

/// Exclusive upper limit for any coordinate accepted by the allocator.
/// Bounds can therefore never exceed MAX_GRID_EXTENT x MAX_GRID_EXTENT.
pub const MAX_GRID_EXTENT: usize = 1024;
