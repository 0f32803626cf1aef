use thiserror::Error;

use super::types::{Position, SpaceId};

/// Errors surfaced by the grid allocator.
///
/// `Conflict` and `NotFound` are recoverable domain errors: the caller retries
/// with another cell or refreshes its view. `InvalidPosition` is a rejected
/// input and never changes state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell {position} is already occupied by space `{occupant}`")]
    Conflict { position: Position, occupant: SpaceId },
    #[error("space `{0}` not found")]
    NotFound(SpaceId),
    #[error("invalid grid position ({x}, {y})")]
    InvalidPosition { x: i64, y: i64 },
}

impl GridError {
    /// Stable machine-readable code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            GridError::Conflict { .. } => "SPACE_CONFLICT",
            GridError::NotFound(_) => "SPACE_NOT_FOUND",
            GridError::InvalidPosition { .. } => "INVALID_POSITION",
        }
    }
}
