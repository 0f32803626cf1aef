pub mod types;
pub mod error;
pub mod layout;
pub mod frontier;

pub use error::GridError;
pub use layout::{GridLayout, validate_position};
pub use types::{GridBounds, GridSpace, LayoutSnapshot, Position, SpaceId, SpacePayload};
