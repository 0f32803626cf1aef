use actix::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::grid::{GridBounds, GridError, GridSpace, LayoutSnapshot, Position, SpaceId, SpacePayload};

#[derive(Message)]
#[rtype(result = "Result<GridSpace, GridError>")]
pub struct PlaceSpace {
    pub position: Position,
    pub payload: SpacePayload,
}

#[derive(Message)]
#[rtype(result = "Result<GridSpace, GridError>")]
pub struct RelocateSpace {
    pub id: SpaceId,
    pub position: Position,
}

#[derive(Message)]
#[rtype(result = "Result<GridBounds, GridError>")]
pub struct EnsureCapacity {
    pub position: Position,
}

#[derive(Message)]
#[rtype(result = "Result<GridSpace, GridError>")]
pub struct UpdateSpaceDetails {
    pub id: SpaceId,
    pub payload: SpacePayload,
}

#[derive(Message)]
#[rtype(result = "Result<GridSpace, GridError>")]
pub struct RemoveSpace {
    pub id: SpaceId,
}

#[derive(Message)]
#[rtype(result = "Result<GridSpace, GridError>")]
pub struct GetSpace {
    pub id: SpaceId,
}

#[derive(Message)]
#[rtype(result = "LayoutSnapshot")]
pub struct GetLayout;

#[derive(Message)]
#[rtype(result = "Vec<Position>")]
pub struct GetFrontier;

/// Register a WebSocket session for layout pushes.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Subscribe {
    pub session_id: Uuid,
    pub addr: Recipient<LayoutUpdate>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Unsubscribe {
    pub session_id: Uuid,
}

/// Server -> client push, sent on subscribe and after every layout change.
#[derive(Message, Serialize, Clone, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum LayoutUpdate {
    LayoutUpdate(LayoutSnapshot),
}
