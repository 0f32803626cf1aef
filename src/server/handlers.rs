//! REST handlers for the space management UI and the booking subsystem.
//!
//! Every handler validates its input, forwards one message to the grid
//! allocator actor, and maps the reply to JSON. Domain errors become 409/404/400
//! through `GridError`'s `ResponseError` impl; a dead mailbox is a 500.

use actix_web::{web, HttpResponse, Error, error};
use serde::{Serialize, Deserialize};

use crate::grid::{validate_position, Position, SpaceId, SpacePayload};
use crate::server::allocator::messages::{
    EnsureCapacity, GetFrontier, GetLayout, GetSpace, PlaceSpace, RelocateSpace, RemoveSpace,
    UpdateSpaceDetails,
};
use crate::server::state::AppState;

/// Coordinates as sent by clients. Signed so negative input can be reported
/// as an invalid position instead of a parse failure.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CellRequest {
    pub x: i64,
    pub y: i64,
}

impl CellRequest {
    fn validate(self) -> Result<Position, Error> {
        validate_position(self.x, self.y).map_err(Error::from)
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaceSpaceRequest {
    pub position: CellRequest,
    #[serde(flatten)]
    pub payload: SpacePayload,
}

#[derive(Debug, Serialize)]
pub struct FrontierResponse {
    pub cells: Vec<Position>,
}

pub async fn get_layout(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let snapshot = data.allocator_addr
        .send(GetLayout)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(snapshot))
}

pub async fn get_frontier(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let cells = data.allocator_addr
        .send(GetFrontier)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(FrontierResponse { cells }))
}

pub async fn ensure_capacity(
    data: web::Data<AppState>,
    body: web::Json<CellRequest>,
) -> Result<HttpResponse, Error> {
    let position = body.into_inner().validate()?;
    let bounds = data.allocator_addr
        .send(EnsureCapacity { position })
        .await
        .map_err(error::ErrorInternalServerError)??;
    Ok(HttpResponse::Ok().json(bounds))
}

pub async fn list_spaces(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let snapshot = data.allocator_addr
        .send(GetLayout)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(snapshot.spaces))
}

pub async fn place_space(
    data: web::Data<AppState>,
    body: web::Json<PlaceSpaceRequest>,
) -> Result<HttpResponse, Error> {
    let PlaceSpaceRequest { position, payload } = body.into_inner();
    let position = position.validate()?;
    let space = data.allocator_addr
        .send(PlaceSpace { position, payload })
        .await
        .map_err(error::ErrorInternalServerError)??;
    Ok(HttpResponse::Created().json(space))
}

pub async fn get_space(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let id = SpaceId::from(path.into_inner());
    let space = data.allocator_addr
        .send(GetSpace { id })
        .await
        .map_err(error::ErrorInternalServerError)??;
    Ok(HttpResponse::Ok().json(space))
}

pub async fn relocate_space(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CellRequest>,
) -> Result<HttpResponse, Error> {
    let id = SpaceId::from(path.into_inner());
    let position = body.into_inner().validate()?;
    let space = data.allocator_addr
        .send(RelocateSpace { id, position })
        .await
        .map_err(error::ErrorInternalServerError)??;
    Ok(HttpResponse::Ok().json(space))
}

pub async fn update_space(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<SpacePayload>,
) -> Result<HttpResponse, Error> {
    let id = SpaceId::from(path.into_inner());
    let space = data.allocator_addr
        .send(UpdateSpaceDetails { id, payload: body.into_inner() })
        .await
        .map_err(error::ErrorInternalServerError)??;
    Ok(HttpResponse::Ok().json(space))
}

pub async fn remove_space(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let id = SpaceId::from(path.into_inner());
    let space = data.allocator_addr
        .send(RemoveSpace { id })
        .await
        .map_err(error::ErrorInternalServerError)??;
    Ok(HttpResponse::Ok().json(space))
}
