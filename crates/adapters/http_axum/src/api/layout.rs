//! JSON REST handlers for sections and blocks.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde::Deserialize;

use munihub_app::ports::Repositories;
use munihub_domain::cemetery::{Block, Section};
use munihub_domain::geo::Coordinate;

use super::{DeleteResponse, Reply, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body shared by sections and blocks.
#[derive(Deserialize)]
pub struct AreaRequest {
    pub name: String,
    #[serde(default)]
    pub boundary: Vec<Coordinate>,
}

/// `GET /api/cemeteries/:id/sections`
pub async fn list_sections<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<Vec<Section>>, ApiError> {
    let sections = state.cemetery_service.list_sections(parse_id(&id)?).await?;
    Ok(Reply::Ok(sections))
}

/// `POST /api/cemeteries/:id/sections`
pub async fn create_section<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    body: Result<Json<AreaRequest>, JsonRejection>,
) -> Result<Reply<Section>, ApiError> {
    let cemetery_id = parse_id(&id)?;
    let Json(req) = body?;
    let section = Section::builder(cemetery_id)
        .name(req.name)
        .boundary(req.boundary)
        .build()?;
    let created = state.cemetery_service.create_section(section).await?;
    Ok(Reply::Created(created))
}

/// `GET /api/sections/:id`
pub async fn get_section<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<Section>, ApiError> {
    let section = state.cemetery_service.get_section(parse_id(&id)?).await?;
    Ok(Reply::Ok(section))
}

/// `DELETE /api/sections/:id`
pub async fn delete_section<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    state
        .cemetery_service
        .delete_section(parse_id(&id)?)
        .await?;
    Ok(DeleteResponse::NoContent)
}

/// `GET /api/sections/:id/blocks`
pub async fn list_blocks<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<Vec<Block>>, ApiError> {
    let blocks = state.cemetery_service.list_blocks(parse_id(&id)?).await?;
    Ok(Reply::Ok(blocks))
}

/// `POST /api/sections/:id/blocks`
pub async fn create_block<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    body: Result<Json<AreaRequest>, JsonRejection>,
) -> Result<Reply<Block>, ApiError> {
    let section_id = parse_id(&id)?;
    let Json(req) = body?;
    let block = Block::builder(section_id)
        .name(req.name)
        .boundary(req.boundary)
        .build()?;
    let created = state.cemetery_service.create_block(block).await?;
    Ok(Reply::Created(created))
}

/// `GET /api/blocks/:id`
pub async fn get_block<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<Block>, ApiError> {
    let block = state.cemetery_service.get_block(parse_id(&id)?).await?;
    Ok(Reply::Ok(block))
}

/// `DELETE /api/blocks/:id`
pub async fn delete_block<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    state.cemetery_service.delete_block(parse_id(&id)?).await?;
    Ok(DeleteResponse::NoContent)
}
