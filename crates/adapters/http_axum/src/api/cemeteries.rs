//! JSON REST handlers for cemeteries.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde::Deserialize;

use munihub_app::ports::Repositories;
use munihub_domain::cemetery::Cemetery;
use munihub_domain::geo::Coordinate;
use munihub_domain::id::CemeteryId;
use munihub_domain::map::CemeteryMap;
use munihub_domain::stats::CemeteryStats;

use super::{DeleteResponse, Reply, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating or replacing a cemetery.
#[derive(Deserialize)]
pub struct CemeteryRequest {
    pub name: String,
    pub address: Option<String>,
    pub location: Option<Coordinate>,
    #[serde(default)]
    pub boundary: Vec<Coordinate>,
}

impl CemeteryRequest {
    fn into_cemetery(self, id: Option<CemeteryId>) -> Result<Cemetery, ApiError> {
        let mut builder = Cemetery::builder().name(self.name).boundary(self.boundary);
        if let Some(id) = id {
            builder = builder.id(id);
        }
        if let Some(address) = self.address {
            builder = builder.address(address);
        }
        if let Some(location) = self.location {
            builder = builder.location(location);
        }
        Ok(builder.build()?)
    }
}

/// `GET /api/cemeteries`
pub async fn list<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<Reply<Vec<Cemetery>>, ApiError> {
    let cemeteries = state.cemetery_service.list_cemeteries().await?;
    Ok(Reply::Ok(cemeteries))
}

/// `POST /api/cemeteries`
pub async fn create<R: Repositories>(
    State(state): State<AppState<R>>,
    body: Result<Json<CemeteryRequest>, JsonRejection>,
) -> Result<Reply<Cemetery>, ApiError> {
    let Json(req) = body?;
    let cemetery = req.into_cemetery(None)?;
    let created = state.cemetery_service.create_cemetery(cemetery).await?;
    Ok(Reply::Created(created))
}

/// `GET /api/cemeteries/:id`
pub async fn get<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<Cemetery>, ApiError> {
    let cemetery = state.cemetery_service.get_cemetery(parse_id(&id)?).await?;
    Ok(Reply::Ok(cemetery))
}

/// `PUT /api/cemeteries/:id`
pub async fn update<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    body: Result<Json<CemeteryRequest>, JsonRejection>,
) -> Result<Reply<Cemetery>, ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = body?;
    let cemetery = req.into_cemetery(Some(id))?;
    let updated = state.cemetery_service.update_cemetery(cemetery).await?;
    Ok(Reply::Ok(updated))
}

/// `DELETE /api/cemeteries/:id`
pub async fn delete<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    state
        .cemetery_service
        .delete_cemetery(parse_id(&id)?)
        .await?;
    Ok(DeleteResponse::NoContent)
}

/// `GET /api/cemeteries/:id/stats`
pub async fn stats<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<CemeteryStats>, ApiError> {
    let stats = state.cemetery_service.cemetery_stats(parse_id(&id)?).await?;
    Ok(Reply::Ok(stats))
}

/// `GET /api/cemeteries/:id/map`
pub async fn map<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<CemeteryMap>, ApiError> {
    let map = state.cemetery_service.cemetery_map(parse_id(&id)?).await?;
    Ok(Reply::Ok(map))
}
