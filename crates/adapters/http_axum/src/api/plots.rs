//! JSON REST handlers for plots and the assignments resting in them.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use munihub_app::ports::Repositories;
use munihub_domain::cemetery::{Assignment, Plot, PlotKind, PlotStatus};
use munihub_domain::error::PortalError;
use munihub_domain::geo::Coordinate;
use munihub_domain::id::{BlockId, DeceasedId, PlotId};
use munihub_domain::map::PlotDirections;
use munihub_domain::search::Occupant;
use munihub_domain::time::Date;

use super::{DeleteResponse, Reply, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating or editing a plot.
///
/// `status` is only honored on creation; use the status endpoint afterwards.
#[derive(Deserialize)]
pub struct PlotRequest {
    pub lot: String,
    pub kind: Option<PlotKind>,
    pub status: Option<PlotStatus>,
    pub capacity: Option<u32>,
    pub location: Option<Coordinate>,
}

impl PlotRequest {
    fn into_plot(self, id: Option<PlotId>, block_id: BlockId) -> Result<Plot, ApiError> {
        let mut builder = Plot::builder(block_id).lot(self.lot);
        if let Some(id) = id {
            builder = builder.id(id);
        }
        if let Some(kind) = self.kind {
            builder = builder.kind(kind);
        }
        if let Some(status) = self.status {
            builder = builder.status(status);
        }
        if let Some(capacity) = self.capacity {
            builder = builder.capacity(capacity);
        }
        if let Some(location) = self.location {
            builder = builder.location(location);
        }
        Ok(builder.build()?)
    }
}

/// Request body for `PUT /api/plots/:id/status`.
#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: PlotStatus,
}

/// Request body for recording an interment.
#[derive(Deserialize)]
pub struct AssignRequest {
    pub deceased_id: DeceasedId,
    pub interment_date: Option<Date>,
}

/// Starting point of a walk to a plot.
#[derive(Deserialize)]
pub struct NavigateParams {
    pub lat: f64,
    pub lon: f64,
}

/// `GET /api/blocks/:id/plots`
pub async fn list<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<Vec<Plot>>, ApiError> {
    let plots = state.cemetery_service.list_plots(parse_id(&id)?).await?;
    Ok(Reply::Ok(plots))
}

/// `POST /api/blocks/:id/plots`
pub async fn create<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    body: Result<Json<PlotRequest>, JsonRejection>,
) -> Result<Reply<Plot>, ApiError> {
    let block_id = parse_id(&id)?;
    let Json(req) = body?;
    let plot = req.into_plot(None, block_id)?;
    let created = state.cemetery_service.create_plot(plot).await?;
    Ok(Reply::Created(created))
}

/// `GET /api/plots/:id`
pub async fn get<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<Plot>, ApiError> {
    let plot = state.cemetery_service.get_plot(parse_id(&id)?).await?;
    Ok(Reply::Ok(plot))
}

/// `PUT /api/plots/:id`
pub async fn update<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    body: Result<Json<PlotRequest>, JsonRejection>,
) -> Result<Reply<Plot>, ApiError> {
    let id: PlotId = parse_id(&id)?;
    let Json(req) = body?;
    let stored = state.cemetery_service.get_plot(id).await?;
    let plot = req.into_plot(Some(id), stored.block_id)?;
    let updated = state.cemetery_service.update_plot(plot).await?;
    Ok(Reply::Ok(updated))
}

/// `DELETE /api/plots/:id`
pub async fn delete<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    state.cemetery_service.delete_plot(parse_id(&id)?).await?;
    Ok(DeleteResponse::NoContent)
}

/// `PUT /api/plots/:id/status`
pub async fn set_status<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    body: Result<Json<StatusRequest>, JsonRejection>,
) -> Result<Reply<Plot>, ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = body?;
    let plot = state
        .cemetery_service
        .set_plot_status(id, req.status)
        .await?;
    Ok(Reply::Ok(plot))
}

/// `GET /api/plots/:id/navigate?lat=&lon=`
pub async fn navigate<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    params: Result<Query<NavigateParams>, QueryRejection>,
) -> Result<Reply<PlotDirections>, ApiError> {
    let id = parse_id(&id)?;
    let Query(params) = params?;
    let from = Coordinate::new(params.lat, params.lon).map_err(PortalError::from)?;
    let directions = state.search_service.navigate(id, from).await?;
    Ok(Reply::Ok(directions))
}

/// `GET /api/plots/:id/assignments`
pub async fn occupants<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<Vec<Occupant>>, ApiError> {
    let occupants = state.burial_service.occupants(parse_id(&id)?).await?;
    Ok(Reply::Ok(occupants))
}

/// `POST /api/plots/:id/assignments`
pub async fn assign<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    body: Result<Json<AssignRequest>, JsonRejection>,
) -> Result<Reply<Assignment>, ApiError> {
    let plot_id = parse_id(&id)?;
    let Json(req) = body?;
    let assignment = state
        .burial_service
        .assign(plot_id, req.deceased_id, req.interment_date)
        .await?;
    Ok(Reply::Created(assignment))
}

/// `DELETE /api/assignments/:id`
pub async fn unassign<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    state.burial_service.unassign(parse_id(&id)?).await?;
    Ok(DeleteResponse::NoContent)
}
