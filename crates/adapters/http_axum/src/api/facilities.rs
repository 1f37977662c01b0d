//! JSON REST handlers for facilities and their reservations.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde::Deserialize;

use munihub_app::ports::Repositories;
use munihub_domain::geo::Coordinate;
use munihub_domain::reservation::{Facility, FacilityKind, Reservation};
use munihub_domain::time::Timestamp;

use super::{DeleteResponse, Reply, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a facility.
#[derive(Deserialize)]
pub struct FacilityRequest {
    pub name: String,
    pub kind: FacilityKind,
    pub capacity: u32,
    pub location: Option<Coordinate>,
    pub description: Option<String>,
}

/// Request body for booking a facility.
#[derive(Deserialize)]
pub struct ReservationRequest {
    pub reserved_by: String,
    pub contact: String,
    pub purpose: Option<String>,
    pub attendees: u32,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

/// `GET /api/facilities`
pub async fn list<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<Reply<Vec<Facility>>, ApiError> {
    let facilities = state.reservation_service.list_facilities().await?;
    Ok(Reply::Ok(facilities))
}

/// `POST /api/facilities`
pub async fn create<R: Repositories>(
    State(state): State<AppState<R>>,
    body: Result<Json<FacilityRequest>, JsonRejection>,
) -> Result<Reply<Facility>, ApiError> {
    let Json(req) = body?;
    let mut builder = Facility::builder(req.kind)
        .name(req.name)
        .capacity(req.capacity);
    if let Some(location) = req.location {
        builder = builder.location(location);
    }
    if let Some(description) = req.description {
        builder = builder.description(description);
    }
    let created = state
        .reservation_service
        .create_facility(builder.build()?)
        .await?;
    Ok(Reply::Created(created))
}

/// `GET /api/facilities/:id`
pub async fn get<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<Facility>, ApiError> {
    let facility = state.reservation_service.get_facility(parse_id(&id)?).await?;
    Ok(Reply::Ok(facility))
}

/// `DELETE /api/facilities/:id`
pub async fn delete<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    state
        .reservation_service
        .delete_facility(parse_id(&id)?)
        .await?;
    Ok(DeleteResponse::NoContent)
}

/// `GET /api/facilities/:id/reservations`
pub async fn list_reservations<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<Vec<Reservation>>, ApiError> {
    let reservations = state
        .reservation_service
        .list_reservations(parse_id(&id)?)
        .await?;
    Ok(Reply::Ok(reservations))
}

/// `POST /api/facilities/:id/reservations`
pub async fn reserve<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    body: Result<Json<ReservationRequest>, JsonRejection>,
) -> Result<Reply<Reservation>, ApiError> {
    let facility_id = parse_id(&id)?;
    let Json(req) = body?;
    let mut builder = Reservation::builder(facility_id)
        .reserved_by(req.reserved_by)
        .contact(req.contact)
        .attendees(req.attendees)
        .period(req.starts_at, req.ends_at);
    if let Some(purpose) = req.purpose {
        builder = builder.purpose(purpose);
    }
    let reservation = state.reservation_service.request(builder.build()?).await?;
    Ok(Reply::Created(reservation))
}

/// `GET /api/reservations/:id`
pub async fn get_reservation<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<Reservation>, ApiError> {
    let reservation = state
        .reservation_service
        .get_reservation(parse_id(&id)?)
        .await?;
    Ok(Reply::Ok(reservation))
}

/// `POST /api/reservations/:id/confirm`
pub async fn confirm<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<Reservation>, ApiError> {
    let reservation = state.reservation_service.confirm(parse_id(&id)?).await?;
    Ok(Reply::Ok(reservation))
}

/// `POST /api/reservations/:id/cancel`
pub async fn cancel<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<Reservation>, ApiError> {
    let reservation = state.reservation_service.cancel(parse_id(&id)?).await?;
    Ok(Reply::Ok(reservation))
}
