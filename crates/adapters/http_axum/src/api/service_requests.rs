//! JSON REST handlers for water and drainage service requests.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use munihub_app::ports::Repositories;
use munihub_domain::geo::Coordinate;
use munihub_domain::service_request::{Priority, RequestStatus, ServiceCategory, ServiceRequest};

use super::{Reply, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for reporting a problem.
#[derive(Deserialize)]
pub struct ServiceRequestBody {
    pub category: ServiceCategory,
    pub priority: Option<Priority>,
    pub description: String,
    pub address: String,
    pub location: Option<Coordinate>,
    pub reporter_name: String,
    pub reporter_contact: String,
}

/// Request body for `PUT /api/service-requests/:id/status`.
#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: RequestStatus,
}

/// Query string for listing requests.
#[derive(Deserialize)]
pub struct ListParams {
    pub status: Option<RequestStatus>,
}

/// `GET /api/service-requests?status=`
pub async fn list<R: Repositories>(
    State(state): State<AppState<R>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Reply<Vec<ServiceRequest>>, ApiError> {
    let Query(params) = params?;
    let requests = state
        .service_request_service
        .list_requests(params.status)
        .await?;
    Ok(Reply::Ok(requests))
}

/// `POST /api/service-requests`
pub async fn submit<R: Repositories>(
    State(state): State<AppState<R>>,
    body: Result<Json<ServiceRequestBody>, JsonRejection>,
) -> Result<Reply<ServiceRequest>, ApiError> {
    let Json(req) = body?;
    let mut builder = ServiceRequest::builder(req.category)
        .description(req.description)
        .address(req.address)
        .reporter(req.reporter_name, req.reporter_contact);
    if let Some(priority) = req.priority {
        builder = builder.priority(priority);
    }
    if let Some(location) = req.location {
        builder = builder.location(location);
    }
    let request = state
        .service_request_service
        .submit(builder.build()?)
        .await?;
    Ok(Reply::Created(request))
}

/// `GET /api/service-requests/:id`
pub async fn get<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<ServiceRequest>, ApiError> {
    let request = state
        .service_request_service
        .get_request(parse_id(&id)?)
        .await?;
    Ok(Reply::Ok(request))
}

/// `PUT /api/service-requests/:id/status`
pub async fn update_status<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    body: Result<Json<StatusRequest>, JsonRejection>,
) -> Result<Reply<ServiceRequest>, ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = body?;
    let request = state
        .service_request_service
        .update_status(id, req.status)
        .await?;
    Ok(Reply::Ok(request))
}
