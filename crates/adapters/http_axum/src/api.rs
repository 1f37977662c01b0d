//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod cemeteries;
#[allow(clippy::missing_errors_doc)]
pub mod dashboard;
#[allow(clippy::missing_errors_doc)]
pub mod deceased;
#[allow(clippy::missing_errors_doc)]
pub mod facilities;
#[allow(clippy::missing_errors_doc)]
pub mod layout;
#[allow(clippy::missing_errors_doc)]
pub mod permits;
#[allow(clippy::missing_errors_doc)]
pub mod plots;
#[allow(clippy::missing_errors_doc)]
pub mod search;
#[allow(clippy::missing_errors_doc)]
pub mod service_requests;

use std::str::FromStr;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use serde::Serialize;

use munihub_app::ports::Repositories;

use crate::error::ApiError;
use crate::state::AppState;

/// Successful responses carrying a JSON body.
pub enum Reply<T> {
    Ok(T),
    Created(T),
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(body) => Json(body).into_response(),
            Self::Created(body) => (StatusCode::CREATED, Json(body)).into_response(),
        }
    }
}

/// Response of delete endpoints.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Parse an identifier taken from the URL path.
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    raw.parse().map_err(|_| ApiError::invalid_id(raw))
}

/// Build the `/api` sub-router.
pub fn routes<R: Repositories>() -> Router<AppState<R>> {
    Router::new()
        // Cemeteries
        .route(
            "/cemeteries",
            get(cemeteries::list::<R>).post(cemeteries::create::<R>),
        )
        .route(
            "/cemeteries/{id}",
            get(cemeteries::get::<R>)
                .put(cemeteries::update::<R>)
                .delete(cemeteries::delete::<R>),
        )
        .route("/cemeteries/{id}/stats", get(cemeteries::stats::<R>))
        .route("/cemeteries/{id}/map", get(cemeteries::map::<R>))
        .route("/cemeteries/{id}/search", get(search::within::<R>))
        .route(
            "/cemeteries/{id}/sections",
            get(layout::list_sections::<R>).post(layout::create_section::<R>),
        )
        // Sections and blocks
        .route(
            "/sections/{id}",
            get(layout::get_section::<R>).delete(layout::delete_section::<R>),
        )
        .route(
            "/sections/{id}/blocks",
            get(layout::list_blocks::<R>).post(layout::create_block::<R>),
        )
        .route(
            "/blocks/{id}",
            get(layout::get_block::<R>).delete(layout::delete_block::<R>),
        )
        // Plots and assignments
        .route(
            "/blocks/{id}/plots",
            get(plots::list::<R>).post(plots::create::<R>),
        )
        .route(
            "/plots/{id}",
            get(plots::get::<R>)
                .put(plots::update::<R>)
                .delete(plots::delete::<R>),
        )
        .route("/plots/{id}/status", put(plots::set_status::<R>))
        .route("/plots/{id}/navigate", get(plots::navigate::<R>))
        .route(
            "/plots/{id}/assignments",
            get(plots::occupants::<R>).post(plots::assign::<R>),
        )
        .route("/assignments/{id}", delete(plots::unassign::<R>))
        .route("/search", get(search::everywhere::<R>))
        // Deceased registry
        .route(
            "/deceased",
            get(deceased::list::<R>).post(deceased::create::<R>),
        )
        .route(
            "/deceased/{id}",
            get(deceased::get::<R>)
                .put(deceased::update::<R>)
                .delete(deceased::delete::<R>),
        )
        // Permits
        .route("/permits", get(permits::list::<R>).post(permits::submit::<R>))
        .route("/permits/{id}", get(permits::get::<R>))
        .route("/permits/{id}/decision", post(permits::decide::<R>))
        // Facilities and reservations
        .route(
            "/facilities",
            get(facilities::list::<R>).post(facilities::create::<R>),
        )
        .route(
            "/facilities/{id}",
            get(facilities::get::<R>).delete(facilities::delete::<R>),
        )
        .route(
            "/facilities/{id}/reservations",
            get(facilities::list_reservations::<R>).post(facilities::reserve::<R>),
        )
        .route("/reservations/{id}", get(facilities::get_reservation::<R>))
        .route("/reservations/{id}/confirm", post(facilities::confirm::<R>))
        .route("/reservations/{id}/cancel", post(facilities::cancel::<R>))
        // Water and drainage service requests
        .route(
            "/service-requests",
            get(service_requests::list::<R>).post(service_requests::submit::<R>),
        )
        .route("/service-requests/{id}", get(service_requests::get::<R>))
        .route(
            "/service-requests/{id}/status",
            put(service_requests::update_status::<R>),
        )
        .route("/dashboard/stats", get(dashboard::stats::<R>))
}
