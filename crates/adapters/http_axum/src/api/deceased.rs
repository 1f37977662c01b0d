//! JSON REST handlers for the deceased registry.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde::Deserialize;

use munihub_app::ports::Repositories;
use munihub_domain::cemetery::Deceased;
use munihub_domain::id::DeceasedId;
use munihub_domain::time::Date;

use super::{DeleteResponse, Reply, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating or replacing a deceased record.
#[derive(Deserialize)]
pub struct DeceasedRequest {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: Option<Date>,
    pub date_of_death: Option<Date>,
    pub cause_of_death: Option<String>,
}

impl DeceasedRequest {
    fn into_deceased(self, id: Option<DeceasedId>) -> Result<Deceased, ApiError> {
        let mut builder = Deceased::builder()
            .first_name(self.first_name)
            .last_name(self.last_name);
        if let Some(id) = id {
            builder = builder.id(id);
        }
        if let Some(middle_name) = self.middle_name {
            builder = builder.middle_name(middle_name);
        }
        if let Some(date) = self.date_of_birth {
            builder = builder.date_of_birth(date);
        }
        if let Some(date) = self.date_of_death {
            builder = builder.date_of_death(date);
        }
        if let Some(cause) = self.cause_of_death {
            builder = builder.cause_of_death(cause);
        }
        Ok(builder.build()?)
    }
}

/// `GET /api/deceased`
pub async fn list<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<Reply<Vec<Deceased>>, ApiError> {
    let records = state.burial_service.list_deceased().await?;
    Ok(Reply::Ok(records))
}

/// `POST /api/deceased`
pub async fn create<R: Repositories>(
    State(state): State<AppState<R>>,
    body: Result<Json<DeceasedRequest>, JsonRejection>,
) -> Result<Reply<Deceased>, ApiError> {
    let Json(req) = body?;
    let deceased = req.into_deceased(None)?;
    let created = state.burial_service.create_deceased(deceased).await?;
    Ok(Reply::Created(created))
}

/// `GET /api/deceased/:id`
pub async fn get<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<Deceased>, ApiError> {
    let deceased = state.burial_service.get_deceased(parse_id(&id)?).await?;
    Ok(Reply::Ok(deceased))
}

/// `PUT /api/deceased/:id`
pub async fn update<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    body: Result<Json<DeceasedRequest>, JsonRejection>,
) -> Result<Reply<Deceased>, ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = body?;
    let deceased = req.into_deceased(Some(id))?;
    let updated = state.burial_service.update_deceased(deceased).await?;
    Ok(Reply::Ok(updated))
}

/// `DELETE /api/deceased/:id`
pub async fn delete<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    state.burial_service.delete_deceased(parse_id(&id)?).await?;
    Ok(DeleteResponse::NoContent)
}
