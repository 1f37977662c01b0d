//! JSON REST handlers for burial, cremation and exhumation permits.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use munihub_app::ports::{PermitFilter, Repositories};
use munihub_domain::id::{DeceasedId, PlotId};
use munihub_domain::permit::{Permit, PermitDecision, PermitKind, PermitStatus};

use super::{Reply, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for filing a permit.
#[derive(Deserialize)]
pub struct PermitRequest {
    pub kind: PermitKind,
    pub deceased_id: DeceasedId,
    pub plot_id: Option<PlotId>,
    pub applicant_name: String,
    pub applicant_contact: String,
    pub remarks: Option<String>,
}

/// Request body for a reviewer decision.
#[derive(Deserialize)]
pub struct DecisionRequest {
    pub decision: PermitDecision,
    pub remarks: Option<String>,
}

/// Query string for listing permits.
#[derive(Deserialize)]
pub struct ListParams {
    pub status: Option<PermitStatus>,
    pub kind: Option<PermitKind>,
}

/// `GET /api/permits?status=&kind=`
pub async fn list<R: Repositories>(
    State(state): State<AppState<R>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Reply<Vec<Permit>>, ApiError> {
    let Query(params) = params?;
    let filter = PermitFilter {
        status: params.status,
        kind: params.kind,
    };
    let permits = state.permit_service.list_permits(filter).await?;
    Ok(Reply::Ok(permits))
}

/// `POST /api/permits`
pub async fn submit<R: Repositories>(
    State(state): State<AppState<R>>,
    body: Result<Json<PermitRequest>, JsonRejection>,
) -> Result<Reply<Permit>, ApiError> {
    let Json(req) = body?;
    let mut builder = Permit::builder(req.kind, req.deceased_id)
        .applicant_name(req.applicant_name)
        .applicant_contact(req.applicant_contact);
    if let Some(plot_id) = req.plot_id {
        builder = builder.plot_id(plot_id);
    }
    if let Some(remarks) = req.remarks {
        builder = builder.remarks(remarks);
    }
    let permit = state.permit_service.submit(builder.build()?).await?;
    Ok(Reply::Created(permit))
}

/// `GET /api/permits/:id`
pub async fn get<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Reply<Permit>, ApiError> {
    let permit = state.permit_service.get_permit(parse_id(&id)?).await?;
    Ok(Reply::Ok(permit))
}

/// `POST /api/permits/:id/decision`
pub async fn decide<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    body: Result<Json<DecisionRequest>, JsonRejection>,
) -> Result<Reply<Permit>, ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = body?;
    let permit = state
        .permit_service
        .decide(id, req.decision, req.remarks)
        .await?;
    Ok(Reply::Ok(permit))
}
