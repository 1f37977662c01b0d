//! JSON REST handlers for plot and deceased search.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use munihub_app::ports::Repositories;
use munihub_domain::cemetery::PlotStatus;
use munihub_domain::search::{SearchHit, SearchQuery};

use super::{Reply, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Query string accepted by both search endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub status: Option<PlotStatus>,
    pub section: Option<String>,
    pub limit: Option<usize>,
}

impl From<SearchParams> for SearchQuery {
    fn from(params: SearchParams) -> Self {
        Self {
            text: params.q,
            status: params.status,
            section: params.section,
            limit: params.limit,
        }
    }
}

/// `GET /api/cemeteries/:id/search`
pub async fn within<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Reply<Vec<SearchHit>>, ApiError> {
    let cemetery_id = parse_id(&id)?;
    let Query(params) = params?;
    let hits = state
        .search_service
        .search_cemetery(cemetery_id, params.into())
        .await?;
    Ok(Reply::Ok(hits))
}

/// `GET /api/search`
pub async fn everywhere<R: Repositories>(
    State(state): State<AppState<R>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Reply<Vec<SearchHit>>, ApiError> {
    let Query(params) = params?;
    let hits = state.search_service.search_all(params.into()).await?;
    Ok(Reply::Ok(hits))
}
