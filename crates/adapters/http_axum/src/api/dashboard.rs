//! Staff dashboard overview.

use axum::extract::State;

use munihub_app::ports::Repositories;
use munihub_domain::stats::DashboardStats;

use super::Reply;
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/dashboard/stats`
pub async fn stats<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<Reply<DashboardStats>, ApiError> {
    let stats = state.dashboard_service.stats().await?;
    Ok(Reply::Ok(stats))
}
