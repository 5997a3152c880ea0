use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use time::OffsetDateTime;
use tracing::{error, instrument};

use crate::{
    auth::{jwt::AuthUser, services::require_staff},
    state::AppState,
};

use super::dto::{AnalyticsResponse, DashboardStats};
use super::repo;
use super::services::{monthly_breakdown, service_breakdown, status_totals, total_revenue};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(dashboard_stats))
        .route("/analytics", get(analytics))
}

#[instrument(skip(state))]
pub async fn dashboard_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DashboardStats>, (StatusCode, String)> {
    require_staff(&state.db, user_id).await?;

    let today = OffsetDateTime::now_utc().date();
    let row = repo::stats(&state.db, today).await.map_err(internal)?;

    Ok(Json(DashboardStats {
        today_appointments: row.today,
        total_appointments: row.total,
        completed_appointments: row.completed,
        cancelled_appointments: row.cancelled,
    }))
}

#[instrument(skip(state))]
pub async fn analytics(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<AnalyticsResponse>, (StatusCode, String)> {
    require_staff(&state.db, user_id).await?;

    let rows = repo::analytics_rows(&state.db).await.map_err(internal)?;

    Ok(Json(AnalyticsResponse {
        totals: status_totals(&rows),
        by_service: service_breakdown(&rows),
        by_month: monthly_breakdown(&rows),
        total_revenue: total_revenue(&rows),
    }))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "dashboard handler failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".into(),
    )
}
