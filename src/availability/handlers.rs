use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument};

use crate::{
    auth::{jwt::AuthUser, services::require_staff},
    state::AppState,
    timefmt,
};

use super::dto::{AvailabilityQuery, BlockedQuery, CreateAvailability, CreateBlockedSlot};
use super::repo::{self, Availability, BlockedSlot};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/availability",
            get(list_availability).post(create_availability),
        )
        .route(
            "/blocked-slots",
            get(list_blocked_slots).post(create_blocked_slot),
        )
}

/// Public: the booking page shows the weekly schedule.
#[instrument(skip(state))]
pub async fn list_availability(
    State(state): State<AppState>,
    Query(q): Query<AvailabilityQuery>,
) -> Result<Json<Vec<Availability>>, (StatusCode, String)> {
    let rows = repo::list_windows(&state.db, q.doctor_id)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_availability(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateAvailability>,
) -> Result<(StatusCode, Json<Availability>), (StatusCode, String)> {
    require_staff(&state.db, user_id).await?;

    if !(0..=6).contains(&payload.day_of_week) {
        return Err((
            StatusCode::BAD_REQUEST,
            "day_of_week must be between 0 (Sunday) and 6".into(),
        ));
    }
    if payload.start_time >= payload.end_time {
        return Err((
            StatusCode::BAD_REQUEST,
            "start_time must be before end_time".into(),
        ));
    }
    if payload.slot_minutes < 1 {
        return Err((
            StatusCode::BAD_REQUEST,
            "slot_minutes must be at least 1".into(),
        ));
    }

    let window = repo::create_window(
        &state.db,
        payload.doctor_id,
        payload.day_of_week,
        payload.start_time,
        payload.end_time,
        payload.slot_minutes,
        payload.break_minutes,
    )
    .await
    .map_err(internal)?;

    info!(
        availability_id = window.id,
        doctor_id = %window.doctor_id,
        day_of_week = window.day_of_week,
        "availability window created"
    );
    Ok((StatusCode::CREATED, Json(window)))
}

#[instrument(skip(state))]
pub async fn list_blocked_slots(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<BlockedQuery>,
) -> Result<Json<Vec<BlockedSlot>>, (StatusCode, String)> {
    require_staff(&state.db, user_id).await?;

    let date = match &q.date {
        Some(raw) => Some(
            timefmt::parse_date(raw)
                .ok_or((StatusCode::BAD_REQUEST, "date must be YYYY-MM-DD".into()))?,
        ),
        None => None,
    };

    let rows = repo::list_blocked(&state.db, q.doctor_id, date)
        .await
        .map_err(internal)?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_blocked_slot(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateBlockedSlot>,
) -> Result<(StatusCode, Json<BlockedSlot>), (StatusCode, String)> {
    require_staff(&state.db, user_id).await?;

    if payload.start_time >= payload.end_time {
        return Err((
            StatusCode::BAD_REQUEST,
            "start_time must be before end_time".into(),
        ));
    }

    let blocked = repo::create_blocked(
        &state.db,
        payload.doctor_id,
        payload.date,
        payload.start_time,
        payload.end_time,
        payload.reason.as_deref(),
    )
    .await
    .map_err(internal)?;

    info!(
        blocked_slot_id = blocked.id,
        doctor_id = %blocked.doctor_id,
        date = %blocked.date,
        "blocked slot created"
    );
    Ok((StatusCode::CREATED, Json(blocked)))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "availability handler failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".into(),
    )
}
