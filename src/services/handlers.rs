use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{jwt::AuthUser, services::require_staff},
    state::AppState,
};

use super::dto::{CreateService, PatchService};
use super::repo::{self, Service};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_active_services).post(create_service))
        .route("/services/all", get(list_all_services))
        .route("/services/:id", patch(patch_service))
}

/// Public catalog shown on the marketing site and in the booking form.
#[instrument(skip(state))]
pub async fn list_active_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<Service>>, (StatusCode, String)> {
    let services = repo::list_active(&state.db).await.map_err(internal)?;
    Ok(Json(services))
}

#[instrument(skip(state))]
pub async fn list_all_services(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Service>>, (StatusCode, String)> {
    require_staff(&state.db, user_id).await?;
    let services = repo::list_all(&state.db).await.map_err(internal)?;
    Ok(Json(services))
}

#[instrument(skip(state, payload))]
pub async fn create_service(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateService>,
) -> Result<(StatusCode, Json<Service>), (StatusCode, String)> {
    require_staff(&state.db, user_id).await?;

    if payload.name.trim().is_empty() {
        warn!("service name missing");
        return Err((StatusCode::BAD_REQUEST, "name is required".into()));
    }
    if payload.duration_minutes < 1 {
        return Err((
            StatusCode::BAD_REQUEST,
            "duration_minutes must be at least 1".into(),
        ));
    }

    let service = repo::create(
        &state.db,
        payload.name.trim(),
        payload.description.as_deref(),
        payload.duration_minutes,
        payload.price,
    )
    .await
    .map_err(internal)?;

    info!(service_id = service.id, name = %service.name, "service created");
    Ok((StatusCode::CREATED, Json(service)))
}

#[instrument(skip(state, payload))]
pub async fn patch_service(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<PatchService>,
) -> Result<Json<Service>, (StatusCode, String)> {
    require_staff(&state.db, user_id).await?;

    if let Some(d) = payload.duration_minutes {
        if d < 1 {
            return Err((
                StatusCode::BAD_REQUEST,
                "duration_minutes must be at least 1".into(),
            ));
        }
    }

    let updated = repo::update(
        &state.db,
        id,
        payload.name.as_deref(),
        payload.description.as_deref(),
        payload.duration_minutes,
        payload.price,
        payload.is_active,
    )
    .await
    .map_err(internal)?;

    match updated {
        Some(service) => Ok(Json(service)),
        None => Err((StatusCode::NOT_FOUND, "Service not found".into())),
    }
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "services handler failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".into(),
    )
}
