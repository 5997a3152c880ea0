use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument};

use crate::{auth::jwt::AuthUser, state::AppState};

use super::repo::{self, Patient, ProfileFields};

pub fn routes() -> Router<AppState> {
    Router::new().route("/patient/profile", get(get_profile).post(upsert_profile))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Patient>, (StatusCode, String)> {
    match repo::find_by_user_id(&state.db, user_id).await {
        Ok(Some(patient)) => Ok(Json(patient)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Profile not found".into())),
        Err(e) => Err(internal(e)),
    }
}

/// Creates the caller's profile on first submit, updates it afterwards.
#[instrument(skip(state, payload))]
pub async fn upsert_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ProfileFields>,
) -> Result<(StatusCode, Json<Patient>), (StatusCode, String)> {
    let existing = repo::find_by_user_id(&state.db, user_id)
        .await
        .map_err(internal)?;

    match existing {
        Some(patient) => {
            let updated = repo::update(&state.db, patient.id, payload)
                .await
                .map_err(internal)?;
            Ok((StatusCode::OK, Json(updated)))
        }
        None => {
            let created = repo::create(&state.db, user_id, payload)
                .await
                .map_err(internal)?;
            info!(patient_id = created.id, user_id = %user_id, "patient profile created");
            Ok((StatusCode::CREATED, Json(created)))
        }
    }
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "patients handler failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".into(),
    )
}
