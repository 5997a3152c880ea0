use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        jwt::AuthUser,
        services::{current_user, require_staff},
    },
    patients,
    state::AppState,
};

use super::repo::{self, MedicalRecord, NewMedicalRecord};

#[derive(Debug, Deserialize)]
pub struct RecordQuery {
    pub patient_id: Option<i32>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/medical-records", get(list_records).post(create_record))
}

/// Staff read the whole history, optionally filtered by patient; a patient
/// only ever sees their own records (the filter is ignored for them).
#[instrument(skip(state))]
pub async fn list_records(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<RecordQuery>,
) -> Result<Json<Vec<MedicalRecord>>, (StatusCode, String)> {
    let user = current_user(&state.db, user_id).await?;

    if user.role.is_staff() {
        let rows = match q.patient_id {
            Some(patient_id) => repo::list_for_patient(&state.db, patient_id)
                .await
                .map_err(internal)?,
            None => repo::list_all(&state.db).await.map_err(internal)?,
        };
        return Ok(Json(rows));
    }

    let rows = match patients::repo::find_by_user_id(&state.db, user.id)
        .await
        .map_err(internal)?
    {
        Some(patient) => repo::list_for_patient(&state.db, patient.id)
            .await
            .map_err(internal)?,
        None => Vec::new(),
    };
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_record(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<NewMedicalRecord>,
) -> Result<(StatusCode, Json<MedicalRecord>), (StatusCode, String)> {
    require_staff(&state.db, user_id).await?;

    if patients::repo::find_by_id(&state.db, payload.patient_id)
        .await
        .map_err(internal)?
        .is_none()
    {
        warn!(patient_id = payload.patient_id, "record for unknown patient");
        return Err((StatusCode::BAD_REQUEST, "patient_id is unknown".into()));
    }

    let record = repo::create(&state.db, payload).await.map_err(internal)?;
    info!(
        record_id = record.id,
        patient_id = record.patient_id,
        "medical record created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "records handler failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".into(),
    )
}
