use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        jwt::AuthUser,
        services::{is_valid_email, require_staff},
    },
    state::AppState,
};

use super::repo::{self, ContactMessage};

#[derive(Debug, Deserialize)]
pub struct CreateContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contact", get(list_messages).post(create_message))
        .route("/contact/:id/read", patch(mark_read))
}

/// Public inquiry form on the marketing site.
#[instrument(skip(state, payload))]
pub async fn create_message(
    State(state): State<AppState>,
    Json(payload): Json<CreateContactMessage>,
) -> Result<(StatusCode, Json<ContactMessage>), (StatusCode, String)> {
    for (field, value) in [
        ("first_name", &payload.first_name),
        ("last_name", &payload.last_name),
        ("subject", &payload.subject),
        ("message", &payload.message),
    ] {
        if value.trim().is_empty() {
            warn!(field, "contact form field missing");
            return Err((StatusCode::BAD_REQUEST, format!("{field} is required")));
        }
    }
    if !is_valid_email(payload.email.trim()) {
        return Err((StatusCode::BAD_REQUEST, "email is invalid".into()));
    }

    let message = repo::create(
        &state.db,
        payload.first_name.trim(),
        payload.last_name.trim(),
        payload.email.trim(),
        payload.phone.as_deref(),
        payload.subject.trim(),
        payload.message.trim(),
    )
    .await
    .map_err(internal)?;

    info!(message_id = message.id, "contact message received");
    Ok((StatusCode::CREATED, Json(message)))
}

#[instrument(skip(state))]
pub async fn list_messages(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ContactMessage>>, (StatusCode, String)> {
    require_staff(&state.db, user_id).await?;
    let messages = repo::list_all(&state.db).await.map_err(internal)?;
    Ok(Json(messages))
}

#[instrument(skip(state))]
pub async fn mark_read(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ContactMessage>, (StatusCode, String)> {
    require_staff(&state.db, user_id).await?;

    match repo::mark_read(&state.db, id).await.map_err(internal)? {
        Some(message) => Ok(Json(message)),
        None => Err((StatusCode::NOT_FOUND, "Message not found".into())),
    }
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "contact handler failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".into(),
    )
}
