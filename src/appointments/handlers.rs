use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        jwt::AuthUser,
        services::{current_user, is_valid_email, require_staff},
    },
    availability, patients,
    services::repo as services_repo,
    state::AppState,
    timefmt,
};

use super::dto::{CreateAppointment, PatchAppointment, SlotQuery};
use super::repo::{self, Appointment, AppointmentPatch, AppointmentStatus, NewAppointment};
use super::services::{notify_confirmation, notify_reminder, transition_allowed};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/appointments",
            get(list_appointments).post(create_appointment),
        )
        .route("/appointments/date/:date", get(list_by_date))
        .route("/appointments/slots", get(list_free_slots))
        .route("/appointments/:id", patch(patch_appointment))
        .route("/appointments/:id/remind", post(remind))
}

/// Public booking endpoint; no login required. The confirmation email is
/// best-effort and never fails the booking.
#[instrument(skip(state, payload))]
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(payload): Json<CreateAppointment>,
) -> Result<(StatusCode, Json<Appointment>), (StatusCode, String)> {
    if payload.patient_name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "patient_name is required".into()));
    }
    if !is_valid_email(payload.patient_email.trim()) {
        return Err((StatusCode::BAD_REQUEST, "patient_email is invalid".into()));
    }
    if payload.patient_phone.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "patient_phone is required".into()));
    }

    let service = match services_repo::find_by_id(&state.db, payload.service_id)
        .await
        .map_err(internal)?
    {
        Some(s) if s.is_active => s,
        _ => {
            warn!(service_id = payload.service_id, "booking with unknown or inactive service");
            return Err((
                StatusCode::BAD_REQUEST,
                "service_id is unknown or inactive".into(),
            ));
        }
    };

    let new = NewAppointment {
        patient_id: payload.patient_id,
        service_id: service.id,
        doctor_id: payload.doctor_id.or(state.config.clinic.default_doctor_id),
        appointment_date: payload.appointment_date,
        appointment_time: payload.appointment_time,
        notes: payload.notes,
        patient_name: payload.patient_name.trim().to_string(),
        patient_email: payload.patient_email.trim().to_string(),
        patient_phone: payload.patient_phone.trim().to_string(),
    };

    let appointment = repo::create(&state.db, new).await.map_err(internal)?;
    info!(
        appointment_id = appointment.id,
        service = %service.name,
        date = %appointment.appointment_date,
        "appointment booked"
    );

    notify_confirmation(&state, &appointment, &service).await;

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// Staff see the whole book; a patient only their own rows.
#[instrument(skip(state))]
pub async fn list_appointments(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Appointment>>, (StatusCode, String)> {
    let user = current_user(&state.db, user_id).await?;

    if user.role.is_staff() {
        let rows = repo::list_all(&state.db).await.map_err(internal)?;
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

#[instrument(skip(state))]
pub async fn list_by_date(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<String>,
) -> Result<Json<Vec<Appointment>>, (StatusCode, String)> {
    require_staff(&state.db, user_id).await?;

    let date = timefmt::parse_date(&date)
        .ok_or((StatusCode::BAD_REQUEST, "date must be YYYY-MM-DD".into()))?;
    let rows = repo::list_by_date(&state.db, date).await.map_err(internal)?;
    Ok(Json(rows))
}

/// Free booking slots for a day: weekly availability minus blocked slots
/// minus existing non-cancelled appointments. Public, feeds the booking form.
#[instrument(skip(state))]
pub async fn list_free_slots(
    State(state): State<AppState>,
    Query(q): Query<SlotQuery>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let date = timefmt::parse_date(&q.date)
        .ok_or((StatusCode::BAD_REQUEST, "date must be YYYY-MM-DD".into()))?;
    let doctor_id = q.doctor_id.or(state.config.clinic.default_doctor_id);
    let day_of_week = date.weekday().number_days_from_sunday() as i32;

    let windows = availability::repo::windows_for_day(&state.db, doctor_id, day_of_week)
        .await
        .map_err(internal)?;
    let blocked = availability::repo::blocked_for_date(&state.db, doctor_id, date)
        .await
        .map_err(internal)?;
    let booked = repo::booked_for_date(&state.db, date, doctor_id)
        .await
        .map_err(internal)?;

    let mut busy = availability::services::busy_from_blocked(&blocked);
    busy.extend(availability::services::busy_from_booked(&booked));

    let slots = availability::services::free_slots(&windows, &busy);
    Ok(Json(slots.into_iter().map(timefmt::hhmm).collect()))
}

/// Staff can reschedule and move status; a patient may only cancel their own
/// appointment. Status changes follow the transition graph.
#[instrument(skip(state, payload))]
pub async fn patch_appointment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<PatchAppointment>,
) -> Result<Json<Appointment>, (StatusCode, String)> {
    let user = current_user(&state.db, user_id).await?;

    let existing = repo::find_by_id(&state.db, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Appointment not found".into()))?;

    if !user.role.is_staff() {
        let owns = patients::repo::find_by_user_id(&state.db, user.id)
            .await
            .map_err(internal)?
            .map(|p| existing.patient_id == Some(p.id))
            .unwrap_or(false);
        if !owns {
            return Err((StatusCode::FORBIDDEN, "Not your appointment".into()));
        }

        let only_cancel = payload.status == Some(AppointmentStatus::Cancelled)
            && payload.appointment_date.is_none()
            && payload.appointment_time.is_none()
            && payload.doctor_id.is_none()
            && payload.notes.is_none();
        if !only_cancel {
            return Err((
                StatusCode::FORBIDDEN,
                "Patients may only cancel their appointment".into(),
            ));
        }
    }

    if let Some(to) = payload.status {
        if !transition_allowed(existing.status, to) {
            warn!(
                appointment_id = id,
                from = %existing.status,
                to = %to,
                "invalid status transition"
            );
            return Err((
                StatusCode::BAD_REQUEST,
                format!("invalid status transition {} -> {}", existing.status, to),
            ));
        }
    }

    let patch = AppointmentPatch {
        status: payload.status,
        appointment_date: payload.appointment_date,
        appointment_time: payload.appointment_time,
        doctor_id: payload.doctor_id,
        notes: payload.notes,
    };

    let updated = repo::update(&state.db, id, patch)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Appointment not found".into()))?;

    info!(appointment_id = id, status = %updated.status, "appointment updated");
    Ok(Json(updated))
}

/// Staff-triggered reminder email. 202 regardless of delivery outcome; an
/// unconfigured mailer or SMTP failure only logs.
#[instrument(skip(state))]
pub async fn remind(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, (StatusCode, String)> {
    require_staff(&state.db, user_id).await?;

    let appointment = repo::find_by_id(&state.db, id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Appointment not found".into()))?;

    let service = services_repo::find_by_id(&state.db, appointment.service_id)
        .await
        .map_err(internal)?
        .ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".into(),
        ))?;

    notify_reminder(&state, &appointment, &service).await;
    Ok(StatusCode::ACCEPTED)
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "appointments handler failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".into(),
    )
}
