use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "appointment_status", rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: i32,
    pub patient_id: Option<i32>,
    pub service_id: i32,
    pub doctor_id: Option<Uuid>,
    pub appointment_date: Date,
    #[serde(with = "crate::timefmt")]
    pub appointment_time: Time,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Insert payload; status always starts as `scheduled`.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: Option<i32>,
    pub service_id: i32,
    pub doctor_id: Option<Uuid>,
    pub appointment_date: Date,
    pub appointment_time: Time,
    pub notes: Option<String>,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentPatch {
    pub status: Option<AppointmentStatus>,
    pub appointment_date: Option<Date>,
    pub appointment_time: Option<Time>,
    pub doctor_id: Option<Uuid>,
    pub notes: Option<String>,
}

/// An occupied interval on a doctor's day, used for slot computation.
#[derive(Debug, Clone, FromRow)]
pub struct BookedSlot {
    pub appointment_time: Time,
    pub duration_minutes: i32,
}

const APPOINTMENT_COLUMNS: &str = "id, patient_id, service_id, doctor_id, appointment_date, \
     appointment_time, status, notes, patient_name, patient_email, patient_phone, \
     created_at, updated_at";

pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Appointment>> {
    let rows = sqlx::query_as::<_, Appointment>(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments \
         ORDER BY appointment_date DESC, appointment_time"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_for_patient(db: &PgPool, patient_id: i32) -> anyhow::Result<Vec<Appointment>> {
    let rows = sqlx::query_as::<_, Appointment>(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE patient_id = $1 \
         ORDER BY appointment_date DESC, appointment_time"
    ))
    .bind(patient_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_by_date(db: &PgPool, date: Date) -> anyhow::Result<Vec<Appointment>> {
    let rows = sqlx::query_as::<_, Appointment>(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE appointment_date = $1 \
         ORDER BY appointment_time"
    ))
    .bind(date)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(db: &PgPool, id: i32) -> anyhow::Result<Option<Appointment>> {
    let row = sqlx::query_as::<_, Appointment>(&format!(
        "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn create(db: &PgPool, new: NewAppointment) -> anyhow::Result<Appointment> {
    let row = sqlx::query_as::<_, Appointment>(&format!(
        r#"
        INSERT INTO appointments
            (patient_id, service_id, doctor_id, appointment_date, appointment_time,
             notes, patient_name, patient_email, patient_phone)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {APPOINTMENT_COLUMNS}
        "#
    ))
    .bind(new.patient_id)
    .bind(new.service_id)
    .bind(new.doctor_id)
    .bind(new.appointment_date)
    .bind(new.appointment_time)
    .bind(new.notes)
    .bind(new.patient_name)
    .bind(new.patient_email)
    .bind(new.patient_phone)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i32,
    patch: AppointmentPatch,
) -> anyhow::Result<Option<Appointment>> {
    let row = sqlx::query_as::<_, Appointment>(&format!(
        r#"
        UPDATE appointments SET
            status = COALESCE($2, status),
            appointment_date = COALESCE($3, appointment_date),
            appointment_time = COALESCE($4, appointment_time),
            doctor_id = COALESCE($5, doctor_id),
            notes = COALESCE($6, notes),
            updated_at = now()
        WHERE id = $1
        RETURNING {APPOINTMENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(patch.status)
    .bind(patch.appointment_date)
    .bind(patch.appointment_time)
    .bind(patch.doctor_id)
    .bind(patch.notes)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Non-cancelled bookings for a day, with service duration, for slot math.
/// A null `doctor_id` filter matches every doctor.
pub async fn booked_for_date(
    db: &PgPool,
    date: Date,
    doctor_id: Option<Uuid>,
) -> anyhow::Result<Vec<BookedSlot>> {
    let rows = sqlx::query_as::<_, BookedSlot>(
        r#"
        SELECT a.appointment_time, s.duration_minutes
        FROM appointments a
        JOIN services s ON s.id = a.service_id
        WHERE a.appointment_date = $1
          AND ($2::uuid IS NULL OR a.doctor_id = $2)
          AND a.status <> 'cancelled'
        ORDER BY a.appointment_time
        "#,
    )
    .bind(date)
    .bind(doctor_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Scheduled).unwrap(),
            "\"scheduled\""
        );
        let parsed: AppointmentStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, AppointmentStatus::Cancelled);
    }

    #[test]
    fn status_display_matches_wire_format() {
        assert_eq!(AppointmentStatus::Confirmed.to_string(), "confirmed");
    }
}
