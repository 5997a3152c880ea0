use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;

/// Weekly recurring open window for a doctor. `day_of_week` is Sunday-based
/// (0 = Sunday .. 6 = Saturday).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Availability {
    pub id: i32,
    pub doctor_id: Uuid,
    pub day_of_week: i32,
    #[serde(with = "crate::timefmt")]
    pub start_time: Time,
    #[serde(with = "crate::timefmt")]
    pub end_time: Time,
    pub slot_minutes: i32,
    pub break_minutes: i32,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
}

/// Date-specific exception that removes slots from a day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlockedSlot {
    pub id: i32,
    pub doctor_id: Uuid,
    pub date: Date,
    #[serde(with = "crate::timefmt")]
    pub start_time: Time,
    #[serde(with = "crate::timefmt")]
    pub end_time: Time,
    pub reason: Option<String>,
    pub created_at: OffsetDateTime,
}

const WINDOW_COLUMNS: &str = "id, doctor_id, day_of_week, start_time, end_time, slot_minutes, \
     break_minutes, is_active, created_at";

const BLOCKED_COLUMNS: &str = "id, doctor_id, date, start_time, end_time, reason, created_at";

pub async fn list_windows(db: &PgPool, doctor_id: Option<Uuid>) -> anyhow::Result<Vec<Availability>> {
    let rows = sqlx::query_as::<_, Availability>(&format!(
        "SELECT {WINDOW_COLUMNS} FROM availability \
         WHERE is_active AND ($1::uuid IS NULL OR doctor_id = $1) \
         ORDER BY day_of_week, start_time"
    ))
    .bind(doctor_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn windows_for_day(
    db: &PgPool,
    doctor_id: Option<Uuid>,
    day_of_week: i32,
) -> anyhow::Result<Vec<Availability>> {
    let rows = sqlx::query_as::<_, Availability>(&format!(
        "SELECT {WINDOW_COLUMNS} FROM availability \
         WHERE is_active AND day_of_week = $2 AND ($1::uuid IS NULL OR doctor_id = $1) \
         ORDER BY start_time"
    ))
    .bind(doctor_id)
    .bind(day_of_week)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create_window(
    db: &PgPool,
    doctor_id: Uuid,
    day_of_week: i32,
    start_time: Time,
    end_time: Time,
    slot_minutes: i32,
    break_minutes: i32,
) -> anyhow::Result<Availability> {
    let row = sqlx::query_as::<_, Availability>(&format!(
        r#"
        INSERT INTO availability
            (doctor_id, day_of_week, start_time, end_time, slot_minutes, break_minutes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {WINDOW_COLUMNS}
        "#
    ))
    .bind(doctor_id)
    .bind(day_of_week)
    .bind(start_time)
    .bind(end_time)
    .bind(slot_minutes)
    .bind(break_minutes)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn list_blocked(
    db: &PgPool,
    doctor_id: Option<Uuid>,
    date: Option<Date>,
) -> anyhow::Result<Vec<BlockedSlot>> {
    let rows = sqlx::query_as::<_, BlockedSlot>(&format!(
        "SELECT {BLOCKED_COLUMNS} FROM blocked_slots \
         WHERE ($1::uuid IS NULL OR doctor_id = $1) AND ($2::date IS NULL OR date = $2) \
         ORDER BY date, start_time"
    ))
    .bind(doctor_id)
    .bind(date)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn blocked_for_date(
    db: &PgPool,
    doctor_id: Option<Uuid>,
    date: Date,
) -> anyhow::Result<Vec<BlockedSlot>> {
    let rows = sqlx::query_as::<_, BlockedSlot>(&format!(
        "SELECT {BLOCKED_COLUMNS} FROM blocked_slots \
         WHERE date = $2 AND ($1::uuid IS NULL OR doctor_id = $1) \
         ORDER BY start_time"
    ))
    .bind(doctor_id)
    .bind(date)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create_blocked(
    db: &PgPool,
    doctor_id: Uuid,
    date: Date,
    start_time: Time,
    end_time: Time,
    reason: Option<&str>,
) -> anyhow::Result<BlockedSlot> {
    let row = sqlx::query_as::<_, BlockedSlot>(&format!(
        r#"
        INSERT INTO blocked_slots (doctor_id, date, start_time, end_time, reason)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {BLOCKED_COLUMNS}
        "#
    ))
    .bind(doctor_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .bind(reason)
    .fetch_one(db)
    .await?;
    Ok(row)
}
