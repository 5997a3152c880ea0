use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use time::Date;

use crate::appointments::repo::AppointmentStatus;

#[derive(Debug, FromRow)]
pub struct StatsRow {
    pub today: i64,
    pub total: i64,
    pub completed: i64,
    pub cancelled: i64,
}

pub async fn stats(db: &PgPool, today: Date) -> anyhow::Result<StatsRow> {
    let row = sqlx::query_as::<_, StatsRow>(
        r#"
        SELECT
            COUNT(*) FILTER (WHERE appointment_date = $1) AS today,
            COUNT(*) AS total,
            COUNT(*) FILTER (WHERE status = 'completed') AS completed,
            COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled
        FROM appointments
        "#,
    )
    .bind(today)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// One row per appointment joined with its service; the analytics view
/// aggregates these in memory at request time.
#[derive(Debug, Clone, FromRow)]
pub struct AnalyticsRow {
    pub status: AppointmentStatus,
    pub appointment_date: Date,
    pub service_id: i32,
    pub service_name: String,
    pub price: Decimal,
}

pub async fn analytics_rows(db: &PgPool) -> anyhow::Result<Vec<AnalyticsRow>> {
    let rows = sqlx::query_as::<_, AnalyticsRow>(
        r#"
        SELECT a.status, a.appointment_date, s.id AS service_id, s.name AS service_name, s.price
        FROM appointments a
        JOIN services s ON s.id = a.service_id
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}
