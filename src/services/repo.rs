use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price: Decimal,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
}

const SERVICE_COLUMNS: &str =
    "id, name, description, duration_minutes, price, is_active, created_at";

pub async fn list_active(db: &PgPool) -> anyhow::Result<Vec<Service>> {
    let rows = sqlx::query_as::<_, Service>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services WHERE is_active ORDER BY name"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Service>> {
    let rows = sqlx::query_as::<_, Service>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services ORDER BY name"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(db: &PgPool, id: i32) -> anyhow::Result<Option<Service>> {
    let row = sqlx::query_as::<_, Service>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn create(
    db: &PgPool,
    name: &str,
    description: Option<&str>,
    duration_minutes: i32,
    price: Decimal,
) -> anyhow::Result<Service> {
    let row = sqlx::query_as::<_, Service>(&format!(
        r#"
        INSERT INTO services (name, description, duration_minutes, price)
        VALUES ($1, $2, $3, $4)
        RETURNING {SERVICE_COLUMNS}
        "#
    ))
    .bind(name)
    .bind(description)
    .bind(duration_minutes)
    .bind(price)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i32,
    name: Option<&str>,
    description: Option<&str>,
    duration_minutes: Option<i32>,
    price: Option<Decimal>,
    is_active: Option<bool>,
) -> anyhow::Result<Option<Service>> {
    let row = sqlx::query_as::<_, Service>(&format!(
        r#"
        UPDATE services SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            duration_minutes = COALESCE($4, duration_minutes),
            price = COALESCE($5, price),
            is_active = COALESCE($6, is_active)
        WHERE id = $1
        RETURNING {SERVICE_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(duration_minutes)
    .bind(price)
    .bind(is_active)
    .fetch_optional(db)
    .await?;
    Ok(row)
}
