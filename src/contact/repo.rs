use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactMessage {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: OffsetDateTime,
}

const MESSAGE_COLUMNS: &str =
    "id, first_name, last_name, email, phone, subject, message, is_read, created_at";

pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<ContactMessage>> {
    let rows = sqlx::query_as::<_, ContactMessage>(&format!(
        "SELECT {MESSAGE_COLUMNS} FROM contact_messages ORDER BY created_at DESC"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: Option<&str>,
    subject: &str,
    message: &str,
) -> anyhow::Result<ContactMessage> {
    let row = sqlx::query_as::<_, ContactMessage>(&format!(
        r#"
        INSERT INTO contact_messages (first_name, last_name, email, phone, subject, message)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {MESSAGE_COLUMNS}
        "#
    ))
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(phone)
    .bind(subject)
    .bind(message)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn mark_read(db: &PgPool, id: i32) -> anyhow::Result<Option<ContactMessage>> {
    let row = sqlx::query_as::<_, ContactMessage>(&format!(
        "UPDATE contact_messages SET is_read = TRUE WHERE id = $1 RETURNING {MESSAGE_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}
