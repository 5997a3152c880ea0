use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Patient {
    pub id: i32,
    pub user_id: Uuid,
    pub phone: Option<String>,
    pub date_of_birth: Option<Date>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub current_medications: Option<String>,
    pub blood_type: Option<String>,
    pub insurance_provider: Option<String>,
    pub insurance_policy_number: Option<String>,
    pub preferred_language: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Profile fields the portal form submits; everything else is server-managed.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileFields {
    pub phone: Option<String>,
    pub date_of_birth: Option<Date>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub current_medications: Option<String>,
    pub blood_type: Option<String>,
    pub insurance_provider: Option<String>,
    pub insurance_policy_number: Option<String>,
    pub preferred_language: Option<String>,
}

const PATIENT_COLUMNS: &str = "id, user_id, phone, date_of_birth, address, emergency_contact, \
     medical_history, allergies, current_medications, blood_type, insurance_provider, \
     insurance_policy_number, preferred_language, created_at, updated_at";

pub async fn find_by_id(db: &PgPool, id: i32) -> anyhow::Result<Option<Patient>> {
    let row = sqlx::query_as::<_, Patient>(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn find_by_user_id(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Patient>> {
    let row = sqlx::query_as::<_, Patient>(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn create(db: &PgPool, user_id: Uuid, f: ProfileFields) -> anyhow::Result<Patient> {
    let row = sqlx::query_as::<_, Patient>(&format!(
        r#"
        INSERT INTO patients
            (user_id, phone, date_of_birth, address, emergency_contact, medical_history,
             allergies, current_medications, blood_type, insurance_provider,
             insurance_policy_number, preferred_language)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, COALESCE($12, 'English'))
        RETURNING {PATIENT_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(f.phone)
    .bind(f.date_of_birth)
    .bind(f.address)
    .bind(f.emergency_contact)
    .bind(f.medical_history)
    .bind(f.allergies)
    .bind(f.current_medications)
    .bind(f.blood_type)
    .bind(f.insurance_provider)
    .bind(f.insurance_policy_number)
    .bind(f.preferred_language)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Full replace of the profile fields; the portal form submits the whole profile.
pub async fn update(db: &PgPool, id: i32, f: ProfileFields) -> anyhow::Result<Patient> {
    let row = sqlx::query_as::<_, Patient>(&format!(
        r#"
        UPDATE patients SET
            phone = $2,
            date_of_birth = $3,
            address = $4,
            emergency_contact = $5,
            medical_history = $6,
            allergies = $7,
            current_medications = $8,
            blood_type = $9,
            insurance_provider = $10,
            insurance_policy_number = $11,
            preferred_language = COALESCE($12, preferred_language),
            updated_at = now()
        WHERE id = $1
        RETURNING {PATIENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(f.phone)
    .bind(f.date_of_birth)
    .bind(f.address)
    .bind(f.emergency_contact)
    .bind(f.medical_history)
    .bind(f.allergies)
    .bind(f.current_medications)
    .bind(f.blood_type)
    .bind(f.insurance_provider)
    .bind(f.insurance_policy_number)
    .bind(f.preferred_language)
    .fetch_one(db)
    .await?;
    Ok(row)
}
