use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MedicalRecord {
    pub id: i32,
    pub patient_id: i32,
    pub appointment_id: Option<i32>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
    pub notes: Option<String>,
    pub follow_up_required: bool,
    pub follow_up_date: Option<Date>,
    pub attachments: Option<Vec<String>>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Treatment note captured by a doctor after (or outside) an appointment.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMedicalRecord {
    pub patient_id: i32,
    pub appointment_id: Option<i32>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub follow_up_required: bool,
    pub follow_up_date: Option<Date>,
    pub attachments: Option<Vec<String>>,
}

const RECORD_COLUMNS: &str = "id, patient_id, appointment_id, diagnosis, treatment, \
     prescription, notes, follow_up_required, follow_up_date, attachments, created_at, updated_at";

pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<MedicalRecord>> {
    let rows = sqlx::query_as::<_, MedicalRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM medical_records ORDER BY created_at DESC"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_for_patient(db: &PgPool, patient_id: i32) -> anyhow::Result<Vec<MedicalRecord>> {
    let rows = sqlx::query_as::<_, MedicalRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM medical_records WHERE patient_id = $1 \
         ORDER BY created_at DESC"
    ))
    .bind(patient_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create(db: &PgPool, new: NewMedicalRecord) -> anyhow::Result<MedicalRecord> {
    let row = sqlx::query_as::<_, MedicalRecord>(&format!(
        r#"
        INSERT INTO medical_records
            (patient_id, appointment_id, diagnosis, treatment, prescription, notes,
             follow_up_required, follow_up_date, attachments)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {RECORD_COLUMNS}
        "#
    ))
    .bind(new.patient_id)
    .bind(new.appointment_id)
    .bind(new.diagnosis)
    .bind(new.treatment)
    .bind(new.prescription)
    .bind(new.notes)
    .bind(new.follow_up_required)
    .bind(new.follow_up_date)
    .bind(new.attachments)
    .fetch_one(db)
    .await?;
    Ok(row)
}
