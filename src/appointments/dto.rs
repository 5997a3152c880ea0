use serde::Deserialize;
use time::{Date, Time};
use uuid::Uuid;

use super::repo::AppointmentStatus;

/// Public booking form payload. The contact snapshot is denormalized onto the
/// appointment so walk-in bookings work without a portal profile.
#[derive(Debug, Deserialize)]
pub struct CreateAppointment {
    pub patient_id: Option<i32>,
    pub service_id: i32,
    pub doctor_id: Option<Uuid>,
    pub appointment_date: Date,
    #[serde(with = "crate::timefmt")]
    pub appointment_time: Time,
    pub notes: Option<String>,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
}

#[derive(Debug, Deserialize)]
pub struct PatchAppointment {
    pub status: Option<AppointmentStatus>,
    pub appointment_date: Option<Date>,
    #[serde(default, with = "crate::timefmt::option")]
    pub appointment_time: Option<Time>,
    pub doctor_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: String,
    pub doctor_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    #[test]
    fn booking_payload_parses_iso_date_and_time() {
        let payload: CreateAppointment = serde_json::from_str(
            r#"{
                "service_id": 2,
                "appointment_date": "2025-03-14",
                "appointment_time": "09:30:00",
                "patient_name": "Asha Rao",
                "patient_email": "asha@example.com",
                "patient_phone": "+91 11111 11111"
            }"#,
        )
        .unwrap();
        assert_eq!(payload.appointment_date, date!(2025 - 03 - 14));
        assert_eq!(payload.appointment_time, time!(9:30));
        assert!(payload.patient_id.is_none());
    }

    #[test]
    fn patch_allows_status_only() {
        let patch: PatchAppointment = serde_json::from_str(r#"{"status":"confirmed"}"#).unwrap();
        assert_eq!(patch.status, Some(AppointmentStatus::Confirmed));
        assert!(patch.appointment_date.is_none());
    }
}
