use serde::Deserialize;
use time::{Date, Time};
use uuid::Uuid;

fn default_slot_minutes() -> i32 {
    30
}

#[derive(Debug, Deserialize)]
pub struct CreateAvailability {
    pub doctor_id: Uuid,
    pub day_of_week: i32,
    #[serde(with = "crate::timefmt")]
    pub start_time: Time,
    #[serde(with = "crate::timefmt")]
    pub end_time: Time,
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: i32,
    #[serde(default)]
    pub break_minutes: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateBlockedSlot {
    pub doctor_id: Uuid,
    pub date: Date,
    #[serde(with = "crate::timefmt")]
    pub start_time: Time,
    #[serde(with = "crate::timefmt")]
    pub end_time: Time,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub doctor_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct BlockedQuery {
    pub doctor_id: Option<Uuid>,
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::time;

    #[test]
    fn create_availability_defaults() {
        let payload: CreateAvailability = serde_json::from_str(&format!(
            r#"{{"doctor_id":"{}","day_of_week":1,"start_time":"09:00","end_time":"17:00"}}"#,
            Uuid::nil()
        ))
        .unwrap();
        assert_eq!(payload.slot_minutes, 30);
        assert_eq!(payload.break_minutes, 0);
        assert_eq!(payload.start_time, time!(9:00));
    }
}
