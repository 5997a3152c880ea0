use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateService {
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct PatchService {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_service_accepts_number_and_string_price() {
        let from_number: CreateService =
            serde_json::from_str(r#"{"name":"Checkup","duration_minutes":30,"price":500.0}"#)
                .unwrap();
        let from_string: CreateService =
            serde_json::from_str(r#"{"name":"Checkup","duration_minutes":30,"price":"500.00"}"#)
                .unwrap();
        assert_eq!(from_number.price, Decimal::new(5000, 1));
        assert_eq!(from_string.price, Decimal::new(50000, 2));
    }
}
