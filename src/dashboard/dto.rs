use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub today_appointments: i64,
    pub total_appointments: i64,
    pub completed_appointments: i64,
    pub cancelled_appointments: i64,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusTotals {
    pub scheduled: i64,
    pub confirmed: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub total: i64,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ServiceBreakdown {
    pub service_id: i32,
    pub service_name: String,
    pub appointments: i64,
    /// Sum of service prices for completed appointments only.
    pub revenue: Decimal,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    /// "YYYY-MM"
    pub month: String,
    pub appointments: i64,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub totals: StatusTotals,
    pub by_service: Vec<ServiceBreakdown>,
    pub by_month: Vec<MonthlyCount>,
    pub total_revenue: Decimal,
}
