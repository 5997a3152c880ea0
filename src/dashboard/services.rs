//! In-memory aggregation for the analytics view. The row set is the full
//! appointment book joined with services; clinic volumes make that cheap
//! enough to recompute per request.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::appointments::repo::AppointmentStatus;

use super::dto::{MonthlyCount, ServiceBreakdown, StatusTotals};
use super::repo::AnalyticsRow;

pub fn status_totals(rows: &[AnalyticsRow]) -> StatusTotals {
    let mut totals = StatusTotals::default();
    for row in rows {
        totals.total += 1;
        match row.status {
            AppointmentStatus::Scheduled => totals.scheduled += 1,
            AppointmentStatus::Confirmed => totals.confirmed += 1,
            AppointmentStatus::Completed => totals.completed += 1,
            AppointmentStatus::Cancelled => totals.cancelled += 1,
        }
    }
    totals
}

/// Per-service appointment counts and realized revenue, busiest first.
pub fn service_breakdown(rows: &[AnalyticsRow]) -> Vec<ServiceBreakdown> {
    let mut by_service: HashMap<i32, ServiceBreakdown> = HashMap::new();
    for row in rows {
        let entry = by_service
            .entry(row.service_id)
            .or_insert_with(|| ServiceBreakdown {
                service_id: row.service_id,
                service_name: row.service_name.clone(),
                appointments: 0,
                revenue: Decimal::ZERO,
            });
        entry.appointments += 1;
        if row.status == AppointmentStatus::Completed {
            entry.revenue += row.price;
        }
    }

    let mut out: Vec<ServiceBreakdown> = by_service.into_values().collect();
    out.sort_by(|a, b| {
        b.appointments
            .cmp(&a.appointments)
            .then_with(|| a.service_name.cmp(&b.service_name))
    });
    out
}

pub fn monthly_breakdown(rows: &[AnalyticsRow]) -> Vec<MonthlyCount> {
    let mut by_month: BTreeMap<String, i64> = BTreeMap::new();
    for row in rows {
        let key = format!(
            "{:04}-{:02}",
            row.appointment_date.year(),
            u8::from(row.appointment_date.month())
        );
        *by_month.entry(key).or_default() += 1;
    }
    by_month
        .into_iter()
        .map(|(month, appointments)| MonthlyCount {
            month,
            appointments,
        })
        .collect()
}

pub fn total_revenue(rows: &[AnalyticsRow]) -> Decimal {
    rows.iter()
        .filter(|r| r.status == AppointmentStatus::Completed)
        .map(|r| r.price)
        .sum()
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use time::Date;

    use super::*;
    use AppointmentStatus::*;

    fn row(
        status: AppointmentStatus,
        appointment_date: Date,
        service_id: i32,
        service_name: &str,
        price: Decimal,
    ) -> AnalyticsRow {
        AnalyticsRow {
            status,
            appointment_date,
            service_id,
            service_name: service_name.into(),
            price,
        }
    }

    fn sample() -> Vec<AnalyticsRow> {
        let cleaning = Decimal::new(120000, 2); // 1200.00
        let checkup = Decimal::new(50000, 2); // 500.00
        vec![
            row(Completed, date!(2025 - 01 - 10), 1, "Teeth Cleaning", cleaning),
            row(Completed, date!(2025 - 01 - 24), 1, "Teeth Cleaning", cleaning),
            row(Cancelled, date!(2025 - 02 - 01), 1, "Teeth Cleaning", cleaning),
            row(Scheduled, date!(2025 - 02 - 14), 2, "Dental Checkup", checkup),
            row(Confirmed, date!(2025 - 02 - 20), 2, "Dental Checkup", checkup),
        ]
    }

    #[test]
    fn totals_match_row_counts() {
        let totals = status_totals(&sample());
        assert_eq!(
            totals,
            StatusTotals {
                scheduled: 1,
                confirmed: 1,
                completed: 2,
                cancelled: 1,
                total: 5,
            }
        );
        assert_eq!(
            totals.scheduled + totals.confirmed + totals.completed + totals.cancelled,
            totals.total
        );
    }

    #[test]
    fn revenue_counts_completed_only() {
        assert_eq!(total_revenue(&sample()), Decimal::new(240000, 2));
        assert_eq!(total_revenue(&[]), Decimal::ZERO);
    }

    #[test]
    fn services_sorted_by_volume() {
        let breakdown = service_breakdown(&sample());
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].service_name, "Teeth Cleaning");
        assert_eq!(breakdown[0].appointments, 3);
        // The cancelled cleaning contributes no revenue.
        assert_eq!(breakdown[0].revenue, Decimal::new(240000, 2));
        assert_eq!(breakdown[1].appointments, 2);
        assert_eq!(breakdown[1].revenue, Decimal::ZERO);
    }

    #[test]
    fn months_are_chronological() {
        let months = monthly_breakdown(&sample());
        assert_eq!(
            months,
            vec![
                MonthlyCount {
                    month: "2025-01".into(),
                    appointments: 2
                },
                MonthlyCount {
                    month: "2025-02".into(),
                    appointments: 3
                },
            ]
        );
    }
}
