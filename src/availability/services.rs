//! Slot arithmetic for the booking calendar.
//!
//! All math happens in minutes since midnight so windows never wrap across
//! a day boundary. A candidate slot occupies `[start, start + slot_minutes)`
//! and survives only if it fits inside its window and touches no busy
//! interval.

use time::Time;

use crate::appointments::repo::BookedSlot;

use super::repo::{Availability, BlockedSlot};

/// Half-open occupied interval, minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyInterval {
    pub start: i32,
    pub end: i32,
}

fn minutes(t: Time) -> i32 {
    t.hour() as i32 * 60 + t.minute() as i32
}

fn time_from_minutes(m: i32) -> Option<Time> {
    if !(0..24 * 60).contains(&m) {
        return None;
    }
    Time::from_hms((m / 60) as u8, (m % 60) as u8, 0).ok()
}

fn overlaps(a: BusyInterval, b: BusyInterval) -> bool {
    a.start < b.end && b.start < a.end
}

pub fn busy_from_blocked(blocked: &[BlockedSlot]) -> Vec<BusyInterval> {
    blocked
        .iter()
        .map(|b| BusyInterval {
            start: minutes(b.start_time),
            end: minutes(b.end_time),
        })
        .collect()
}

pub fn busy_from_booked(booked: &[BookedSlot]) -> Vec<BusyInterval> {
    booked
        .iter()
        .map(|b| {
            let start = minutes(b.appointment_time);
            BusyInterval {
                start,
                end: start + b.duration_minutes,
            }
        })
        .collect()
}

/// Expands every window into candidate starts (stepped by slot + break) and
/// drops those colliding with a busy interval. Result is sorted and deduped
/// across overlapping windows.
pub fn free_slots(windows: &[Availability], busy: &[BusyInterval]) -> Vec<Time> {
    let mut out: Vec<Time> = Vec::new();

    for window in windows.iter().filter(|w| w.is_active && w.slot_minutes > 0) {
        let end = minutes(window.end_time);
        let step = window.slot_minutes + window.break_minutes.max(0);
        let mut start = minutes(window.start_time);

        while start + window.slot_minutes <= end {
            let candidate = BusyInterval {
                start,
                end: start + window.slot_minutes,
            };
            if !busy.iter().any(|b| overlaps(candidate, *b)) {
                if let Some(t) = time_from_minutes(start) {
                    out.push(t);
                }
            }
            start += step;
        }
    }

    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use time::macros::time;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;

    fn window(start: Time, end: Time, slot: i32, brk: i32) -> Availability {
        Availability {
            id: 1,
            doctor_id: Uuid::nil(),
            day_of_week: 1,
            start_time: start,
            end_time: end,
            slot_minutes: slot,
            break_minutes: brk,
            is_active: true,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn busy(start: i32, end: i32) -> BusyInterval {
        BusyInterval { start, end }
    }

    #[test]
    fn empty_day_yields_full_grid() {
        let slots = free_slots(&[window(time!(9:00), time!(11:00), 30, 0)], &[]);
        assert_eq!(
            slots,
            vec![time!(9:00), time!(9:30), time!(10:00), time!(10:30)]
        );
    }

    #[test]
    fn break_between_slots_widens_the_step() {
        let slots = free_slots(&[window(time!(9:00), time!(10:30), 30, 15)], &[]);
        assert_eq!(slots, vec![time!(9:00), time!(9:45)]);
    }

    #[test]
    fn last_slot_must_fit_inside_the_window() {
        let slots = free_slots(&[window(time!(9:00), time!(9:50), 30, 0)], &[]);
        assert_eq!(slots, vec![time!(9:00)]);
    }

    #[test]
    fn blocked_interval_removes_overlapping_slots() {
        let blocked = vec![busy(9 * 60 + 15, 9 * 60 + 45)];
        let slots = free_slots(&[window(time!(9:00), time!(11:00), 30, 0)], &blocked);
        assert_eq!(slots, vec![time!(10:00), time!(10:30)]);
    }

    #[test]
    fn long_appointment_occupies_its_service_duration() {
        // A 60-minute treatment starting 9:30 blocks the 9:30 and 10:00 slots.
        let booked = busy_from_booked(&[BookedSlot {
            appointment_time: time!(9:30),
            duration_minutes: 60,
        }]);
        let slots = free_slots(&[window(time!(9:00), time!(11:30), 30, 0)], &booked);
        assert_eq!(slots, vec![time!(9:00), time!(10:30), time!(11:00)]);
    }

    #[test]
    fn adjacent_busy_interval_does_not_block() {
        // Half-open intervals: booking ending 9:30 leaves the 9:30 slot free.
        let slots = free_slots(
            &[window(time!(9:00), time!(10:00), 30, 0)],
            &[busy(9 * 60, 9 * 60 + 30)],
        );
        assert_eq!(slots, vec![time!(9:30)]);
    }

    #[test]
    fn overlapping_windows_dedupe() {
        let slots = free_slots(
            &[
                window(time!(9:00), time!(10:00), 30, 0),
                window(time!(9:30), time!(10:30), 30, 0),
            ],
            &[],
        );
        assert_eq!(slots, vec![time!(9:00), time!(9:30), time!(10:00)]);
    }

    #[test]
    fn inactive_or_degenerate_windows_are_ignored() {
        let mut inactive = window(time!(9:00), time!(10:00), 30, 0);
        inactive.is_active = false;
        let zero_slot = window(time!(9:00), time!(10:00), 0, 0);
        assert!(free_slots(&[inactive, zero_slot], &[]).is_empty());
    }
}
