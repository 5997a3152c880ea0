use tracing::{debug, warn};

use crate::services::repo::Service;
use crate::state::AppState;

use super::repo::{Appointment, AppointmentStatus};

/// Status transition graph. Scheduled bookings can be confirmed, completed
/// directly (walk-in handled on the spot) or cancelled; confirmed ones can be
/// completed or cancelled. Completed and cancelled are terminal.
pub fn transition_allowed(from: AppointmentStatus, to: AppointmentStatus) -> bool {
    use AppointmentStatus::*;
    if from == to {
        return true;
    }
    matches!(
        (from, to),
        (Scheduled, Confirmed | Completed | Cancelled) | (Confirmed, Completed | Cancelled)
    )
}

/// Sends the booking confirmation. Never fails the caller: an unconfigured
/// mailer or a delivery error only logs.
pub async fn notify_confirmation(state: &AppState, appointment: &Appointment, service: &Service) {
    let Some(mailer) = &state.mailer else {
        debug!(appointment_id = appointment.id, "mailer disabled; skipping confirmation email");
        return;
    };
    if let Err(e) = mailer
        .send_appointment_confirmation(appointment, service)
        .await
    {
        warn!(error = %e, appointment_id = appointment.id, "confirmation email failed");
    }
}

pub async fn notify_reminder(state: &AppState, appointment: &Appointment, service: &Service) {
    let Some(mailer) = &state.mailer else {
        debug!(appointment_id = appointment.id, "mailer disabled; skipping reminder email");
        return;
    };
    if let Err(e) = mailer
        .send_appointment_reminder(appointment, service)
        .await
    {
        warn!(error = %e, appointment_id = appointment.id, "reminder email failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::*;

    #[test]
    fn scheduled_can_move_anywhere() {
        assert!(transition_allowed(Scheduled, Confirmed));
        assert!(transition_allowed(Scheduled, Completed));
        assert!(transition_allowed(Scheduled, Cancelled));
    }

    #[test]
    fn confirmed_cannot_go_back() {
        assert!(transition_allowed(Confirmed, Completed));
        assert!(transition_allowed(Confirmed, Cancelled));
        assert!(!transition_allowed(Confirmed, Scheduled));
    }

    #[test]
    fn terminal_states_are_immutable() {
        for to in [Scheduled, Confirmed] {
            assert!(!transition_allowed(Completed, to));
            assert!(!transition_allowed(Cancelled, to));
        }
        assert!(!transition_allowed(Completed, Cancelled));
        assert!(!transition_allowed(Cancelled, Completed));
    }

    #[test]
    fn self_transition_is_a_noop() {
        for s in [Scheduled, Confirmed, Completed, Cancelled] {
            assert!(transition_allowed(s, s));
        }
    }
}
