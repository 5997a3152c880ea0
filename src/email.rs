//! Transactional email delivery over async SMTP.
//!
//! The clinic only sends two kinds of mail: a booking confirmation right
//! after an appointment is created and a staff-triggered reminder. Both are
//! rendered as multipart text+HTML from the appointment's contact snapshot,
//! so no user join is needed at send time.

use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use time::macros::format_description;
use time::{Date, Time};
use tracing::info;

use crate::appointments::repo::Appointment;
use crate::config::{ClinicConfig, SmtpConfig};
use crate::services::repo::Service;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("email build error: {0}")]
    Build(String),
}

pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    clinic: ClinicConfig,
}

impl Mailer {
    pub fn new(smtp: &SmtpConfig, clinic: ClinicConfig) -> Result<Self, EmailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)?.port(smtp.port);

        if let (Some(user), Some(pass)) = (&smtp.user, &smtp.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let from: Mailbox = format!("{} <{}>", clinic.name, smtp.from_address).parse()?;

        Ok(Self {
            transport: builder.build(),
            from,
            clinic,
        })
    }

    pub async fn send_appointment_confirmation(
        &self,
        appointment: &Appointment,
        service: &Service,
    ) -> Result<(), EmailError> {
        let (subject, text, html) = confirmation_content(&self.clinic, appointment, service);
        self.send(&appointment.patient_email, subject, text, html)
            .await
    }

    pub async fn send_appointment_reminder(
        &self,
        appointment: &Appointment,
        service: &Service,
    ) -> Result<(), EmailError> {
        let (subject, text, html) = reminder_content(&self.clinic, appointment, service);
        self.send(&appointment.patient_email, subject, text, html)
            .await
    }

    async fn send(
        &self,
        to: &str,
        subject: String,
        text: String,
        html: String,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject.clone())
            .multipart(MultiPart::alternative_plain_html(text, html))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        self.transport.send(email).await?;
        info!(to, subject = %subject, "email sent");
        Ok(())
    }
}

/// "Friday, 14 March 2025"
pub(crate) fn format_date(date: Date) -> String {
    let fmt = format_description!("[weekday], [day padding:none] [month repr:long] [year]");
    date.format(&fmt).unwrap_or_else(|_| date.to_string())
}

/// "9:30 AM"
pub(crate) fn format_time(t: Time) -> String {
    let fmt = format_description!("[hour repr:12 padding:none]:[minute] [period]");
    t.format(&fmt).unwrap_or_else(|_| t.to_string())
}

fn details_block(appointment: &Appointment, service: &Service) -> String {
    format!(
        "- Service: {}\n- Date: {}\n- Time: {}\n- Duration: {} minutes\n- Price: \u{20b9}{}\n- Status: {}",
        service.name,
        format_date(appointment.appointment_date),
        format_time(appointment.appointment_time),
        service.duration_minutes,
        service.price,
        appointment.status,
    )
}

fn details_html(appointment: &Appointment, service: &Service) -> String {
    format!(
        "<p><strong>Service:</strong> {}</p>\
         <p><strong>Date:</strong> {}</p>\
         <p><strong>Time:</strong> {}</p>\
         <p><strong>Duration:</strong> {} minutes</p>\
         <p><strong>Price:</strong> \u{20b9}{}</p>\
         <p><strong>Status:</strong> {}</p>",
        service.name,
        format_date(appointment.appointment_date),
        format_time(appointment.appointment_time),
        service.duration_minutes,
        service.price,
        appointment.status,
    )
}

fn confirmation_content(
    clinic: &ClinicConfig,
    appointment: &Appointment,
    service: &Service,
) -> (String, String, String) {
    let date = format_date(appointment.appointment_date);
    let time = format_time(appointment.appointment_time);
    let subject = format!("Appointment Confirmed - {} at {}", date, time);

    let text = format!(
        "{name} - Appointment Confirmation\n\n\
         Hello {patient},\n\n\
         Your appointment has been successfully scheduled.\n\n\
         Appointment Details:\n{details}\n\n\
         Important Information:\n\
         - Please arrive 15 minutes before your appointment time\n\
         - Bring a valid ID and any previous medical records\n\
         - If you need to reschedule, please contact us at least 24 hours in advance\n\n\
         Contact: {phone} | {email}\n\n\
         Thank you for choosing {name}!",
        name = clinic.name,
        patient = appointment.patient_name,
        details = details_block(appointment, service),
        phone = clinic.phone,
        email = clinic.email,
    );

    let html = format!(
        "<html><body>\
         <h1>{name}</h1><p>Appointment Confirmation</p>\
         <h2>Hello {patient},</h2>\
         <p>Your appointment has been successfully scheduled. Here are the details:</p>\
         <h3>Appointment Details</h3>{details}\
         <h3>Important Information</h3><ul>\
         <li>Please arrive 15 minutes before your appointment time</li>\
         <li>Bring a valid ID and any previous medical records</li>\
         <li>If you need to reschedule, please contact us at least 24 hours in advance</li>\
         </ul>\
         <h3>Contact Information</h3>\
         <p>{address}</p><p>{phone}</p><p>{email}</p>\
         <p>Thank you for choosing {name}. This is an automated confirmation email.</p>\
         </body></html>",
        name = clinic.name,
        patient = appointment.patient_name,
        details = details_html(appointment, service),
        address = clinic.address,
        phone = clinic.phone,
        email = clinic.email,
    );

    (subject, text, html)
}

fn reminder_content(
    clinic: &ClinicConfig,
    appointment: &Appointment,
    service: &Service,
) -> (String, String, String) {
    let date = format_date(appointment.appointment_date);
    let time = format_time(appointment.appointment_time);
    let subject = format!("Reminder: your appointment on {} at {}", date, time);

    let text = format!(
        "{name} - Appointment Reminder\n\n\
         Hello {patient},\n\n\
         This is a friendly reminder about your upcoming appointment:\n\n\
         {details}\n\n\
         Please remember to arrive 15 minutes early and bring any necessary documents.\n\
         If you need to reschedule, please contact us immediately at {phone}.\n\n\
         {name} | {email}",
        name = clinic.name,
        patient = appointment.patient_name,
        details = details_block(appointment, service),
        phone = clinic.phone,
        email = clinic.email,
    );

    let html = format!(
        "<html><body>\
         <h1>{name}</h1><p>Appointment Reminder</p>\
         <h2>Hello {patient},</h2>\
         <p>This is a friendly reminder about your upcoming appointment:</p>\
         {details}\
         <p>Please remember to arrive 15 minutes early and bring any necessary documents.</p>\
         <p>If you need to reschedule, please contact us immediately at {phone}.</p>\
         <p>{name} | {email} | {phone}</p>\
         </body></html>",
        name = clinic.name,
        patient = appointment.patient_name,
        details = details_html(appointment, service),
        phone = clinic.phone,
        email = clinic.email,
    );

    (subject, text, html)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use time::macros::{date, time};
    use time::OffsetDateTime;

    use super::*;
    use crate::appointments::repo::AppointmentStatus;
    use crate::config::SmtpConfig;

    fn clinic() -> ClinicConfig {
        ClinicConfig {
            name: "Test Dental".into(),
            address: "1 Test Lane".into(),
            phone: "+91 00000 00000".into(),
            email: "contact@test.dental".into(),
            default_doctor_id: None,
        }
    }

    fn service() -> Service {
        Service {
            id: 1,
            name: "Teeth Cleaning".into(),
            description: None,
            duration_minutes: 45,
            price: Decimal::new(120000, 2),
            is_active: true,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn appointment() -> Appointment {
        Appointment {
            id: 7,
            patient_id: Some(3),
            service_id: 1,
            doctor_id: None,
            appointment_date: date!(2025 - 03 - 14),
            appointment_time: time!(9:30),
            status: AppointmentStatus::Scheduled,
            notes: None,
            patient_name: "Asha Rao".into(),
            patient_email: "asha@example.com".into(),
            patient_phone: "+91 11111 11111".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn smtp_config_absent_without_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(SmtpConfig::from_env().is_none());
    }

    #[test]
    fn date_and_time_formatting() {
        assert_eq!(format_date(date!(2025 - 03 - 14)), "Friday, 14 March 2025");
        assert_eq!(format_time(time!(9:30)), "9:30 AM");
        assert_eq!(format_time(time!(14:00)), "2:00 PM");
    }

    #[test]
    fn confirmation_mentions_service_and_clinic() {
        let (subject, text, html) = confirmation_content(&clinic(), &appointment(), &service());
        assert_eq!(subject, "Appointment Confirmed - Friday, 14 March 2025 at 9:30 AM");
        assert!(text.contains("Teeth Cleaning"));
        assert!(text.contains("Asha Rao"));
        assert!(text.contains("+91 00000 00000"));
        assert!(html.contains("Teeth Cleaning"));
        assert!(html.contains("scheduled"));
    }

    #[test]
    fn reminder_subject_carries_schedule() {
        let (subject, text, _) = reminder_content(&clinic(), &appointment(), &service());
        assert!(subject.starts_with("Reminder: your appointment on Friday, 14 March 2025"));
        assert!(text.contains("45 minutes"));
    }

    #[test]
    fn email_error_display() {
        let err = EmailError::Build("missing body".into());
        assert_eq!(err.to_string(), "email build error: missing body");
    }
}
