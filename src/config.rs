use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// SMTP settings for the transactional mailer. Optional: when `SMTP_HOST`
/// is not set, email delivery is disabled and bookings proceed without it.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub from_address: String,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl SmtpConfig {
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            host,
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(587),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| "noreply@dentalcare.local".into()),
            user: std::env::var("SMTP_USER").ok(),
            password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

/// Clinic identity used in emails and appointment defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ClinicConfig {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Doctor assigned to public bookings that don't pick one.
    pub default_doctor_id: Option<Uuid>,
}

impl ClinicConfig {
    pub fn from_env() -> Self {
        Self {
            name: std::env::var("CLINIC_NAME").unwrap_or_else(|_| "Dr. Anjali Dental Care".into()),
            address: std::env::var("CLINIC_ADDRESS")
                .unwrap_or_else(|_| "123 Main Street, City Name, 123456".into()),
            phone: std::env::var("CLINIC_PHONE").unwrap_or_else(|_| "+91 98765 43210".into()),
            email: std::env::var("CLINIC_EMAIL")
                .unwrap_or_else(|_| "contact@dranjalidental.clinic".into()),
            default_doctor_id: std::env::var("DEFAULT_DOCTOR_ID")
                .ok()
                .and_then(|v| v.parse::<Uuid>().ok()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub smtp: Option<SmtpConfig>,
    pub clinic: ClinicConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "dentalcare".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "dentalcare-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        Ok(Self {
            database_url,
            jwt,
            smtp: SmtpConfig::from_env(),
            clinic: ClinicConfig::from_env(),
        })
    }
}
