use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use chrono_tz::Tz;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub contact: ContactConfig,
    pub schedule: ScheduleConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let contact = ContactConfig {
            recipient: env::var("CONTACT_RECIPIENT")
                .unwrap_or_else(|_| "info@keacademy.com".to_string()),
            sender: env::var("CONTACT_SENDER")
                .unwrap_or_else(|_| "KE Academy Website <no-reply@keacademy.com>".to_string()),
            public_email: env::var("CONTACT_PUBLIC_EMAIL")
                .unwrap_or_else(|_| "info@keacademy.com".to_string()),
            public_phone: env::var("CONTACT_PUBLIC_PHONE")
                .unwrap_or_else(|_| "+61 2 1234 5678".to_string()),
        };

        let timezone_name =
            env::var("APP_TIMEZONE").unwrap_or_else(|_| "Australia/Sydney".to_string());
        let timezone = timezone_name
            .parse::<Tz>()
            .map_err(|_| ConfigError::InvalidTimezone {
                value: timezone_name,
            })?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            contact,
            schedule: ScheduleConfig {
                reference_timezone: timezone,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where inquiry emails go and how the academy is reachable.
///
/// The website used to keep these as module-level constants; they are plain
/// configuration and load once at startup.
#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub recipient: String,
    pub sender: String,
    pub public_email: String,
    pub public_phone: String,
}

/// Calendar settings for the timetable viewer.
///
/// Every deployment pins a single reference timezone so "today" highlighting
/// is identical for viewers anywhere in the world.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleConfig {
    pub reference_timezone: Tz,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimezone { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimezone { value } => {
                write!(f, "APP_TIMEZONE '{}' is not a known IANA timezone", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTimezone { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_TIMEZONE");
        env::remove_var("CONTACT_RECIPIENT");
        env::remove_var("CONTACT_SENDER");
        env::remove_var("CONTACT_PUBLIC_EMAIL");
        env::remove_var("CONTACT_PUBLIC_PHONE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.contact.recipient, "info@keacademy.com");
        assert_eq!(
            config.schedule.reference_timezone,
            chrono_tz::Australia::Sydney
        );
    }

    #[test]
    fn rejects_unknown_timezone() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_TIMEZONE", "Mars/Olympus_Mons");
        let error = AppConfig::load().expect_err("unknown timezone rejected");
        assert!(matches!(error, ConfigError::InvalidTimezone { .. }));
        reset_env();
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }
}
