use chrono::NaiveDate;
use ke_academy::config::ContactConfig;
use ke_academy::inquiry::mailer::{subject, text_body};
use ke_academy::inquiry::{ContactEmail, ContactMailer, MailerError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Mailer used until an SMTP relay is provisioned: writes the rendered
/// notification to the service log instead of delivering it.
pub(crate) struct ConsoleMailer {
    recipient: String,
    sender: String,
}

impl ConsoleMailer {
    pub(crate) fn new(contact: &ContactConfig) -> Self {
        Self {
            recipient: contact.recipient.clone(),
            sender: contact.sender.clone(),
        }
    }
}

impl ContactMailer for ConsoleMailer {
    fn send(&self, email: &ContactEmail) -> Result<(), MailerError> {
        tracing::info!(
            recipient = %self.recipient,
            sender = %self.sender,
            subject = %subject(),
            from_name = %email.full_name,
            "inquiry notification logged in place of delivery"
        );
        tracing::debug!(body = %text_body(email), "inquiry notification body");
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
