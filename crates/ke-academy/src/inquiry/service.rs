use std::sync::Arc;

use chrono_tz::Tz;

use super::countries;
use super::domain::{ContactEmail, FieldError, InquirySubmission};
use super::mailer::{ContactMailer, MailerError};
use super::validator::{validate, ValidationPolicy};
use crate::schedule::navigator::ReferenceClock;

/// Authoritative intake pipeline behind `POST /api/contact`.
///
/// Validates with the server policy, normalizes the payload, stamps a
/// human-readable submission time in the reference timezone, derives the dial
/// code, and hands the result to the email collaborator.
pub struct InquiryService<M> {
    mailer: Arc<M>,
    clock: Arc<dyn ReferenceClock>,
    timezone: Tz,
    policy: ValidationPolicy,
}

#[derive(Debug, thiserror::Error)]
pub enum InquiryServiceError {
    #[error("inquiry failed validation")]
    Validation(Vec<FieldError>),
    #[error(transparent)]
    Mailer(#[from] MailerError),
}

impl<M> InquiryService<M>
where
    M: ContactMailer,
{
    pub fn new(mailer: Arc<M>, clock: Arc<dyn ReferenceClock>, timezone: Tz) -> Self {
        Self {
            mailer,
            clock,
            timezone,
            policy: ValidationPolicy::authoritative(),
        }
    }

    /// Validate and forward one submission.
    pub fn submit(&self, submission: InquirySubmission) -> Result<(), InquiryServiceError> {
        let report = validate(&submission, &self.policy);
        if !report.is_valid() {
            return Err(InquiryServiceError::Validation(report.into_field_errors()));
        }

        let email = self.contact_email(submission);
        self.mailer.send(&email)?;
        Ok(())
    }

    /// Build the normalized collaborator payload for a validated submission.
    pub fn contact_email(&self, submission: InquirySubmission) -> ContactEmail {
        let country_code = submission
            .country_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .unwrap_or(countries::DEFAULT_COUNTRY);
        // Canonicalize casing for supported countries; pass through anything
        // the fallback rule admitted.
        let country_code = countries::rule_for(country_code)
            .map(|rule| rule.code.to_string())
            .unwrap_or_else(|| country_code.to_ascii_uppercase());
        let dial_code = countries::dial_code_for(&country_code).to_string();

        ContactEmail {
            full_name: submission.full_name.trim().to_string(),
            email: submission.email.trim().to_string(),
            phone: submission.phone.trim().to_string(),
            country_code,
            dial_code,
            campus: normalize_optional(submission.campus),
            course: normalize_optional(submission.course),
            message: normalize_optional(submission.message),
            timestamp: self.timestamp(),
        }
    }

    fn timestamp(&self) -> String {
        self.clock
            .now_utc()
            .with_timezone(&self.timezone)
            .format("%A, %-d %B %Y at %-I:%M:%S %p %Z")
            .to_string()
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::navigator::FixedClock;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<ContactEmail>>,
    }

    impl ContactMailer for RecordingMailer {
        fn send(&self, email: &ContactEmail) -> Result<(), MailerError> {
            self.sent.lock().expect("mailer mutex poisoned").push(email.clone());
            Ok(())
        }
    }

    fn service(mailer: Arc<RecordingMailer>) -> InquiryService<RecordingMailer> {
        // 2026-02-17T22:15:00Z is 09:15 on the 18th in Sydney (AEDT, +11).
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 2, 17, 22, 15, 0).single().expect("valid instant"),
        ));
        InquiryService::new(mailer, clock, chrono_tz::Australia::Sydney)
    }

    fn submission() -> InquirySubmission {
        InquirySubmission {
            full_name: "  Jane Doe  ".to_string(),
            email: "jane@example.com".to_string(),
            phone: "412345678".to_string(),
            country_code: Some("au".to_string()),
            campus: None,
            course: None,
            message: Some("Hello".to_string()),
        }
    }

    #[test]
    fn submit_normalizes_and_forwards() {
        let mailer = Arc::new(RecordingMailer::default());
        service(mailer.clone()).submit(submission()).expect("valid inquiry sends");

        let sent = mailer.sent.lock().expect("mailer mutex poisoned");
        assert_eq!(sent.len(), 1);
        let email = &sent[0];
        assert_eq!(email.full_name, "Jane Doe");
        assert_eq!(email.country_code, "AU");
        assert_eq!(email.dial_code, "+61");
        assert_eq!(email.campus, None);
        assert_eq!(
            email.timestamp,
            "Wednesday, 18 February 2026 at 9:15:00 AM AEDT"
        );
    }

    #[test]
    fn submit_rejects_invalid_payload_before_mailing() {
        let mailer = Arc::new(RecordingMailer::default());
        let mut bad = submission();
        bad.email = "not-an-email".to_string();

        let error = service(mailer.clone()).submit(bad).expect_err("invalid inquiry");
        match error {
            InquiryServiceError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "Please enter a valid email address");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(mailer.sent.lock().expect("mailer mutex poisoned").is_empty());
    }

    #[test]
    fn blank_optionals_collapse_to_none() {
        let mailer = Arc::new(RecordingMailer::default());
        let svc = service(mailer);
        let mut raw = submission();
        raw.campus = Some("  ".to_string());
        raw.message = Some(" Hello ".to_string());

        let email = svc.contact_email(raw);
        assert_eq!(email.campus, None);
        assert_eq!(email.message.as_deref(), Some("Hello"));
    }
}
