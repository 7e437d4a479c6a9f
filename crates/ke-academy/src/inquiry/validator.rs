//! The shared inquiry validation rules.
//!
//! One rule set, evaluated holistically (campus/course/message depend on each
//! other), producing a field-to-message map. The same function runs before a
//! submission leaves the form and again at the trust boundary; only the
//! [`ValidationPolicy`] differs between the two call sites.

use super::countries::{self, digits_only, CountryPhoneRule};
use super::domain::{InquiryField, InquirySubmission, IssueKind, ValidationReport};

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_MESSAGE_CHARS: usize = 100;

/// What to do with a phone number whose country code is not in the table.
///
/// The browser widget historically skipped the check entirely while the API
/// route fell back to a loose digit-count window. Both behaviors are kept
/// until product picks one; the trust boundary always uses `DigitRange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneFallback {
    /// No pattern is applied for an unrecognized country (pre-flight parity).
    AcceptAny,
    /// Accept any all-digit string within the inclusive length window.
    DigitRange { min: usize, max: usize },
}

impl Default for PhoneFallback {
    fn default() -> Self {
        PhoneFallback::DigitRange { min: 6, max: 15 }
    }
}

/// User-facing message templates, configurable rather than hardcoded because
/// the two historical rule copies worded them differently.
///
/// `phone_invalid_known` may reference the country via `{country}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    pub full_name_required: String,
    pub full_name_too_long: String,
    pub email_required: String,
    pub email_invalid: String,
    pub phone_required: String,
    pub phone_invalid_known: String,
    pub phone_invalid_fallback: String,
    pub course_missing: String,
    pub campus_missing: String,
    pub message_required: String,
    pub message_too_long: String,
}

impl MessageCatalog {
    /// Wording used by the API route (the authoritative rule copy).
    pub fn authoritative() -> Self {
        Self {
            full_name_required: "Full name is required".to_string(),
            full_name_too_long: "Full name must not exceed 100 characters".to_string(),
            email_required: "Email is required".to_string(),
            email_invalid: "Please enter a valid email address".to_string(),
            phone_required: "Phone number is required".to_string(),
            phone_invalid_known: "Please enter a valid phone number".to_string(),
            phone_invalid_fallback: "Please enter a valid phone number".to_string(),
            course_missing: "Please also select a course".to_string(),
            campus_missing: "Please also select a campus".to_string(),
            message_required: "Message is required when no campus/course is selected".to_string(),
            message_too_long: "Message must not exceed 100 characters".to_string(),
        }
    }

    /// Wording used by the form widget, which names the country dynamically.
    pub fn preflight() -> Self {
        Self {
            email_invalid: "Please enter a valid email".to_string(),
            phone_invalid_known: "Please enter a valid {country} phone number".to_string(),
            message_required: "Message is required when no campus/course selected".to_string(),
            ..Self::authoritative()
        }
    }

    fn phone_invalid_for(&self, rule: &CountryPhoneRule) -> String {
        self.phone_invalid_known.replace("{country}", rule.name)
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::authoritative()
    }
}

/// The knobs distinguishing the two places the rule set runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub phone_fallback: PhoneFallback,
    pub messages: MessageCatalog,
}

impl ValidationPolicy {
    /// Server-side policy: loose digit-range fallback, API wording.
    pub fn authoritative() -> Self {
        Self {
            phone_fallback: PhoneFallback::default(),
            messages: MessageCatalog::authoritative(),
        }
    }

    /// Client-parity policy: no fallback pattern, widget wording.
    pub fn preflight() -> Self {
        Self {
            phone_fallback: PhoneFallback::AcceptAny,
            messages: MessageCatalog::preflight(),
        }
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::authoritative()
    }
}

/// Validate a candidate submission against the full rule set.
///
/// Always returns a complete report; never fails. Calling it twice on the
/// same input yields the same report.
pub fn validate(submission: &InquirySubmission, policy: &ValidationPolicy) -> ValidationReport {
    let messages = &policy.messages;
    let mut report = ValidationReport::default();

    let full_name = submission.full_name.trim();
    if full_name.is_empty() {
        report.flag(
            InquiryField::FullName,
            IssueKind::Required,
            messages.full_name_required.clone(),
        );
    } else if full_name.chars().count() > MAX_NAME_CHARS {
        report.flag(
            InquiryField::FullName,
            IssueKind::TooLong,
            messages.full_name_too_long.clone(),
        );
    }

    if submission.email.trim().is_empty() {
        report.flag(
            InquiryField::Email,
            IssueKind::Required,
            messages.email_required.clone(),
        );
    } else if !permissive_email_shape(&submission.email) {
        report.flag(
            InquiryField::Email,
            IssueKind::InvalidFormat,
            messages.email_invalid.clone(),
        );
    }

    if submission.phone.trim().is_empty() {
        report.flag(
            InquiryField::Phone,
            IssueKind::Required,
            messages.phone_required.clone(),
        );
    } else {
        let code = submission
            .country_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .unwrap_or(countries::DEFAULT_COUNTRY);

        match countries::rule_for(code) {
            Some(rule) => {
                if !rule.matches(&submission.phone) {
                    report.flag(
                        InquiryField::Phone,
                        IssueKind::InvalidFormat,
                        messages.phone_invalid_for(rule),
                    );
                }
            }
            None => match policy.phone_fallback {
                PhoneFallback::AcceptAny => {}
                PhoneFallback::DigitRange { min, max } => {
                    let len = submission.phone.len();
                    if !digits_only(&submission.phone) || len < min || len > max {
                        report.flag(
                            InquiryField::Phone,
                            IssueKind::InvalidFormat,
                            messages.phone_invalid_fallback.clone(),
                        );
                    }
                }
            },
        }
    }

    let has_campus = submission.has_campus();
    let has_course = submission.has_course();

    if has_campus && !has_course {
        report.flag(
            InquiryField::Course,
            IssueKind::CrossFieldMissing,
            messages.course_missing.clone(),
        );
    }
    if has_course && !has_campus {
        report.flag(
            InquiryField::Campus,
            IssueKind::CrossFieldMissing,
            messages.campus_missing.clone(),
        );
    }

    let message = submission.message.as_deref().unwrap_or_default();
    if !has_campus && !has_course && message.trim().is_empty() {
        report.flag(
            InquiryField::Message,
            IssueKind::Required,
            messages.message_required.clone(),
        );
    }
    // The form truncates input at 100 characters, so this branch is normally
    // unreachable from the browser; the trust boundary still enforces it.
    if message.chars().count() > MAX_MESSAGE_CHARS {
        report.flag(
            InquiryField::Message,
            IssueKind::TooLong,
            messages.message_too_long.clone(),
        );
    }

    report
}

/// The deliberately permissive `local@domain.tld` shape check: exactly one
/// `@`, no whitespace, and a dot with non-empty neighbors in the domain.
/// Not RFC 5322; it accepts some invalid and rejects some valid addresses.
fn permissive_email_shape(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.chars().any(char::is_whitespace) {
        return false;
    }

    let chars: Vec<char> = domain.chars().collect();
    chars.len() >= 3 && chars[1..chars.len() - 1].contains(&'.')
}
