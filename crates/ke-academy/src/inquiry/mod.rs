//! Contact-form intake: validation rules, the submission flow state machine,
//! and the email hand-off behind `POST /api/contact`.
//!
//! The validation rules used to be written twice (browser widget and API
//! route) and had drifted apart; `validator` is now the single source of
//! truth, with a [`ValidationPolicy`] selecting the pre-flight or the
//! authoritative flavor of the two spots where they disagreed.

pub mod countries;
pub mod domain;
pub mod flow;
pub mod mailer;
pub mod router;
pub mod service;
pub mod validator;

pub use countries::{detect_country, dial_code_for, rule_for, CountryPhoneRule};
pub use domain::{
    ContactEmail, FieldError, FieldIssue, InquiryField, InquirySubmission, IssueKind,
    ValidationReport,
};
pub use flow::{FlowError, SubmissionFlow, SubmissionState};
pub use mailer::{ContactMailer, MailerError};
pub use router::inquiry_router;
pub use service::{InquiryService, InquiryServiceError};
pub use validator::{validate, MessageCatalog, PhoneFallback, ValidationPolicy};
