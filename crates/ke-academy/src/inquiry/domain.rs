use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A candidate contact-form submission, possibly partially filled.
///
/// Field names mirror the JSON payload the site posts to `/api/contact`.
/// Every field is optional at the wire level; the validator decides what a
/// complete submission looks like.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquirySubmission {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub campus: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl InquirySubmission {
    pub(crate) fn has_campus(&self) -> bool {
        self.campus.as_deref().is_some_and(|v| !v.trim().is_empty())
    }

    pub(crate) fn has_course(&self) -> bool {
        self.course.as_deref().is_some_and(|v| !v.trim().is_empty())
    }
}

/// The fields a validation error can attach to, in payload form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InquiryField {
    FullName,
    Email,
    Phone,
    Campus,
    Course,
    Message,
}

impl InquiryField {
    pub const fn payload_name(self) -> &'static str {
        match self {
            InquiryField::FullName => "fullName",
            InquiryField::Email => "email",
            InquiryField::Phone => "phone",
            InquiryField::Campus => "campus",
            InquiryField::Course => "course",
            InquiryField::Message => "message",
        }
    }
}

/// Why a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Required,
    InvalidFormat,
    TooLong,
    CrossFieldMissing,
}

/// A single failing rule with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub kind: IssueKind,
    pub message: String,
}

/// Payload-shaped error entry for the `400` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: InquiryField,
    pub message: String,
}

/// Complete outcome of validating one candidate submission.
///
/// Absence of a field means that field currently passes; the submission is
/// submittable iff the map is empty. Producing a report never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<InquiryField, FieldIssue>,
}

impl ValidationReport {
    pub(crate) fn flag(&mut self, field: InquiryField, kind: IssueKind, message: String) {
        self.errors.insert(field, FieldIssue { kind, message });
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn issue(&self, field: InquiryField) -> Option<&FieldIssue> {
        self.errors.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (InquiryField, &FieldIssue)> {
        self.errors.iter().map(|(field, issue)| (*field, issue))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Flatten into the `{field, message}` entries the API returns.
    pub fn into_field_errors(self) -> Vec<FieldError> {
        self.errors
            .into_iter()
            .map(|(field, issue)| FieldError {
                field,
                message: issue.message,
            })
            .collect()
    }
}

/// The fully validated, normalized payload handed to the email collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactEmail {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub country_code: String,
    pub dial_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: String,
}
