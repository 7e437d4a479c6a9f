//! The email collaborator contract and the notification body renderers.
//!
//! Transport is deliberately out of scope here: the service only promises to
//! hand a fully validated, normalized [`ContactEmail`] to whatever implements
//! [`ContactMailer`] and to translate failures into the opaque 500 response.

use super::domain::ContactEmail;

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("mail transport rejected the message: {0}")]
    Transport(String),
    #[error("mailer is not configured")]
    NotConfigured,
}

/// Anything able to deliver an inquiry notification.
pub trait ContactMailer: Send + Sync {
    fn send(&self, email: &ContactEmail) -> Result<(), MailerError>;
}

/// Subject line for an inquiry notification.
pub fn subject() -> String {
    "[KE Academy] New Get in Touch Submission".to_string()
}

/// Plain-text body mirroring the notification layout the office is used to.
pub fn text_body(email: &ContactEmail) -> String {
    let mut lines = vec![
        "New Get in Touch Form Submission".to_string(),
        "================================".to_string(),
        String::new(),
        format!("Submission Time: {}", email.timestamp),
        String::new(),
        "CONTACT INFORMATION".to_string(),
        "--------------------".to_string(),
        format!("Full Name: {}", email.full_name),
        format!("Email: {}", email.email),
        format!("Phone: {} {}", email.dial_code, email.phone),
        String::new(),
    ];

    if email.campus.is_some() || email.course.is_some() {
        lines.push("INTEREST DETAILS".to_string());
        lines.push("----------------".to_string());
        if let Some(campus) = &email.campus {
            lines.push(format!("Campus: {campus}"));
        }
        if let Some(course) = &email.course {
            lines.push(format!("Course: {course}"));
        }
        lines.push(String::new());
    }

    if let Some(message) = &email.message {
        lines.push("MESSAGE".to_string());
        lines.push("-------".to_string());
        lines.push(message.clone());
        lines.push(String::new());
    }

    lines.push("================================".to_string());
    lines.push("This email was sent from the KE Academy website contact form.".to_string());

    lines.join("\n")
}

/// HTML body. Field values are entity-escaped; everything else is ours.
pub fn html_body(email: &ContactEmail) -> String {
    let mut sections = String::new();

    sections.push_str(&format!(
        "<div class=\"section\"><div class=\"section-title\">Contact Information</div>\
         <div class=\"field\"><span class=\"field-label\">Full Name:</span> {}</div>\
         <div class=\"field\"><span class=\"field-label\">Email:</span> \
         <a href=\"mailto:{email_href}\">{email_text}</a></div>\
         <div class=\"field\"><span class=\"field-label\">Phone:</span> {} {}</div></div>",
        escape_html(&email.full_name),
        escape_html(&email.dial_code),
        escape_html(&email.phone),
        email_href = escape_html(&email.email),
        email_text = escape_html(&email.email),
    ));

    if email.campus.is_some() || email.course.is_some() {
        sections.push_str("<div class=\"section\"><div class=\"section-title\">Interest Details</div>");
        if let Some(campus) = &email.campus {
            sections.push_str(&format!(
                "<div class=\"field\"><span class=\"field-label\">Campus:</span> {}</div>",
                escape_html(campus)
            ));
        }
        if let Some(course) = &email.course {
            sections.push_str(&format!(
                "<div class=\"field\"><span class=\"field-label\">Course:</span> {}</div>",
                escape_html(course)
            ));
        }
        sections.push_str("</div>");
    }

    if let Some(message) = &email.message {
        sections.push_str(&format!(
            "<div class=\"section\"><div class=\"section-title\">Message</div>\
             <div class=\"message-box\">{}</div></div>",
            escape_html(message)
        ));
    }

    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"></head><body>\
         <div class=\"container\">\
         <div class=\"header\"><h1>New Contact Form Submission</h1>\
         <p>Someone has reached out through the KE Academy website</p></div>\
         <div class=\"content\">\
         <div class=\"timestamp\">Submitted on: <strong>{}</strong></div>\
         {sections}\
         <div class=\"footer\">This email was sent from the KE Academy website \
         contact form.<br>You can reply directly to this email to respond to \
         the sender.</div>\
         </div></div></body></html>",
        escape_html(&email.timestamp),
    )
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
