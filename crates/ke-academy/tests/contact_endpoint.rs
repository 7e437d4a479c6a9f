//! End-to-end tests for the contact intake endpoint: request parsing,
//! authoritative validation, email hand-off, and failure mapping.

use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use ke_academy::inquiry::{
    inquiry_router, ContactEmail, ContactMailer, InquiryService, MailerError,
};
use ke_academy::schedule::FixedClock;

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<ContactEmail>>,
}

impl ContactMailer for RecordingMailer {
    fn send(&self, email: &ContactEmail) -> Result<(), MailerError> {
        self.sent
            .lock()
            .expect("mailer mutex poisoned")
            .push(email.clone());
        Ok(())
    }
}

struct FailingMailer;

impl ContactMailer for FailingMailer {
    fn send(&self, _email: &ContactEmail) -> Result<(), MailerError> {
        Err(MailerError::Transport("smtp connection refused".to_string()))
    }
}

fn router_with<M: ContactMailer + 'static>(mailer: Arc<M>) -> Router {
    // 22:15 UTC on the 17th is 09:15 on the 18th in Sydney (AEDT).
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 2, 17, 22, 15, 0)
            .single()
            .expect("valid instant"),
    ));
    let service = Arc::new(InquiryService::new(
        mailer,
        clock,
        chrono_tz::Australia::Sydney,
    ));
    inquiry_router(service)
}

async fn post_contact(router: Router, body: String) -> (StatusCode, Value) {
    let request = Request::post("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request");
    let response = router.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

fn valid_payload() -> Value {
    json!({
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "phone": "412345678",
        "countryCode": "AU",
        "campus": "KE Castle Hill",
        "course": "Mathematics",
    })
}

#[tokio::test]
async fn valid_inquiry_is_accepted_and_mailed() {
    let mailer = Arc::new(RecordingMailer::default());
    let (status, body) = post_contact(router_with(mailer.clone()), valid_payload().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Your inquiry has been sent successfully.");

    let sent = mailer.sent.lock().expect("mailer mutex poisoned");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].full_name, "Jane Doe");
    assert_eq!(sent[0].dial_code, "+61");
    assert_eq!(sent[0].phone, "412345678");
    assert_eq!(
        sent[0].timestamp,
        "Wednesday, 18 February 2026 at 9:15:00 AM AEDT"
    );
}

#[tokio::test]
async fn missing_fields_are_reported_per_field() {
    let mailer = Arc::new(RecordingMailer::default());
    let (status, body) = post_contact(router_with(mailer.clone()), json!({}).to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Validation failed");

    let errors = body["errors"].as_array().expect("errors array");
    let fields: Vec<_> = errors.iter().map(|e| e["field"].as_str().unwrap()).collect();
    assert_eq!(fields, ["fullName", "email", "phone", "message"]);
    let messages: Vec<_> = errors
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert!(messages.contains(&"Full name is required"));
    assert!(messages.contains(&"Message is required when no campus/course is selected"));

    assert!(mailer.sent.lock().expect("mailer mutex poisoned").is_empty());
}

#[tokio::test]
async fn formatted_phone_with_spaces_is_rejected() {
    let mut payload = valid_payload();
    payload["phone"] = serde_json::json!("412 345 678");
    let mailer = Arc::new(RecordingMailer::default());
    let (status, body) = post_contact(router_with(mailer.clone()), payload.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "phone");
    assert_eq!(errors[0]["message"], "Please enter a valid phone number");
    assert!(mailer.sent.lock().expect("mailer mutex poisoned").is_empty());
}

#[tokio::test]
async fn partial_campus_course_pair_is_rejected() {
    let mut payload = valid_payload();
    payload["course"] = Value::Null;
    let mailer = Arc::new(RecordingMailer::default());
    let (status, body) = post_contact(router_with(mailer), payload.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "course");
    assert_eq!(errors[0]["message"], "Please also select a course");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let mailer = Arc::new(RecordingMailer::default());
    let (status, body) =
        post_contact(router_with(mailer), "{\"fullName\": ".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid JSON body");
}

#[tokio::test]
async fn mailer_failure_maps_to_a_generic_500() {
    let (status, body) =
        post_contact(router_with(Arc::new(FailingMailer)), valid_payload().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "Failed to send your message. Please try again later."
    );
}
