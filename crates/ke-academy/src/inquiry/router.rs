use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use super::domain::InquirySubmission;
use super::mailer::ContactMailer;
use super::service::{InquiryService, InquiryServiceError};

/// Router builder exposing the contact endpoint.
pub fn inquiry_router<M>(service: Arc<InquiryService<M>>) -> Router
where
    M: ContactMailer + 'static,
{
    Router::new()
        .route("/api/contact", post(contact_handler::<M>))
        .with_state(service)
}

pub(crate) async fn contact_handler<M>(
    State(service): State<Arc<InquiryService<M>>>,
    payload: Result<Json<InquirySubmission>, JsonRejection>,
) -> Response
where
    M: ContactMailer + 'static,
{
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(%rejection, "rejected malformed contact payload");
            let body = json!({
                "success": false,
                "error": "Invalid JSON body",
            });
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    match service.submit(submission) {
        Ok(()) => {
            let body = json!({
                "success": true,
                "message": "Your inquiry has been sent successfully.",
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(InquiryServiceError::Validation(errors)) => {
            let body = json!({
                "success": false,
                "error": "Validation failed",
                "errors": errors,
            });
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
        Err(InquiryServiceError::Mailer(error)) => {
            // Full detail stays in the logs; the client only sees a generic
            // failure message.
            tracing::error!(%error, "contact email delivery failed");
            let body = json!({
                "success": false,
                "error": "Failed to send your message. Please try again later.",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
