//! Contact form API handler.
//!
//! ```text
//! POST /api/v1/contact  Submit the contact form
//! ```
//!
//! The visitor's cooldown record rides in the session cookie, so the
//! handler passes the session to the use case as its key-value store.

use actix_web::{HttpRequest, HttpResponse, error::JsonPayloadError, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;
use crate::domain::contact::ContactForm;
use crate::domain::ports::{ContactSubmissionError, ContactSubmissionRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Notice returned when the body is not a readable form.
const MALFORMED_BODY_NOTICE: &str = "Please check your form inputs";

/// Contact form request body.
///
/// Missing fields read as empty so validation reports them by name.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    /// Sender's name.
    #[serde(default)]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Sender's email.
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Optional Australian phone number.
    #[serde(default)]
    #[schema(example = "0412 345 678")]
    pub phone: Option<String>,
    /// Optional company name.
    #[serde(default)]
    pub company: Option<String>,
    /// Enquiry body.
    #[serde(default)]
    #[schema(example = "We need a quote for a rail corridor upgrade.")]
    pub message: String,
    /// Hidden bot-trap field; real visitors leave it empty.
    #[serde(default)]
    pub website: Option<String>,
}

impl From<ContactRequest> for ContactSubmissionRequest {
    fn from(request: ContactRequest) -> Self {
        let ContactRequest {
            name,
            email,
            phone,
            company,
            message,
            website,
        } = request;
        Self {
            form: ContactForm {
                name,
                email,
                phone,
                company,
                message,
            },
            honeypot: website,
        }
    }
}

/// Contact form acknowledgement.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    /// Always `true`; failures use the error envelope.
    pub success: bool,
    /// Notice to show the visitor.
    #[schema(example = "Thank you for your inquiry! We'll be in touch within 24 hours.")]
    pub message: String,
}

/// Map submission failures onto the API error envelope.
fn map_submission_error(error: ContactSubmissionError) -> Error {
    let notice = error.to_string();
    match error {
        ContactSubmissionError::SuspectedBot => Error::invalid_request(notice),
        ContactSubmissionError::RateLimited(limit) => Error::too_many_requests(notice)
            .with_details(json!({ "remainingMinutes": limit.remaining_minutes() })),
        ContactSubmissionError::Invalid(validation) => {
            Error::invalid_request(notice).with_details(json!({ "fields": validation.errors() }))
        }
        ContactSubmissionError::Delivery { .. } => Error::service_unavailable(notice),
    }
}

/// JSON extractor settings that report unreadable bodies with the API
/// error envelope.
pub fn contact_json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|error: JsonPayloadError, _req: &HttpRequest| {
            debug!(%error, "contact payload rejected");
            Error::invalid_request(MALFORMED_BODY_NOTICE).into()
        })
}

/// Submit the contact form.
///
/// # Errors
///
/// - `400 Bad Request`: validation failed (`details.fields` names each
///   field) or the submission was screened out.
/// - `429 Too Many Requests`: this browser submitted within the last five
///   minutes.
/// - `503 Service Unavailable`: the relay could not take the enquiry.
#[utoipa::path(
    post,
    path = "/api/v1/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Enquiry relayed", body = ContactResponse),
        (status = 400, description = "Invalid submission", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 429, description = "Cooldown active", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Relay unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["contact"],
    operation_id = "submitContact"
)]
#[post("/contact")]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let accepted = state
        .contact
        .submit(&session, payload.into_inner().into())
        .await
        .map_err(map_submission_error)?;

    Ok(HttpResponse::Ok().json(ContactResponse {
        success: true,
        message: accepted.notice,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::cookie::Cookie;
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{
        ContactRelay, FixtureContactRelay, SUCCESS_NOTICE, UnconfiguredContactRelay,
    };
    use crate::domain::{ContactSubmissionService, ContactSubmissionSettings, ErrorCode};
    use crate::inbound::http::test_utils::test_session_middleware;
    use crate::test_support::clock::MutableClock;

    fn state(relay: Arc<dyn ContactRelay>) -> web::Data<HttpState> {
        let service = ContactSubmissionService::new(
            relay,
            ContactSubmissionSettings::default(),
            Arc::new(MutableClock::at_fixture_epoch()),
        );
        web::Data::new(HttpState::new(Arc::new(service)))
    }

    async fn app(
        relay: Arc<dyn ContactRelay>,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
        test::init_service(
            App::new()
                .app_data(state(relay))
                .app_data(contact_json_config())
                .service(
                    web::scope("/api/v1")
                        .wrap(test_session_middleware())
                        .service(submit_contact),
                ),
        )
        .await
    }

    fn valid_body() -> Value {
        json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "0412 345 678",
            "message": "We need a quote for a rail corridor upgrade.",
        })
    }

    fn post(body: &Value, cookie: Option<Cookie<'static>>) -> actix_http::Request {
        let request = test::TestRequest::post()
            .uri("/api/v1/contact")
            .set_json(body);
        match cookie {
            Some(cookie) => request.cookie(cookie).to_request(),
            None => request.to_request(),
        }
    }

    fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.into_owned())
    }

    #[actix_web::test]
    async fn accepts_valid_submission() {
        let app = app(Arc::new(FixtureContactRelay)).await;

        let res = test::call_service(&app, post(&valid_body(), None)).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(session_cookie(&res).is_some(), "cooldown cookie should be set");
        let body: ContactResponse = test::read_body_json(res).await;
        assert!(body.success);
        assert_eq!(body.message, SUCCESS_NOTICE);
    }

    #[actix_web::test]
    async fn repeat_submission_from_same_browser_is_throttled() {
        let app = app(Arc::new(FixtureContactRelay)).await;

        let first = test::call_service(&app, post(&valid_body(), None)).await;
        let cookie = session_cookie(&first).expect("session cookie");
        let second = test::call_service(&app, post(&valid_body(), Some(cookie))).await;

        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        let error: Error = test::read_body_json(second).await;
        assert_eq!(error.code(), ErrorCode::TooManyRequests);
        assert_eq!(
            error.message(),
            "Please wait 5 minutes before submitting again"
        );
        assert_eq!(error.details(), Some(&json!({ "remainingMinutes": 5 })));
    }

    #[actix_web::test]
    async fn validation_failures_list_fields() {
        let app = app(Arc::new(FixtureContactRelay)).await;
        let body = json!({ "name": "Ada", "email": "ada@gmial.com", "message": "short" });

        let res = test::call_service(&app, post(&body, None)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let error: Error = test::read_body_json(res).await;
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "Please check your email domain for typos");
        assert_eq!(
            error.details(),
            Some(&json!({
                "fields": {
                    "email": "Please check your email domain for typos",
                    "message": "Message must be at least 10 characters",
                }
            }))
        );
    }

    #[actix_web::test]
    async fn honeypot_submissions_get_generic_failure() {
        let app = app(Arc::new(FixtureContactRelay)).await;
        let mut body = valid_body();
        body["website"] = json!("https://spam.example");

        let res = test::call_service(&app, post(&body, None)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let error: Error = test::read_body_json(res).await;
        assert_eq!(error.message(), "Submission failed. Please try again.");
        assert!(error.details().is_none());
    }

    #[actix_web::test]
    async fn relay_failures_are_service_unavailable() {
        let app = app(Arc::new(UnconfiguredContactRelay)).await;

        let res = test::call_service(&app, post(&valid_body(), None)).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let error: Error = test::read_body_json(res).await;
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        assert!(error.message().contains("info@sgtinfrastructure.com"));
    }

    #[rstest]
    #[case::not_json("name=Ada")]
    #[case::wrong_shape("[1, 2, 3]")]
    #[actix_web::test]
    async fn unreadable_bodies_are_invalid_requests(#[case] raw: &'static str) {
        let app = app(Arc::new(FixtureContactRelay)).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/contact")
            .insert_header(("content-type", "application/json"))
            .set_payload(raw)
            .to_request();

        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let error: Error = test::read_body_json(res).await;
        assert_eq!(error.message(), MALFORMED_BODY_NOTICE);
    }
}
