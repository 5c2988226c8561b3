//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    //! Tests for HTTP error mapping.

    use super::*;
    use actix_web::body::to_bytes;
    use rstest::{fixture, rstest};
    use serde_json::json;

    const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

    #[fixture]
    fn expected_trace_id() -> String {
        TRACE_ID.to_owned()
    }

    async fn render(error: &Error) -> (StatusCode, Option<String>, Error) {
        let response = ResponseError::error_response(error);
        let status = response.status();
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .map(|value| value.to_str().expect("trace id header is ascii").to_owned());
        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        let payload = serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds");
        (status, header, payload)
    }

    #[rstest]
    #[case::invalid(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case::throttled(Error::too_many_requests("wait"), StatusCode::TOO_MANY_REQUESTS)]
    #[case::missing(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case::upstream(
        Error::service_unavailable("relay down"),
        StatusCode::SERVICE_UNAVAILABLE
    )]
    #[case::internal(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(ResponseError::status_code(&error), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn internal_errors_are_redacted(expected_trace_id: String) {
        let error = Error::internal("boom")
            .with_trace_id(expected_trace_id.clone())
            .with_details(json!({"secret": "x"}));

        let (status, header, payload) = render(&error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
        assert_eq!(payload.code(), ErrorCode::InternalError);
        assert_eq!(payload.message(), "Internal server error");
        assert!(payload.details().is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn client_errors_keep_message_and_details(expected_trace_id: String) {
        let error = Error::invalid_request("Name is required")
            .with_trace_id(expected_trace_id.clone())
            .with_details(json!({"fields": {"name": "Name is required"}}));

        let (status, header, payload) = render(&error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
        assert_eq!(payload.message(), "Name is required");
        assert_eq!(
            payload.details(),
            Some(&json!({"fields": {"name": "Name is required"}}))
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn error_without_trace_id_omits_trace_header() {
        let error = Error::too_many_requests("Please wait 2 minutes before submitting again");

        let (status, header, payload) = render(&error).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert!(header.is_none());
        assert_eq!(payload.trace_id(), None);
    }

    #[test]
    fn from_actix_error_is_redacted_internal_error() {
        let err: Error = actix_web::error::ErrorBadRequest("boom").into();

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "Internal server error");
        assert_eq!(err.details(), None);
    }
}
