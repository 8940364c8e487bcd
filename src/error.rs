//! Service error taxonomy and the HTTP error mapper.
//!
//! Every failure that reaches a handler is a [`ServiceError`] tagged with a
//! [`FailureKind`]. The actix [`ResponseError`] implementation is the single
//! place where kinds become status/body pairs, so routes never build error
//! responses themselves.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::{error, warn};
use serde::Serialize;
use thiserror::Error;

use crate::constants;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Category of a rejected operation; selects the response shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("{0} missing")]
    MissingField(&'static str),
    #[error("malformed id")]
    MalformedId,
    #[error("{0}")]
    FieldValidation(String),
    #[error("{0}")]
    MalformedBody(String),
    #[error("resource not found")]
    NotFound,
    #[error("Internal server error")]
    InternalFault,
    #[error("unknown endpoint")]
    UnknownRoute,
}

/// Operator-facing annotations. Never rendered into a response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    tag: Option<String>,
    detail: Option<String>,
}

impl ErrorContext {
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ServiceError {
    kind: FailureKind,
    context: ErrorContext,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ServiceError {
    pub fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            context: ErrorContext::default(),
        }
    }

    pub fn missing_field(field: &'static str) -> Self {
        Self::new(FailureKind::MissingField(field))
    }

    pub fn malformed_id(raw: impl Into<String>) -> Self {
        Self::new(FailureKind::MalformedId).with_detail(format!("cannot parse id {:?}", raw.into()))
    }

    pub fn field_validation(message: impl Into<String>) -> Self {
        Self::new(FailureKind::FieldValidation(message.into()))
    }

    pub fn malformed_body(message: impl Into<String>) -> Self {
        Self::new(FailureKind::MalformedBody(message.into()))
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::NotFound).with_detail(detail)
    }

    pub fn internal_server_error(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::InternalFault).with_detail(detail)
    }

    pub fn unknown_route(path: impl Into<String>) -> Self {
        Self::new(FailureKind::UnknownRoute).with_detail(path)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.context = self.context.with_tag(tag);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.context = self.context.with_detail(detail);
        self
    }

    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }

    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    fn log(&self) {
        let tag = self.context.tag().unwrap_or("service");
        let detail = self.context.detail().unwrap_or("-");
        match self.kind {
            FailureKind::InternalFault => error!("[{}] {}: {}", tag, self.kind, detail),
            _ => warn!("[{}] {}: {}", tag, self.kind, detail),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self.kind {
            FailureKind::MissingField(_)
            | FailureKind::MalformedId
            | FailureKind::FieldValidation(_)
            | FailureKind::MalformedBody(_) => StatusCode::BAD_REQUEST,
            FailureKind::NotFound | FailureKind::UnknownRoute => StatusCode::NOT_FOUND,
            FailureKind::InternalFault => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.log();
        let mut response = HttpResponse::build(self.status_code());
        match &self.kind {
            FailureKind::NotFound => response.finish(),
            FailureKind::InternalFault => response.json(ErrorBody {
                error: constants::MESSAGE_INTERNAL_SERVER_ERROR,
            }),
            kind => {
                let message = kind.to_string();
                response.json(ErrorBody { error: &message })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::{json, Value};

    async fn render(err: ServiceError) -> (StatusCode, Vec<u8>) {
        let resp = err.error_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body()).await.unwrap();
        (status, body.to_vec())
    }

    async fn render_json(err: ServiceError) -> (StatusCode, Value) {
        let (status, body) = render(err).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[actix_web::test]
    async fn missing_content_maps_to_400() {
        let (status, body) = render_json(ServiceError::missing_field("content")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "content missing" }));
    }

    #[actix_web::test]
    async fn malformed_id_maps_to_400() {
        let (status, body) = render_json(ServiceError::malformed_id("abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "malformed id" }));
    }

    #[actix_web::test]
    async fn field_validation_carries_validator_message() {
        let err = ServiceError::field_validation("Invalid phone number format");
        let (status, body) = render_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid phone number format" }));
    }

    #[actix_web::test]
    async fn not_found_has_empty_body() {
        let (status, body) = render(ServiceError::not_found("person 1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn internal_fault_hides_detail() {
        let err = ServiceError::internal_server_error("connection refused (os error 111)")
            .with_tag("store");
        let (status, body) = render_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    #[actix_web::test]
    async fn unknown_route_maps_to_404_with_body() {
        let (status, body) = render_json(ServiceError::unknown_route("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "unknown endpoint" }));
    }

    #[test]
    fn context_is_kept_out_of_display() {
        let err = ServiceError::malformed_id("xyz").with_tag("person");
        assert_eq!(err.to_string(), "malformed id");
        assert_eq!(err.context().tag(), Some("person"));
        assert_eq!(err.context().detail(), Some("cannot parse id \"xyz\""));
    }
}
