//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.
//!
//! Every failure renders as `{success: false, message, traceId?, errors}`.
//! Validation failures list one `field` item per failing field; any other
//! error lists a single item named after its kind.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const FIELD_ERROR_TYPE: &str = "field";

/// One entry of the `errors` list.
#[derive(Debug, Serialize)]
pub struct ErrorItem<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub message: &'a str,
    pub path: &'a str,
}

/// Failure envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody<'a> {
    pub success: bool,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<&'a str>,
    pub errors: Vec<ErrorItem<'a>>,
}

impl<'a> From<&'a Error> for ErrorBody<'a> {
    fn from(error: &'a Error) -> Self {
        let errors = if error.field_errors().is_empty() {
            vec![ErrorItem {
                kind: error.code().kind_name(),
                message: error.message(),
                path: error.path().unwrap_or_default(),
            }]
        } else {
            error
                .field_errors()
                .iter()
                .map(|field| ErrorItem {
                    kind: FIELD_ERROR_TYPE,
                    message: field.message(),
                    path: field.field(),
                })
                .collect()
        };
        Self {
            success: false,
            message: error.message(),
            trace_id: error.trace_id(),
            errors,
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
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
        builder.json(ErrorBody::from(self))
    }
}
