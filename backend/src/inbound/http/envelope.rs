//! Success envelopes shared by the resource handlers.

use actix_web::HttpResponse;
use serde::Serialize;

use crate::domain::ResourceId;

/// `{success: true, message?, data?}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Identifier of a newly created resource.
#[derive(Debug, Serialize)]
pub struct CreatedId<'a> {
    pub id: &'a ResourceId,
}

/// 200 carrying `data`.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(Envelope {
        success: true,
        message: None,
        data: Some(data),
    })
}

/// 200 carrying `message` and `data`.
pub fn ok_with_message<T: Serialize>(message: &'static str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(Envelope {
        success: true,
        message: Some(message),
        data: Some(data),
    })
}

/// 201 carrying the new identifier.
pub fn created(message: &'static str, id: &ResourceId) -> HttpResponse {
    HttpResponse::Created().json(Envelope {
        success: true,
        message: Some(message),
        data: Some(CreatedId { id }),
    })
}

/// 200 carrying only `message`.
pub fn message(message: &'static str) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::<()> {
        success: true,
        message: Some(message),
        data: None,
    })
}
