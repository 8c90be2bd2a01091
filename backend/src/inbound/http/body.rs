//! Request body reader for mutating endpoints.
//!
//! JSON bodies are parsed straight into a payload. Multipart bodies keep
//! their `data` field as raw JSON text for the domain parse step, collect
//! other text fields alongside it, and lift the `image` part out as the
//! upload.

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, web};
use futures_util::{StreamExt, TryStreamExt};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::{Error, MutationRequest, RawField, RequestBody, UploadedImage};

use super::ApiResult;

const DATA_FIELD: &str = "data";
const IMAGE_FIELD: &str = "image";
const FILE_TOO_LARGE: &str = "File size limit has been reached";
/// Cap for JSON bodies and multipart text fields.
const MAX_TEXT_BYTES: usize = 256 * 1024;

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with("multipart/form-data"))
}

fn multipart_error(err: MultipartError) -> Error {
    warn!(error = %err, "malformed multipart body");
    Error::invalid_request(format!("Malformed multipart body: {err}"))
}

async fn read_field(field: &mut Field, limit: usize, too_large: &str) -> ApiResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        if bytes.len() + chunk.len() > limit {
            return Err(Error::invalid_request(too_large));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn text(bytes: Vec<u8>, name: &str) -> ApiResult<String> {
    String::from_utf8(bytes)
        .map_err(|_| Error::invalid_request(format!("Field '{name}' must be UTF-8 text")))
}

async fn read_multipart(
    req: &HttpRequest,
    payload: web::Payload,
    max_upload_bytes: usize,
) -> ApiResult<MutationRequest> {
    let mut multipart = Multipart::new(req.headers(), payload);
    let mut fields = Map::new();
    let mut data = None;
    let mut image = None;

    while let Some(mut field) = multipart.try_next().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            IMAGE_FIELD => {
                let content_type = field
                    .content_type()
                    .map(|mime| mime.essence_str().to_owned())
                    .unwrap_or_default();
                let bytes = read_field(&mut field, max_upload_bytes, FILE_TOO_LARGE).await?;
                debug!(content_type, size = bytes.len(), "image part received");
                image = Some(UploadedImage::new(content_type, bytes));
            }
            DATA_FIELD => {
                let bytes = read_field(&mut field, MAX_TEXT_BYTES, "Request body too large").await?;
                data = Some(text(bytes, DATA_FIELD)?);
            }
            "" => {
                read_field(&mut field, MAX_TEXT_BYTES, "Request body too large").await?;
            }
            _ => {
                let bytes = read_field(&mut field, MAX_TEXT_BYTES, "Request body too large").await?;
                let value = text(bytes, &name)?;
                fields.insert(name, Value::String(value));
            }
        }
    }

    let body = match data {
        Some(data) => RequestBody::Raw(RawField { fields, data }),
        None => RequestBody::Parsed(fields),
    };
    Ok(MutationRequest { body, image })
}

async fn read_json(mut payload: web::Payload) -> ApiResult<MutationRequest> {
    let mut bytes = Vec::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| {
            warn!(error = %err, "failed to read request body");
            Error::invalid_request("Unable to read request body")
        })?;
        if bytes.len() + chunk.len() > MAX_TEXT_BYTES {
            return Err(Error::invalid_request("Request body too large"));
        }
        bytes.extend_from_slice(&chunk);
    }
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(MutationRequest::default());
    }
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|err| Error::invalid_request(format!("Invalid JSON body: {err}")))?;
    Ok(MutationRequest {
        body: RequestBody::try_from(value)?,
        image: None,
    })
}

/// Read a create or update body.
pub async fn read_mutation(
    req: &HttpRequest,
    payload: web::Payload,
    max_upload_bytes: usize,
) -> ApiResult<MutationRequest> {
    if is_multipart(req) {
        read_multipart(req, payload, max_upload_bytes).await
    } else {
        read_json(payload).await
    }
}
