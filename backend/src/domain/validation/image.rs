//! Checks on the uploaded image file accompanying a payload.

use super::FieldError;
use crate::domain::image::UploadedImage;

/// MIME types accepted for uploads.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/jpg", "image/webp"];

const IMAGE_FIELD: &str = "image";

/// Whether a request must carry an image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRequirement {
    /// A file must be present; the message is reported when it is not.
    Required(&'static str),
    Optional,
}

/// Validate the uploaded file, if any.
pub fn image_errors(
    image: Option<&UploadedImage>,
    requirement: ImageRequirement,
    max_bytes: usize,
) -> Vec<FieldError> {
    let Some(image) = image else {
        return match requirement {
            ImageRequirement::Required(message) => vec![FieldError::new(IMAGE_FIELD, message)],
            ImageRequirement::Optional => Vec::new(),
        };
    };
    if !ALLOWED_IMAGE_TYPES.contains(&image.content_type()) {
        return vec![FieldError::new(
            IMAGE_FIELD,
            "Invalid image type. Only jpeg, png, jpg, webp allowed",
        )];
    }
    if image.len() > max_bytes {
        return vec![FieldError::new(
            IMAGE_FIELD,
            format!("Image must be at most {max_bytes} bytes"),
        )];
    }
    Vec::new()
}
