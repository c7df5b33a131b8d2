//! Multipart parsing for admin content updates.
//!
//! Forms carry a `patch` field holding the JSON patch and an optional
//! `image` file field.

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use clinic_core::storage::{ImageUpload, StorageError, MAX_IMAGE_BYTES};
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// Request body limit for multipart image routes: the largest accepted
/// image plus room for the `patch` field and form framing.
pub const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 1024 * 1024;

/// Parse a `patch` + `image` form.
///
/// A missing `patch` field yields `T::default()`, so an image-only update
/// is valid. The image is validated here so a bad upload is a 400 instead
/// of a failed update.
pub async fn read_patch_form<T>(mut multipart: Multipart) -> AppResult<(T, Option<ImageUpload>)>
where
    T: DeserializeOwned + Default,
{
    let mut patch: Option<T> = None;
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "patch" => {
                let text = field.text().await.map_err(multipart_error)?;
                let parsed = serde_json::from_str(&text)
                    .map_err(|e| AppError::BadRequest(format!("Invalid 'patch' JSON: {e}")))?;
                patch = Some(parsed);
            }
            "image" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                let upload = ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                };
                upload.validate()?;
                image = Some(upload);
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok((patch.unwrap_or_default(), image))
}

/// A body cut off by the size limit is an oversized upload; anything else
/// is a malformed form.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Storage(StorageError::TooLarge)
    } else {
        AppError::BadRequest(err.body_text())
    }
}
