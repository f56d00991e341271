use actix_multipart::Multipart;
use futures_util::StreamExt;

use crate::domain::error::{AppError, Result};

/// Form field expected to carry the file
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Drain the multipart stream and return the `file` part, or the first part
/// with a filename when no field is named `file`.
pub async fn read_upload(mut payload: Multipart, max_bytes: usize) -> Result<UploadedFile> {
    let mut fallback: Option<UploadedFile> = None;
    let mut total = 0usize;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            AppError::InvalidRequest(format!("Invalid multipart payload: {}", e))
        })?;

        let (name, filename) = match field.content_disposition() {
            Some(disposition) => (
                disposition.get_name().map(str::to_string),
                disposition.get_filename().map(str::to_string),
            ),
            None => (None, None),
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| {
                AppError::InvalidRequest(format!("Invalid multipart payload: {}", e))
            })?;
            total += chunk.len();
            if total > max_bytes {
                return Err(AppError::PayloadTooLarge(max_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }

        let Some(filename) = filename else {
            continue;
        };
        let file = UploadedFile { filename, bytes };

        if name.as_deref() == Some(UPLOAD_FIELD) {
            return Ok(file);
        }
        if fallback.is_none() {
            fallback = Some(file);
        }
    }

    fallback.ok_or(AppError::MissingFile)
}
