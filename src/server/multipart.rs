// Multipart upload collection
// Author: kelexine (https://github.com/kelexine)

use crate::error::{RelayError, Result};
use crate::models::{Attachment, MediaKind, MAX_ATTACHMENTS};
use axum::extract::Multipart;
use tracing::debug;

/// Content type assumed for a file part that declares none (RFC 7578 §4.4).
const DEFAULT_PART_CONTENT_TYPE: &str = "text/plain";

/// Message used when a file arrives in the wrong field or past the file limit.
const UNEXPECTED_FIELD: &str = "Unexpected field";

/// Everything a media endpoint reads from its form.
#[derive(Debug, Default)]
pub struct MediaUpload {
    pub prompt: Option<String>,
    pub attachments: Vec<Attachment>,
}

impl MediaUpload {
    /// Drain a multipart stream for `kind`.
    ///
    /// Parts with a filename are files and must use the kind's field name;
    /// parts without one are text fields, of which only `prompt` is kept.
    pub async fn collect(kind: MediaKind, mut multipart: Multipart) -> Result<Self> {
        let mut upload = MediaUpload::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| RelayError::InvalidRequest(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if field.file_name().is_none() {
                if name == "prompt" {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| RelayError::InvalidRequest(e.body_text()))?;
                    upload.prompt = Some(value);
                }
                continue;
            }

            if name != kind.field_name() || upload.attachments.len() == MAX_ATTACHMENTS {
                debug!("Rejecting file in field '{}' for {}", name, kind.endpoint());
                return Err(RelayError::InvalidRequest(UNEXPECTED_FIELD.to_string()));
            }

            let mime_type = part_mime_type(field.content_type());
            let data = field
                .bytes()
                .await
                .map_err(|e| RelayError::InvalidRequest(e.body_text()))?;

            upload.attachments.push(Attachment::new(mime_type, data));
        }

        Ok(upload)
    }
}

/// Normalize a part's declared type to a lowercase `type/subtype`,
/// dropping parameters. A missing or unparsable header yields `text/plain`.
fn part_mime_type(content_type: Option<&str>) -> String {
    content_type
        .and_then(|value| value.trim().parse::<mime::Mime>().ok())
        .map(|mime| mime.essence_str().to_ascii_lowercase())
        .unwrap_or_else(|| DEFAULT_PART_CONTENT_TYPE.to_string())
}
