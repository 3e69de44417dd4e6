// Content payload assembly for the relay endpoints
// Author: kelexine (https://github.com/kelexine)

use super::gemini::{Content, GenerateContentRequest, InlineData, Part};
use crate::error::{RelayError, Result};
use base64::Engine;
use bytes::Bytes;

/// Maximum number of files accepted per media request.
pub const MAX_ATTACHMENTS: usize = 5;

/// The three kinds of media the relay accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Document,
    Audio,
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] = [MediaKind::Image, MediaKind::Document, MediaKind::Audio];

    /// Multipart field carrying the uploaded files.
    pub fn field_name(self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Document => "documents",
            MediaKind::Audio => "audios",
        }
    }

    /// Prompt used when the caller sends none.
    pub fn default_prompt(self) -> &'static str {
        match self {
            MediaKind::Image => "Jelaskan gambar berikut",
            MediaKind::Document => "Ringkas dokumen berikut:",
            MediaKind::Audio => "Transkrip audio berikut:",
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            MediaKind::Image => "/generate-from-image",
            MediaKind::Document => "/generate-from-document",
            MediaKind::Audio => "/generate-from-audio",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

/// One uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub mime_type: String,
    pub data: Bytes,
}

impl Attachment {
    pub fn new(mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Encode into an inline data part. The MIME type is passed through verbatim.
    pub fn to_part(&self) -> Part {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: self.mime_type.clone(),
                data: base64::engine::general_purpose::STANDARD.encode(&self.data),
            },
        }
    }
}

/// What gets sent upstream as `contents`.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPayload {
    /// Raw prompt from `/generate-text`, forwarded unchanged. `None` when the
    /// body carried no prompt at all.
    Text(Option<String>),

    /// Prompt text followed by one inline part per attachment.
    Parts(Vec<Part>),
}

impl ContentPayload {
    pub fn text(prompt: Option<String>) -> Self {
        ContentPayload::Text(prompt)
    }

    /// Build the payload for a media endpoint.
    ///
    /// An empty or missing prompt falls back to the kind's default. Zero
    /// attachments is rejected before anything is encoded.
    pub fn media(kind: MediaKind, prompt: Option<&str>, attachments: &[Attachment]) -> Result<Self> {
        if attachments.is_empty() {
            return Err(RelayError::NoUploads(kind));
        }

        let prompt = prompt
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| kind.default_prompt());

        let mut parts = Vec::with_capacity(attachments.len() + 1);
        parts.push(Part::text(prompt));
        parts.extend(attachments.iter().map(Attachment::to_part));

        Ok(ContentPayload::Parts(parts))
    }

    /// Number of inline data parts carried.
    pub fn attachment_count(&self) -> usize {
        match self {
            ContentPayload::Text(_) => 0,
            ContentPayload::Parts(parts) => {
                parts.iter().filter(|p| p.as_inline_data().is_some()).count()
            }
        }
    }

    /// Shape the payload into a request body: a string becomes one user turn
    /// with a single text part, a part list becomes one user turn with those
    /// parts. A missing prompt yields no turns and is left for the upstream
    /// to reject.
    pub fn into_request(self) -> GenerateContentRequest {
        let contents = match self {
            ContentPayload::Text(Some(prompt)) => vec![Content::user(vec![Part::text(prompt)])],
            ContentPayload::Text(None) => Vec::new(),
            ContentPayload::Parts(parts) => vec![Content::user(parts)],
        };

        GenerateContentRequest { contents }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_payload_uses_default_prompt() {
        let files = [Attachment::new("image/png", vec![1u8, 2, 3])];

        for (prompt, expected) in [(None, "Jelaskan gambar berikut"), (Some(""), "Jelaskan gambar berikut")] {
            let payload = ContentPayload::media(MediaKind::Image, prompt, &files).unwrap();
            let ContentPayload::Parts(parts) = payload else {
                panic!("expected parts payload");
            };
            assert_eq!(parts[0].as_text(), Some(expected));
        }
    }

    #[test]
    fn test_media_payload_keeps_supplied_prompt() {
        let files = [Attachment::new("audio/mpeg", vec![0u8; 4])];
        let payload = ContentPayload::media(MediaKind::Audio, Some("what is said?"), &files).unwrap();

        let ContentPayload::Parts(parts) = payload else {
            panic!("expected parts payload");
        };
        assert_eq!(parts[0].as_text(), Some("what is said?"));
    }

    #[test]
    fn test_media_payload_encodes_every_file_in_order() {
        let files = [
            Attachment::new("application/pdf", b"%PDF-1.4".to_vec()),
            Attachment::new("text/plain", b"hello".to_vec()),
            Attachment::new("x-custom/anything", Vec::<u8>::new()),
        ];
        let payload = ContentPayload::media(MediaKind::Document, None, &files).unwrap();
        assert_eq!(payload.attachment_count(), 3);

        let ContentPayload::Parts(parts) = payload else {
            panic!("expected parts payload");
        };
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].as_text(), Some("Ringkas dokumen berikut:"));

        let inline: Vec<_> = parts[1..].iter().filter_map(Part::as_inline_data).collect();
        assert_eq!(inline[0].mime_type, "application/pdf");
        assert_eq!(inline[0].data, "JVBERi0xLjQ=");
        assert_eq!(inline[1].mime_type, "text/plain");
        assert_eq!(inline[1].data, "aGVsbG8=");
        assert_eq!(inline[2].mime_type, "x-custom/anything");
        assert_eq!(inline[2].data, "");
    }

    #[test]
    fn test_media_payload_rejects_empty_upload() {
        for kind in MediaKind::ALL {
            let err = ContentPayload::media(kind, Some("prompt"), &[]).unwrap_err();
            assert!(matches!(err, RelayError::NoUploads(k) if k == kind));
        }
    }

    #[test]
    fn test_text_payload_is_forwarded_unchanged() {
        let request = ContentPayload::text(Some("  hello\n".to_string())).into_request();
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].role, "user");
        assert_eq!(request.contents[0].parts, vec![Part::text("  hello\n")]);
    }

    #[test]
    fn test_missing_text_prompt_sends_no_contents() {
        let request = ContentPayload::text(None).into_request();
        assert!(request.contents.is_empty());
    }

    #[test]
    fn test_payload_is_deterministic() {
        let files = [Attachment::new("image/jpeg", vec![0xFFu8, 0xD8, 0xFF])];
        let a = ContentPayload::media(MediaKind::Image, Some("x"), &files).unwrap();
        let b = ContentPayload::media(MediaKind::Image, Some("x"), &files).unwrap();
        assert_eq!(a.into_request(), b.into_request());
    }

    #[test]
    fn test_field_names() {
        assert_eq!(MediaKind::Image.field_name(), "images");
        assert_eq!(MediaKind::Document.field_name(), "documents");
        assert_eq!(MediaKind::Audio.field_name(), "audios");
    }
}
