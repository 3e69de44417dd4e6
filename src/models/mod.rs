//! Data models for the relay.
//!
//! - `gemini`: wire types for the upstream `generateContent` request.
//! - `payload`: media kinds, uploaded attachments and the content payload
//!   built from them.

// Author: kelexine (https://github.com/kelexine)

pub mod gemini;
pub mod payload;

pub use gemini::{Content, GenerateContentRequest, InlineData, Part};
pub use payload::{Attachment, ContentPayload, MediaKind, MAX_ATTACHMENTS};
