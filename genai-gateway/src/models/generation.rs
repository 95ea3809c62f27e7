//! Provider-agnostic generation request model.

use axum::body::Bytes;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Binary payload embedded in a request, base64-encoded for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Base64 (standard alphabet, padded) encoding of the attachment bytes.
    pub data: String,
    /// Media type declared by the uploader.
    pub mime_type: String,
}

impl Blob {
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            data: STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    /// Decode the transport encoding back into the original bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}

/// One segment of a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationPart {
    Text(String),
    Blob(Blob),
}

/// Ordered parts sent to the provider.
///
/// Always starts with the text prompt and carries at most one blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    parts: Vec<GenerationPart>,
}

impl GenerationRequest {
    pub(crate) fn text(prompt: String) -> Self {
        Self {
            parts: vec![GenerationPart::Text(prompt)],
        }
    }

    pub(crate) fn with_attachment(prompt: String, blob: Blob) -> Self {
        Self {
            parts: vec![GenerationPart::Text(prompt), GenerationPart::Blob(blob)],
        }
    }

    pub fn parts(&self) -> &[GenerationPart] {
        &self.parts
    }

    pub fn prompt(&self) -> &str {
        match self.parts.first() {
            Some(GenerationPart::Text(text)) => text,
            _ => "",
        }
    }

    pub fn blob(&self) -> Option<&Blob> {
        self.parts.iter().find_map(|part| match part {
            GenerationPart::Blob(blob) => Some(blob),
            GenerationPart::Text(_) => None,
        })
    }
}

/// Which kind of file an attachment endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Document,
    Audio,
}

pub const DEFAULT_DOCUMENT_PROMPT: &str = "Summarize this document.";
pub const DEFAULT_AUDIO_PROMPT: &str = "Transcribe this audio.";

impl AttachmentKind {
    /// Multipart field carrying the file.
    pub fn field_name(self) -> &'static str {
        match self {
            AttachmentKind::Image => "image",
            AttachmentKind::Document => "document",
            AttachmentKind::Audio => "audio",
        }
    }

    /// Prompt substituted when the caller omits one. Images have none.
    pub fn default_prompt(self) -> Option<&'static str> {
        match self {
            AttachmentKind::Image => None,
            AttachmentKind::Document => Some(DEFAULT_DOCUMENT_PROMPT),
            AttachmentKind::Audio => Some(DEFAULT_AUDIO_PROMPT),
        }
    }
}

impl std::fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

/// A file upload buffered in memory.
#[derive(Debug, Clone, Default)]
pub struct Attachment {
    pub bytes: Bytes,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl Attachment {
    /// True for the empty part browsers send when no file was chosen.
    pub fn is_blank(&self) -> bool {
        self.bytes.is_empty() && self.file_name.as_deref().map_or(true, str::is_empty)
    }
}
