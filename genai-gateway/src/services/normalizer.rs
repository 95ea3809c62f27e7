//! Turns caller input into a [`GenerationRequest`].
//!
//! Validation happens here, before any provider call is made.

use crate::models::{Attachment, AttachmentKind, Blob, GenerationRequest};
use service_core::error::AppError;
use thiserror::Error;

/// Media type used when an upload does not declare one.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("prompt required")]
    PromptRequired,

    #[error("attachment required")]
    AttachmentRequired(AttachmentKind),
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

fn trimmed(prompt: Option<&str>) -> Option<&str> {
    prompt.map(str::trim).filter(|p| !p.is_empty())
}

/// Build a text-only request.
pub fn normalize_text(prompt: Option<&str>) -> Result<GenerationRequest, NormalizeError> {
    let prompt = trimmed(prompt).ok_or(NormalizeError::PromptRequired)?;
    Ok(GenerationRequest::text(prompt.to_string()))
}

/// Build a prompt + attachment request for the given kind of upload.
///
/// A blank or absent prompt falls back to the kind's default prompt.
pub fn normalize_attachment(
    kind: AttachmentKind,
    prompt: Option<&str>,
    attachment: Option<Attachment>,
) -> Result<GenerationRequest, NormalizeError> {
    let attachment = attachment
        .filter(|a| !a.is_blank())
        .ok_or(NormalizeError::AttachmentRequired(kind))?;

    let prompt = trimmed(prompt)
        .or_else(|| kind.default_prompt())
        .ok_or(NormalizeError::PromptRequired)?;

    let mime_type = attachment
        .content_type
        .as_deref()
        .filter(|ct| !ct.is_empty())
        .unwrap_or(FALLBACK_MIME_TYPE);

    Ok(GenerationRequest::with_attachment(
        prompt.to_string(),
        Blob::from_bytes(&attachment.bytes, mime_type),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GenerationPart, DEFAULT_AUDIO_PROMPT, DEFAULT_DOCUMENT_PROMPT};
    use axum::body::Bytes;

    fn upload(bytes: &'static [u8], content_type: Option<&str>) -> Attachment {
        Attachment {
            bytes: Bytes::from_static(bytes),
            content_type: content_type.map(str::to_string),
            file_name: Some("upload.bin".to_string()),
        }
    }

    #[test]
    fn text_prompt_is_trimmed_into_single_part() {
        let request = normalize_text(Some("  Tell me a joke \n")).unwrap();
        assert_eq!(
            request.parts(),
            &[GenerationPart::Text("Tell me a joke".to_string())]
        );
    }

    #[test]
    fn missing_or_blank_text_prompt_is_rejected() {
        assert_eq!(normalize_text(None), Err(NormalizeError::PromptRequired));
        assert_eq!(normalize_text(Some("")), Err(NormalizeError::PromptRequired));
        assert_eq!(
            normalize_text(Some(" \t\n")),
            Err(NormalizeError::PromptRequired)
        );
    }

    #[test]
    fn attachment_produces_text_then_blob() {
        let bytes: &'static [u8] = &[0x89, b'P', b'N', b'G', 0x00, 0xff, 0x10];
        let request = normalize_attachment(
            AttachmentKind::Image,
            Some("What is this?"),
            Some(upload(bytes, Some("image/png"))),
        )
        .unwrap();

        let parts = request.parts();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], GenerationPart::Text("What is this?".to_string()));
        match &parts[1] {
            GenerationPart::Blob(blob) => {
                assert_eq!(blob.mime_type, "image/png");
                assert_eq!(blob.decode().unwrap(), bytes);
            }
            other => panic!("expected blob, got {:?}", other),
        }
    }

    #[test]
    fn image_requires_prompt() {
        let result = normalize_attachment(
            AttachmentKind::Image,
            Some("   "),
            Some(upload(b"img", Some("image/jpeg"))),
        );
        assert_eq!(result, Err(NormalizeError::PromptRequired));
    }

    #[test]
    fn missing_attachment_is_rejected_before_prompt() {
        for kind in [
            AttachmentKind::Image,
            AttachmentKind::Document,
            AttachmentKind::Audio,
        ] {
            assert_eq!(
                normalize_attachment(kind, None, None),
                Err(NormalizeError::AttachmentRequired(kind))
            );
        }
        assert_eq!(
            NormalizeError::AttachmentRequired(AttachmentKind::Audio).to_string(),
            "attachment required"
        );
    }

    #[test]
    fn blank_upload_counts_as_missing() {
        let blank = Attachment {
            bytes: Bytes::new(),
            content_type: Some("application/octet-stream".to_string()),
            file_name: Some(String::new()),
        };
        assert_eq!(
            normalize_attachment(AttachmentKind::Document, Some("hi"), Some(blank)),
            Err(NormalizeError::AttachmentRequired(AttachmentKind::Document))
        );
    }

    #[test]
    fn omitted_prompt_uses_kind_default() {
        let document = normalize_attachment(
            AttachmentKind::Document,
            None,
            Some(upload(b"%PDF-1.7", Some("application/pdf"))),
        )
        .unwrap();
        assert_eq!(document.prompt(), DEFAULT_DOCUMENT_PROMPT);

        let audio = normalize_attachment(
            AttachmentKind::Audio,
            Some(""),
            Some(upload(b"ID3", Some("audio/mpeg"))),
        )
        .unwrap();
        assert_eq!(audio.prompt(), DEFAULT_AUDIO_PROMPT);
    }

    #[test]
    fn caller_prompt_wins_over_default() {
        let request = normalize_attachment(
            AttachmentKind::Audio,
            Some(" List the speakers "),
            Some(upload(b"RIFF", Some("audio/wav"))),
        )
        .unwrap();
        assert_eq!(request.prompt(), "List the speakers");
    }

    #[test]
    fn media_type_passes_through_unchanged() {
        let request = normalize_attachment(
            AttachmentKind::Document,
            None,
            Some(upload(b"a,b", Some("text/csv; charset=utf-8"))),
        )
        .unwrap();
        assert_eq!(request.blob().unwrap().mime_type, "text/csv; charset=utf-8");

        let untyped =
            normalize_attachment(AttachmentKind::Document, None, Some(upload(b"data", None)))
                .unwrap();
        assert_eq!(untyped.blob().unwrap().mime_type, FALLBACK_MIME_TYPE);
    }
}
