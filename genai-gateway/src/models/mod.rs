//! Domain models for the gateway.

pub mod generation;

pub use generation::{
    Attachment, AttachmentKind, Blob, GenerationPart, GenerationRequest, DEFAULT_AUDIO_PROMPT,
    DEFAULT_DOCUMENT_PROMPT,
};
