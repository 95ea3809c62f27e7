use crate::models::{Attachment, AttachmentKind, GenerationRequest};
use crate::services::{extract_text, normalize_attachment, normalize_text};
use crate::startup::AppState;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use std::time::Instant;

/// Multipart field carrying the optional prompt.
const PROMPT_FIELD: &str = "prompt";

#[derive(Debug, Deserialize)]
pub struct GenerateTextRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub result: String,
}

fn rejection_error(status: StatusCode, text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(text)
    } else {
        AppError::BadRequest(anyhow::anyhow!(text))
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    rejection_error(err.status(), err.body_text())
}

pub async fn generate_text(
    State(state): State<AppState>,
    payload: Result<Json<GenerateTextRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| rejection_error(e.status(), e.body_text()))?;
    let request = normalize_text(payload.prompt.as_deref())?;

    run_generation(&state, "text", request).await
}

pub async fn generate_from_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    generate_from_upload(&state, AttachmentKind::Image, multipart).await
}

pub async fn generate_from_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    generate_from_upload(&state, AttachmentKind::Document, multipart).await
}

pub async fn generate_from_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    generate_from_upload(&state, AttachmentKind::Audio, multipart).await
}

async fn generate_from_upload(
    state: &AppState,
    kind: AttachmentKind,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let multipart = multipart.map_err(|e| rejection_error(e.status(), e.body_text()))?;
    let (prompt, attachment) = read_upload(multipart, kind).await?;
    let request = normalize_attachment(kind, prompt.as_deref(), attachment)?;

    run_generation(state, kind.field_name(), request).await
}

/// Collect the prompt and the first file field named after `kind`.
async fn read_upload(
    mut multipart: Multipart,
    kind: AttachmentKind,
) -> Result<(Option<String>, Option<Attachment>), AppError> {
    let mut prompt = None;
    let mut attachment: Option<Attachment> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == PROMPT_FIELD {
            prompt = Some(field.text().await.map_err(multipart_error)?);
        } else if name == kind.field_name() {
            if attachment.is_some() {
                tracing::warn!(field = %name, "Ignoring additional attachment, only one is supported");
                continue;
            }

            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(multipart_error)?;

            tracing::debug!(
                field = %name,
                file_name = ?file_name,
                content_type = ?content_type,
                size = bytes.len(),
                "Received attachment"
            );

            attachment = Some(Attachment {
                bytes,
                content_type,
                file_name,
            });
        } else {
            tracing::debug!(field = %name, "Ignoring unexpected multipart field");
        }
    }

    Ok((prompt, attachment))
}

async fn run_generation(
    state: &AppState,
    endpoint: &'static str,
    request: GenerationRequest,
) -> Result<Json<GenerateResponse>, AppError> {
    let started = Instant::now();

    let response = state.text_provider.generate(&request).await.map_err(|e| {
        tracing::error!(endpoint, error = %e, "Provider call failed");
        AppError::from(e)
    })?;

    let result = extract_text(&response);

    tracing::info!(
        endpoint,
        model = %state.text_provider.model(),
        prompt_len = request.prompt().len(),
        has_attachment = request.blob().is_some(),
        result_len = result.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Generation completed"
    );

    Ok(Json(GenerateResponse { result }))
}
