use crate::startup::AppState;
use askama::Template;
use axum::extract::State;

/// One row of the endpoint table on the status page.
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub body: &'static str,
}

pub const ENDPOINTS: &[EndpointInfo] = &[
    EndpointInfo {
        method: "POST",
        path: "/generate-text",
        body: "JSON: prompt",
    },
    EndpointInfo {
        method: "POST",
        path: "/generate-from-image",
        body: "multipart: image, prompt",
    },
    EndpointInfo {
        method: "POST",
        path: "/generate-from-document",
        body: "multipart: document, prompt (optional)",
    },
    EndpointInfo {
        method: "POST",
        path: "/generate-from-audio",
        body: "multipart: audio, prompt (optional)",
    },
];

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub version: &'static str,
    pub model: String,
    pub endpoints: &'static [EndpointInfo],
}

pub async fn index(State(state): State<AppState>) -> IndexTemplate {
    IndexTemplate {
        version: env!("CARGO_PKG_VERSION"),
        model: state.text_provider.model().to_string(),
        endpoints: ENDPOINTS,
    }
}
