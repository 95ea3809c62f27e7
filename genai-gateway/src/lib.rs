//! genai-gateway: forwards prompts and media files to a generative AI
//! provider and relays the generated text.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
