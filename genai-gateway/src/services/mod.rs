pub mod extractor;
pub mod normalizer;
pub mod providers;

pub use extractor::extract_text;
pub use normalizer::{normalize_attachment, normalize_text, NormalizeError};
