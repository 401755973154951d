use serde::{Deserialize, Serialize};

use super::LanguageTag;

/// Maximum prompt length accepted at the input boundary (characters)
pub const MAX_PROMPT_CHARS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub language: LanguageTag,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, language: LanguageTag) -> Self {
        Self { prompt: prompt.into(), language }
    }
}

/// Outcome of one successful backend call.
///
/// `requested_language` is always the language the caller selected; the
/// backend's own language echo never ends up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub prompt: String,
    pub code: String,
    pub requested_language: LanguageTag,
}
