//! Data models for code generation and its history.
//!
//! - [`LanguageTag`] - Target language of a request, with extension mapping
//! - [`GenerationRequest`] / [`GenerationResult`] - One backend round-trip
//! - [`HistoryEntry`] - A persisted past generation
//!
//! Persisted entries go through the custom timestamp deserializer in the
//! `deserializers` module, which accepts RFC 3339 strings and epoch millis.

pub mod deserializers;
pub mod generation;
pub mod history;
pub mod language;

pub use generation::{GenerationRequest, GenerationResult, MAX_PROMPT_CHARS};
pub use history::HistoryEntry;
pub use language::{LanguageFilter, LanguageTag};
