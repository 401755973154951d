use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{GenerationResult, LanguageTag};

/// One persisted record of a past successful generation.
///
/// Only `favorite` ever changes after creation. Records stored without an id
/// deserialize with the nil id; the history store assigns and persists one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default = "Uuid::nil")]
    pub id: Uuid,
    pub prompt: String,
    pub code: String,
    pub language: LanguageTag,
    #[serde(deserialize_with = "crate::models::deserializers::deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub favorite: bool,
}

impl HistoryEntry {
    pub fn from_result(result: GenerationResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt: result.prompt,
            code: result.code,
            language: result.requested_language,
            timestamp,
            favorite: false,
        }
    }
}
