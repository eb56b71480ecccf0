//! Generation history entry

use super::image::{GenerationResult, ImagePayload, Template};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One successful outpaint, persisted newest-first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation timestamp in milliseconds, unique within the list
    pub id: i64,
    /// User prompt (without the fixed system instructions)
    pub prompt: String,
    /// Exact template sent to the model
    pub template: ImagePayload,
    /// `data:` URI of the latest result for this generation
    pub result: String,
}

impl HistoryEntry {
    pub fn new(id: i64, prompt: impl Into<String>, template: &Template, result: &GenerationResult) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            template: template.payload().clone(),
            result: result.reference.clone(),
        }
    }

    /// Next identifier for an entry placed in front of `newest`.
    ///
    /// Uses the current time, bumped past the newest id so identifiers stay
    /// unique and decreasing along the list. `None` once the newest id is
    /// `i64::MAX`.
    pub fn next_id(newest: Option<&HistoryEntry>) -> Option<i64> {
        let now = Utc::now().timestamp_millis();
        match newest {
            Some(entry) if entry.id >= now => entry.id.checked_add(1),
            _ => Some(now),
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.id).single()
    }

    pub fn template(&self) -> Template {
        Template::from_payload(self.template.clone())
    }

    pub fn result(&self) -> GenerationResult {
        GenerationResult::from_reference(self.result.clone())
    }
}
