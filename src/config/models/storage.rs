//! Storage configuration

use super::*;
use crate::storage::HISTORY_KEY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Local persistence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory for the key-value store; platform data dir when unset
    pub data_dir: Option<PathBuf>,
    /// Key the history list is stored under
    pub history_key: String,
    /// Upper bound on decoding and compositing one source image
    pub decode_timeout_secs: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            history_key: HISTORY_KEY.to_string(),
            decode_timeout_secs: default_decode_timeout(),
        }
    }
}

impl StorageSettings {
    /// Resolved data directory
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("outpaint"))
                .unwrap_or_else(|| PathBuf::from(".outpaint"))
        })
    }
}
