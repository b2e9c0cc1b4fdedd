use crate::error::Result;
use crate::utils::fs::atomic_write;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The token record written once per container lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    pub refresh_token: Option<String>,
    pub created_at: String,
}

impl TokenRecord {
    pub fn new(refresh_token: Option<String>) -> Self {
        Self {
            refresh_token,
            created_at: Utc::now().format(TIME_FORMAT).to_string(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        atomic_write(path, &serde_json::to_string_pretty(self)?)
    }
}
