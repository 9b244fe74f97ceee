//! UI preferences persisted through the host's key-value storage.

use crate::error::Result;
use serde::{Deserialize, Serialize};

pub const THEME_KEY: &str = "theme";
pub const BUNDLE_KEY: &str = "living.v4";

/// Small interaction counters kept across visits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionBundle {
    pub visits: u32,
    pub messages: u32,
    pub has_interacted: bool,
}

impl InteractionBundle {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Missing or corrupt storage starts a fresh bundle.
    pub fn load(stored: Option<&str>) -> Self {
        match stored.map(Self::from_json) {
            Some(Ok(b)) => b,
            Some(Err(e)) => {
                log::warn!("[prefs] discarding stored bundle: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn record_visit(&mut self) {
        self.visits = self.visits.saturating_add(1);
    }

    pub fn record_message(&mut self) {
        self.messages = self.messages.saturating_add(1);
        self.has_interacted = true;
    }
}
