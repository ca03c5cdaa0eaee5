use serde::Deserialize;

use loadwire_core::error::{LoadwireError, Result};

/// Notification display settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifyConfig {
    /// Auto-dismiss delay.
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,

    /// Longest message body shown before truncation.
    #[serde(default = "default_max_body_chars")]
    pub max_body_chars: usize,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            display_ms: default_display_ms(),
            max_body_chars: default_max_body_chars(),
        }
    }
}

impl NotifyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.display_ms == 0 {
            return Err(LoadwireError::BadRequest("notify.display_ms must be > 0".into()));
        }
        if self.max_body_chars == 0 {
            return Err(LoadwireError::BadRequest("notify.max_body_chars must be > 0".into()));
        }
        Ok(())
    }
}

fn default_display_ms() -> u64 {
    5000
}
fn default_max_body_chars() -> usize {
    100
}
