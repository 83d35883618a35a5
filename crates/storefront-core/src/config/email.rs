//! Outgoing email configuration.

use serde::{Deserialize, Serialize};

/// Settings for the email collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Whether notifications are sent at all.
    #[serde(default)]
    pub enabled: bool,
    /// Sender address placed on every message.
    #[serde(default = "default_from_address")]
    pub from_address: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            from_address: default_from_address(),
        }
    }
}

fn default_from_address() -> String {
    "no-reply@storefront.local".to_string()
}
