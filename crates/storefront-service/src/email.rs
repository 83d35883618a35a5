//! Default email collaborator.

use async_trait::async_trait;
use tracing::{debug, info};

use storefront_core::config::EmailConfig;
use storefront_core::result::AppResult;
use storefront_core::traits::EmailSender;

/// Writes outgoing mail to the log. Delivery is left to an external relay.
#[derive(Debug, Clone)]
pub struct LogEmailSender {
    config: EmailConfig,
}

impl LogEmailSender {
    /// Creates a sender from configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> AppResult<()> {
        if !self.config.enabled {
            debug!(recipient, subject, "Email disabled, message dropped");
            return Ok(());
        }
        info!(
            from = %self.config.from_address,
            recipient,
            subject,
            body_len = body.len(),
            "Email sent"
        );
        Ok(())
    }
}
