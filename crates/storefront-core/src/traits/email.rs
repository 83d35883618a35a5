//! Outbound email collaborator.

use async_trait::async_trait;

use crate::result::AppResult;

/// Sends transactional email. Delivery itself is external to the storefront.
#[async_trait]
pub trait EmailSender: Send + Sync + 'static {
    /// Send a plain-text message.
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> AppResult<()>;
}
