use async_trait::async_trait;
use tracing::warn;

use crate::domain::{
    errors::DeliveryError,
    models::{DeliveryResult, EmailMessage, ProviderKind},
};

/// One outbound delivery mechanism. Exactly one implementation is active per process.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Hands the message to the provider. Returns the provider message id when one is known.
    async fn deliver(&self, message: &EmailMessage) -> Result<Option<String>, DeliveryError>;

    /// Provider-agnostic contract: every outcome, including misconfiguration,
    /// comes back as a `DeliveryResult`.
    async fn send(&self, message: &EmailMessage) -> DeliveryResult {
        match self.deliver(message).await {
            Ok(message_id) => DeliveryResult::sent(self.kind(), message_id),
            Err(err) => {
                warn!(
                    recipient = %message.to,
                    provider = self.kind().as_str(),
                    error = %err,
                    "email delivery failed"
                );
                DeliveryResult::failed(self.kind(), err.to_string())
            }
        }
    }
}
