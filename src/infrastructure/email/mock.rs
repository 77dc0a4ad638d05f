use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::{
    application::services::email_provider::EmailProvider,
    domain::{
        errors::DeliveryError,
        models::{EmailMessage, ProviderKind},
    },
};

/// Logs instead of sending. Never fails.
#[derive(Debug, Default)]
pub struct MockEmailProvider;

impl MockEmailProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailProvider for MockEmailProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Mock
    }

    async fn deliver(&self, message: &EmailMessage) -> Result<Option<String>, DeliveryError> {
        let message_id = format!("mock-{}", Utc::now().timestamp_millis());
        info!(
            recipient = %message.to,
            subject = %message.subject,
            from = %message.from_address,
            message_id = %message_id,
            "mock provider accepted email"
        );
        Ok(Some(message_id))
    }
}
