use serde::{Deserialize, Serialize};

use super::provider::ProviderKind;

/// A fully resolved outbound email. Built per send and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub from_name: String,
    pub from_address: String,
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeliveryResult {
    pub success: bool,
    pub provider: ProviderKind,
    pub message_id: Option<String>,
    pub error: Option<String>,
}

impl DeliveryResult {
    pub fn sent(provider: ProviderKind, message_id: Option<String>) -> Self {
        Self {
            success: true,
            provider,
            message_id,
            error: None,
        }
    }

    pub fn failed(provider: ProviderKind, error: impl Into<String>) -> Self {
        Self {
            success: false,
            provider,
            message_id: None,
            error: Some(error.into()),
        }
    }
}

/// Outcome of one recipient inside a bulk or fan-out send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientDelivery {
    pub email: String,
    pub result: DeliveryResult,
}
