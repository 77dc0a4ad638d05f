use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{email::DeliveryResult, provider::ProviderKind};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Sent => "sent",
            DeliveryStatus::Failed => "failed",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "sent" => Some(DeliveryStatus::Sent),
            "failed" => Some(DeliveryStatus::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EmailCategory {
    Confirmation,
    #[serde(rename = "reminder_24h")]
    Reminder24h,
    #[serde(rename = "reminder_1h")]
    Reminder1h,
    ThankYou,
    Campaign,
    Transactional,
}

impl EmailCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailCategory::Confirmation => "confirmation",
            EmailCategory::Reminder24h => "reminder_24h",
            EmailCategory::Reminder1h => "reminder_1h",
            EmailCategory::ThankYou => "thank_you",
            EmailCategory::Campaign => "campaign",
            EmailCategory::Transactional => "transactional",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "confirmation" => Some(EmailCategory::Confirmation),
            "reminder_24h" => Some(EmailCategory::Reminder24h),
            "reminder_1h" => Some(EmailCategory::Reminder1h),
            "thank_you" => Some(EmailCategory::ThankYou),
            "campaign" => Some(EmailCategory::Campaign),
            "transactional" => Some(EmailCategory::Transactional),
            _ => None,
        }
    }
}

/// One row per send attempt. Written once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryLogRecord {
    pub id: Uuid,
    pub entity_id: Option<Uuid>,
    pub recipient: String,
    pub subject: String,
    pub status: DeliveryStatus,
    pub category: EmailCategory,
    pub provider: ProviderKind,
    pub error_message: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl DeliveryLogRecord {
    /// `sent_at` is set iff the attempt succeeded.
    pub fn from_result(
        entity_id: Option<Uuid>,
        recipient: &str,
        subject: &str,
        category: EmailCategory,
        result: &DeliveryResult,
    ) -> Self {
        let now = Utc::now();
        let (status, sent_at, error_message) = if result.success {
            (DeliveryStatus::Sent, Some(now), None)
        } else {
            let reason = result
                .error
                .clone()
                .unwrap_or_else(|| "unknown delivery error".to_string());
            (DeliveryStatus::Failed, None, Some(reason))
        };

        Self {
            id: Uuid::new_v4(),
            entity_id,
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            status,
            category,
            provider: result.provider,
            error_message,
            sent_at,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_result_records_sent_timestamp() {
        let result = DeliveryResult::sent(ProviderKind::Mock, Some("mock-1".to_string()));
        let record = DeliveryLogRecord::from_result(
            Some(Uuid::new_v4()),
            "ada@example.com",
            "Hello",
            EmailCategory::Reminder24h,
            &result,
        );

        assert_eq!(record.status, DeliveryStatus::Sent);
        assert!(record.sent_at.is_some());
        assert!(record.error_message.is_none());
        assert_eq!(record.provider, ProviderKind::Mock);
    }

    #[test]
    fn failed_result_has_no_sent_timestamp() {
        let result = DeliveryResult::failed(ProviderKind::Smtp, "connection refused");
        let record = DeliveryLogRecord::from_result(
            None,
            "ada@example.com",
            "Hello",
            EmailCategory::Transactional,
            &result,
        );

        assert_eq!(record.status, DeliveryStatus::Failed);
        assert!(record.sent_at.is_none());
        assert_eq!(record.error_message.as_deref(), Some("connection refused"));
    }

    #[test]
    fn category_names_round_trip_through_storage_form() {
        for category in [
            EmailCategory::Confirmation,
            EmailCategory::Reminder24h,
            EmailCategory::Reminder1h,
            EmailCategory::ThankYou,
            EmailCategory::Campaign,
            EmailCategory::Transactional,
        ] {
            assert_eq!(EmailCategory::from_str(category.as_str()), Some(category));
        }
        assert_eq!(
            serde_json::to_string(&EmailCategory::Reminder1h).unwrap(),
            "\"reminder_1h\""
        );
    }
}
