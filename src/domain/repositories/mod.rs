use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::models::{DeliveryLogRecord, EmailCategory, Registration, Webinar};

/// Append-only store of delivery attempts.
#[async_trait]
pub trait DeliveryLogRepository: Send + Sync {
    async fn insert(&self, record: DeliveryLogRecord) -> anyhow::Result<DeliveryLogRecord>;

    /// Newest first. The flag reports whether more rows exist past this page.
    async fn list(
        &self,
        entity_id: Option<Uuid>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<(Vec<DeliveryLogRecord>, bool)>;

    async fn has_sent(
        &self,
        entity_id: Uuid,
        recipient: &str,
        category: EmailCategory,
    ) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait WebinarRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Webinar>>;

    /// Scheduled webinars with reminders enabled starting within `[from, to]`.
    async fn find_due_for_reminder(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Webinar>>;
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Registration>>;
    async fn list_registered(&self, webinar_id: Uuid) -> anyhow::Result<Vec<Registration>>;
}
