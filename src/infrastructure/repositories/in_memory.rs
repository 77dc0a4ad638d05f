use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    models::{
        DeliveryLogRecord, DeliveryStatus, EmailCategory, Registration, RegistrationStatus,
        Webinar, WebinarStatus,
    },
    repositories::{DeliveryLogRepository, RegistrationRepository, WebinarRepository},
};

use super::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};

#[derive(Default)]
pub struct InMemoryDeliveryLogRepository {
    logs: Arc<RwLock<Vec<DeliveryLogRecord>>>,
}

impl InMemoryDeliveryLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeliveryLogRepository for InMemoryDeliveryLogRepository {
    async fn insert(&self, record: DeliveryLogRecord) -> anyhow::Result<DeliveryLogRecord> {
        let mut logs = self.logs.write().await;
        logs.push(record.clone());
        Ok(record)
    }

    async fn list(
        &self,
        entity_id: Option<Uuid>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<(Vec<DeliveryLogRecord>, bool)> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT) as usize;
        let offset = offset.unwrap_or(0) as usize;

        let logs = self.logs.read().await;
        // newest first; later inserts win ties on created_at
        let mut matching: Vec<&DeliveryLogRecord> = logs
            .iter()
            .rev()
            .filter(|log| entity_id.is_none() || log.entity_id == entity_id)
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let has_more = matching.len() > offset + limit;
        let page = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok((page, has_more))
    }

    async fn has_sent(
        &self,
        entity_id: Uuid,
        recipient: &str,
        category: EmailCategory,
    ) -> anyhow::Result<bool> {
        let logs = self.logs.read().await;
        Ok(logs.iter().any(|log| {
            log.entity_id == Some(entity_id)
                && log.recipient == recipient
                && log.category == category
                && log.status == DeliveryStatus::Sent
        }))
    }
}

#[derive(Default)]
pub struct InMemoryWebinarRepository {
    webinars: Arc<RwLock<HashMap<Uuid, Webinar>>>,
}

impl InMemoryWebinarRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert(&self, webinar: Webinar) {
        let mut webinars = self.webinars.write().await;
        webinars.insert(webinar.id, webinar);
    }
}

#[async_trait]
impl WebinarRepository for InMemoryWebinarRepository {
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Webinar>> {
        let webinars = self.webinars.read().await;
        Ok(webinars.get(&id).cloned())
    }

    async fn find_due_for_reminder(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Webinar>> {
        let webinars = self.webinars.read().await;
        let mut due: Vec<Webinar> = webinars
            .values()
            .filter(|w| {
                w.status == WebinarStatus::Scheduled
                    && w.reminders_enabled
                    && from <= w.scheduled_at
                    && w.scheduled_at <= to
            })
            .cloned()
            .collect();
        due.sort_by_key(|w| (w.scheduled_at, w.id));
        Ok(due)
    }
}

#[derive(Default)]
pub struct InMemoryRegistrationRepository {
    registrations: Arc<RwLock<HashMap<Uuid, Registration>>>,
}

impl InMemoryRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert(&self, registration: Registration) {
        let mut registrations = self.registrations.write().await;
        registrations.insert(registration.id, registration);
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrationRepository {
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Registration>> {
        let registrations = self.registrations.read().await;
        Ok(registrations.get(&id).cloned())
    }

    async fn list_registered(&self, webinar_id: Uuid) -> anyhow::Result<Vec<Registration>> {
        let registrations = self.registrations.read().await;
        let mut registered: Vec<Registration> = registrations
            .values()
            .filter(|r| r.webinar_id == webinar_id && r.status == RegistrationStatus::Registered)
            .cloned()
            .collect();
        registered.sort_by_key(|r| (r.registered_at, r.id));
        Ok(registered)
    }
}
