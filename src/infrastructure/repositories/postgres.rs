use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Pool, Postgres, Row, postgres::PgRow};
use uuid::Uuid;

use crate::domain::{
    models::{
        DeliveryLogRecord, DeliveryStatus, EmailCategory, ProviderKind, Registration,
        RegistrationStatus, Webinar, WebinarStatus,
    },
    repositories::{DeliveryLogRepository, RegistrationRepository, WebinarRepository},
};

use super::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};

pub type PgPool = Pool<Postgres>;

#[derive(Clone)]
pub struct PostgresDeliveryLogRepository {
    pool: PgPool,
}

impl PostgresDeliveryLogRepository {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

#[async_trait]
impl DeliveryLogRepository for PostgresDeliveryLogRepository {
    async fn insert(&self, record: DeliveryLogRecord) -> anyhow::Result<DeliveryLogRecord> {
        let row = sqlx::query(
            r#"
            INSERT INTO email_delivery_logs (
                id, entity_id, recipient, subject, status, category, provider,
                error_message, sent_at, created_at
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(record.entity_id)
        .bind(&record.recipient)
        .bind(&record.subject)
        .bind(record.status.as_str())
        .bind(record.category.as_str())
        .bind(record.provider.as_str())
        .bind(&record.error_message)
        .bind(record.sent_at)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await?;

        DeliveryLogRecord::try_from(row)
    }

    async fn list(
        &self,
        entity_id: Option<Uuid>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<(Vec<DeliveryLogRecord>, bool)> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT) as i64;
        let offset = offset.unwrap_or(0) as i64;

        // one extra row tells whether another page exists
        let rows = sqlx::query(
            r#"
            SELECT *
            FROM email_delivery_logs
            WHERE ($1::uuid IS NULL OR entity_id = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(entity_id)
        .bind(limit + 1)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let has_more = rows.len() > limit as usize;
        let logs = rows
            .into_iter()
            .take(limit as usize)
            .map(DeliveryLogRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((logs, has_more))
    }

    async fn has_sent(
        &self,
        entity_id: Uuid,
        recipient: &str,
        category: EmailCategory,
    ) -> anyhow::Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM email_delivery_logs
                WHERE entity_id = $1
                  AND recipient = $2
                  AND category = $3
                  AND status = 'sent'
            )
            "#,
        )
        .bind(entity_id)
        .bind(recipient)
        .bind(category.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}

#[derive(Clone)]
pub struct PostgresWebinarRepository {
    pool: PgPool,
}

impl PostgresWebinarRepository {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

#[async_trait]
impl WebinarRepository for PostgresWebinarRepository {
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Webinar>> {
        let record = sqlx::query_as::<_, WebinarRecord>(
            r#"
            SELECT id, title, description, presenter_name, scheduled_at, duration_minutes,
                   reminders_enabled, status, recording_url
            FROM webinars
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        record.map(|record| record.try_into()).transpose()
    }

    async fn find_due_for_reminder(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Webinar>> {
        let rows = sqlx::query_as::<_, WebinarRecord>(
            r#"
            SELECT id, title, description, presenter_name, scheduled_at, duration_minutes,
                   reminders_enabled, status, recording_url
            FROM webinars
            WHERE status = 'scheduled'
              AND reminders_enabled
              AND scheduled_at BETWEEN $1 AND $2
            ORDER BY scheduled_at, id
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(|record| record.try_into()).collect()
    }
}

#[derive(Clone)]
pub struct PostgresRegistrationRepository {
    pool: PgPool,
}

impl PostgresRegistrationRepository {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Registration>> {
        let record = sqlx::query_as::<_, RegistrationRecord>(
            r#"
            SELECT id, webinar_id, name, email, status, registered_at
            FROM webinar_registrations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        record.map(|record| record.try_into()).transpose()
    }

    async fn list_registered(&self, webinar_id: Uuid) -> anyhow::Result<Vec<Registration>> {
        let rows = sqlx::query_as::<_, RegistrationRecord>(
            r#"
            SELECT id, webinar_id, name, email, status, registered_at
            FROM webinar_registrations
            WHERE webinar_id = $1
              AND status = 'registered'
            ORDER BY registered_at, id
            "#,
        )
        .bind(webinar_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(|record| record.try_into()).collect()
    }
}

impl TryFrom<PgRow> for DeliveryLogRecord {
    type Error = anyhow::Error;

    fn try_from(row: PgRow) -> Result<Self, Self::Error> {
        let status_str: String = row.try_get("status")?;
        let status = DeliveryStatus::from_str(&status_str)
            .ok_or_else(|| anyhow::anyhow!("unknown delivery status {status_str}"))?;
        let category_str: String = row.try_get("category")?;
        let category = EmailCategory::from_str(&category_str)
            .ok_or_else(|| anyhow::anyhow!("unknown email category {category_str}"))?;
        let provider_str: String = row.try_get("provider")?;
        let provider = ProviderKind::from_str(&provider_str)
            .ok_or_else(|| anyhow::anyhow!("unknown email provider {provider_str}"))?;

        Ok(DeliveryLogRecord {
            id: row.try_get("id")?,
            entity_id: row.try_get("entity_id")?,
            recipient: row.try_get("recipient")?,
            subject: row.try_get("subject")?,
            status,
            category,
            provider,
            error_message: row.try_get("error_message")?,
            sent_at: row.try_get("sent_at")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[derive(FromRow)]
struct WebinarRecord {
    id: Uuid,
    title: String,
    description: Option<String>,
    presenter_name: String,
    scheduled_at: DateTime<Utc>,
    duration_minutes: i32,
    reminders_enabled: bool,
    status: String,
    recording_url: Option<String>,
}

impl TryFrom<WebinarRecord> for Webinar {
    type Error = anyhow::Error;

    fn try_from(value: WebinarRecord) -> Result<Self, Self::Error> {
        let status = WebinarStatus::from_str(&value.status)
            .ok_or_else(|| anyhow::anyhow!("unknown webinar status {}", value.status))?;
        let duration_minutes = u32::try_from(value.duration_minutes)
            .map_err(|_| anyhow::anyhow!("negative duration for webinar {}", value.id))?;
        Ok(Self {
            id: value.id,
            title: value.title,
            description: value.description.unwrap_or_default(),
            presenter_name: value.presenter_name,
            scheduled_at: value.scheduled_at,
            duration_minutes,
            reminders_enabled: value.reminders_enabled,
            status,
            recording_url: value.recording_url,
        })
    }
}

#[derive(FromRow)]
struct RegistrationRecord {
    id: Uuid,
    webinar_id: Uuid,
    name: String,
    email: String,
    status: String,
    registered_at: DateTime<Utc>,
}

impl TryFrom<RegistrationRecord> for Registration {
    type Error = anyhow::Error;

    fn try_from(value: RegistrationRecord) -> Result<Self, Self::Error> {
        let status = RegistrationStatus::from_str(&value.status)
            .ok_or_else(|| anyhow::anyhow!("unknown registration status {}", value.status))?;
        Ok(Self {
            id: value.id,
            webinar_id: value.webinar_id,
            name: value.name,
            email: value.email,
            status,
            registered_at: value.registered_at,
        })
    }
}
