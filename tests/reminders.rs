mod common;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use common::{APP_BASE_URL, Harness, RecordingProvider, webinar};
use mailing::{
    application::usecases::process_reminders::{
        ProcessRemindersUseCase, ReminderConfig, ReminderSummary,
    },
    domain::{
        models::{DeliveryStatus, EmailCategory, RegistrationStatus, Webinar, WebinarStatus},
        repositories::{DeliveryLogRepository, WebinarRepository},
    },
    infrastructure::repositories::in_memory::InMemoryWebinarRepository,
};
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
}

fn usecase(harness: &Harness, dedupe: bool) -> ProcessRemindersUseCase {
    ProcessRemindersUseCase::new(
        harness.webinars.clone(),
        harness.registrations.clone(),
        harness.logs.clone(),
        harness.notifier.clone(),
        ReminderConfig { dedupe },
    )
}

#[tokio::test]
async fn webinar_exactly_a_day_out_gets_one_day_before_reminder() {
    let harness = Harness::new(RecordingProvider::succeeding());
    let webinar = harness.add_webinar(now() + Duration::hours(24)).await;
    harness.register(&webinar, "ada@example.com").await;

    let summary = usecase(&harness, false).execute_at(now()).await.unwrap();

    assert_eq!(
        summary,
        ReminderSummary {
            reminders_24h: 1,
            reminders_1h: 0,
            emails_sent: 1,
            emails_failed: 0,
            emails_skipped: 0,
            windows_failed: 0,
        }
    );

    let (logs, has_more) = harness.logs.list(None, None, None).await.unwrap();
    assert!(!has_more);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].category, EmailCategory::Reminder24h);
    assert_eq!(logs[0].status, DeliveryStatus::Sent);
    assert_eq!(logs[0].entity_id, Some(webinar.id));
    assert_eq!(logs[0].recipient, "ada@example.com");
    assert!(logs[0].sent_at.is_some());

    let messages = harness.provider.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].subject, "Reminder: Funnel Masterclass is tomorrow");
}

#[tokio::test]
async fn hour_before_reminder_links_to_the_join_page() {
    let harness = Harness::new(RecordingProvider::succeeding());
    let webinar = harness.add_webinar(now() + Duration::minutes(50)).await;
    let registration = harness.register(&webinar, "ada@example.com").await;

    let summary = usecase(&harness, false).execute_at(now()).await.unwrap();

    assert_eq!(summary.reminders_24h, 0);
    assert_eq!(summary.reminders_1h, 1);
    assert_eq!(summary.emails_sent, 1);

    let messages = harness.provider.messages();
    let join_link = format!(
        "{APP_BASE_URL}/webinars/{}/join?registration={}",
        webinar.id, registration.id
    );
    assert!(messages[0].html_body.contains(&join_link));

    let (logs, _) = harness.logs.list(Some(webinar.id), None, None).await.unwrap();
    assert_eq!(logs[0].category, EmailCategory::Reminder1h);
}

#[tokio::test]
async fn window_edges_are_inclusive() {
    let harness = Harness::new(RecordingProvider::succeeding());
    let inside = harness
        .add_webinar(now() + Duration::hours(24) + Duration::minutes(15))
        .await;
    harness.register(&inside, "inside@example.com").await;
    let outside = harness
        .add_webinar(now() + Duration::hours(24) + Duration::minutes(16))
        .await;
    harness.register(&outside, "outside@example.com").await;

    let summary = usecase(&harness, false).execute_at(now()).await.unwrap();

    assert_eq!(summary.reminders_24h, 1);
    let recipients: Vec<String> = harness
        .provider
        .messages()
        .into_iter()
        .map(|m| m.to)
        .collect();
    assert_eq!(recipients, vec!["inside@example.com".to_string()]);
}

#[tokio::test]
async fn repeated_passes_resend_without_dedupe() {
    let harness = Harness::new(RecordingProvider::succeeding());
    let webinar = harness.add_webinar(now() + Duration::hours(24)).await;
    harness.register(&webinar, "ada@example.com").await;
    let usecase = usecase(&harness, false);

    usecase.execute_at(now()).await.unwrap();
    let second = usecase
        .execute_at(now() + Duration::minutes(5))
        .await
        .unwrap();

    assert_eq!(second.emails_sent, 1);
    assert_eq!(harness.provider.messages().len(), 2);
    let (logs, _) = harness.logs.list(None, None, None).await.unwrap();
    assert_eq!(logs.len(), 2);
}

#[tokio::test]
async fn dedupe_skips_recipients_already_reminded() {
    let harness = Harness::new(RecordingProvider::succeeding());
    let webinar = harness.add_webinar(now() + Duration::hours(24)).await;
    harness.register(&webinar, "ada@example.com").await;
    let usecase = usecase(&harness, true);

    usecase.execute_at(now()).await.unwrap();
    let second = usecase
        .execute_at(now() + Duration::minutes(5))
        .await
        .unwrap();

    assert_eq!(second.reminders_24h, 1);
    assert_eq!(second.emails_sent, 0);
    assert_eq!(second.emails_skipped, 1);
    assert_eq!(harness.provider.messages().len(), 1);
}

#[tokio::test]
async fn failed_delivery_is_logged_without_sent_at() {
    let harness = Harness::new(RecordingProvider::failing());
    let webinar = harness.add_webinar(now() + Duration::hours(1)).await;
    harness.register(&webinar, "ada@example.com").await;

    let summary = usecase(&harness, false).execute_at(now()).await.unwrap();

    assert_eq!(summary.emails_sent, 0);
    assert_eq!(summary.emails_failed, 1);

    let (logs, _) = harness.logs.list(None, None, None).await.unwrap();
    assert_eq!(logs[0].status, DeliveryStatus::Failed);
    assert!(logs[0].sent_at.is_none());
    assert!(
        logs[0]
            .error_message
            .as_deref()
            .unwrap()
            .contains("connection refused")
    );
}

#[tokio::test]
async fn one_rejected_recipient_does_not_stop_the_pass() {
    let harness = Harness::new(RecordingProvider::rejecting(&["bounce@example.com"]));
    let tomorrow = harness.add_webinar(now() + Duration::hours(24)).await;
    harness.register(&tomorrow, "bounce@example.com").await;
    harness.register(&tomorrow, "ada@example.com").await;
    let soon = harness.add_webinar(now() + Duration::hours(1)).await;
    harness.register(&soon, "grace@example.com").await;

    let summary = usecase(&harness, false).execute_at(now()).await.unwrap();

    assert_eq!(summary.reminders_24h, 1);
    assert_eq!(summary.reminders_1h, 1);
    assert_eq!(summary.emails_sent, 2);
    assert_eq!(summary.emails_failed, 1);
    assert_eq!(harness.provider.messages().len(), 3);

    let (logs, _) = harness.logs.list(None, None, None).await.unwrap();
    assert_eq!(logs.len(), 3);
    for log in &logs {
        if log.recipient == "bounce@example.com" {
            assert_eq!(log.status, DeliveryStatus::Failed);
            assert!(log.sent_at.is_none());
            assert!(log.error_message.as_deref().unwrap().contains("550"));
        } else {
            assert_eq!(log.status, DeliveryStatus::Sent);
            assert!(log.sent_at.is_some());
        }
    }
    let sent: Vec<&str> = logs
        .iter()
        .filter(|log| log.sent_at.is_some())
        .map(|log| log.recipient.as_str())
        .collect();
    assert_eq!(sent.len(), 2);
    assert!(sent.contains(&"ada@example.com"));
    assert!(sent.contains(&"grace@example.com"));
}

#[tokio::test]
async fn inactive_webinars_and_cancelled_registrations_are_left_alone() {
    let harness = Harness::new(RecordingProvider::succeeding());
    let start = now() + Duration::hours(24);

    let mut muted = webinar(start);
    muted.reminders_enabled = false;
    harness.webinars.upsert(muted.clone()).await;
    harness.register(&muted, "muted@example.com").await;

    let mut cancelled = webinar(start);
    cancelled.status = WebinarStatus::Cancelled;
    harness.webinars.upsert(cancelled.clone()).await;
    harness.register(&cancelled, "cancelled@example.com").await;

    let active = harness.add_webinar(start).await;
    harness.register(&active, "ada@example.com").await;
    let mut dropped = harness.register(&active, "dropped@example.com").await;
    dropped.status = RegistrationStatus::Cancelled;
    harness.registrations.upsert(dropped).await;

    let summary = usecase(&harness, false).execute_at(now()).await.unwrap();

    assert_eq!(summary.reminders_24h, 1);
    assert_eq!(summary.emails_sent, 1);
    let recipients: Vec<String> = harness
        .provider
        .messages()
        .into_iter()
        .map(|m| m.to)
        .collect();
    assert_eq!(recipients, vec!["ada@example.com".to_string()]);
}

#[tokio::test]
async fn webinar_without_registrants_still_counts_as_processed() {
    let harness = Harness::new(RecordingProvider::succeeding());
    harness.add_webinar(now() + Duration::hours(24)).await;

    let summary = usecase(&harness, false).execute_at(now()).await.unwrap();

    assert_eq!(summary.reminders_24h, 1);
    assert_eq!(summary.emails_sent, 0);
    assert!(harness.provider.messages().is_empty());
}

/// Fails window queries that start after `fail_from`; everything else hits the store.
struct FlakyWebinars {
    inner: Arc<InMemoryWebinarRepository>,
    fail_from: DateTime<Utc>,
}

#[async_trait]
impl WebinarRepository for FlakyWebinars {
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Webinar>> {
        self.inner.get(id).await
    }

    async fn find_due_for_reminder(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Webinar>> {
        if from > self.fail_from {
            anyhow::bail!("connection reset by peer");
        }
        self.inner.find_due_for_reminder(from, to).await
    }
}

#[tokio::test]
async fn failed_day_before_query_still_sends_hour_before_reminders() {
    let harness = Harness::new(RecordingProvider::succeeding());
    let tomorrow = harness.add_webinar(now() + Duration::hours(24)).await;
    harness.register(&tomorrow, "ada@example.com").await;
    let soon = harness.add_webinar(now() + Duration::hours(1)).await;
    harness.register(&soon, "grace@example.com").await;

    let usecase = ProcessRemindersUseCase::new(
        Arc::new(FlakyWebinars {
            inner: harness.webinars.clone(),
            fail_from: now() + Duration::hours(12),
        }),
        harness.registrations.clone(),
        harness.logs.clone(),
        harness.notifier.clone(),
        ReminderConfig::default(),
    );

    let summary = usecase.execute_at(now()).await.unwrap();

    assert_eq!(summary.windows_failed, 1);
    assert_eq!(summary.reminders_24h, 0);
    assert_eq!(summary.reminders_1h, 1);
    assert_eq!(summary.emails_sent, 1);

    let recipients: Vec<String> = harness
        .provider
        .messages()
        .into_iter()
        .map(|m| m.to)
        .collect();
    assert_eq!(recipients, vec!["grace@example.com".to_string()]);

    let (logs, _) = harness.logs.list(None, None, None).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].category, EmailCategory::Reminder1h);
}
