use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::{
    application::handlers::webinar_notifier::WebinarNotificationHandler,
    domain::{
        models::{DeliveryResult, Registration, Webinar},
        repositories::{DeliveryLogRepository, RegistrationRepository, WebinarRepository},
        value_objects::ReminderKind,
    },
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReminderConfig {
    /// Skip recipients that already have a `sent` log of the same reminder category.
    pub dedupe: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReminderSummary {
    /// Webinars processed in the 24h bucket.
    pub reminders_24h: usize,
    /// Webinars processed in the 1h bucket.
    pub reminders_1h: usize,
    pub emails_sent: usize,
    pub emails_failed: usize,
    pub emails_skipped: usize,
    /// Reminder windows whose webinar query failed.
    pub windows_failed: usize,
}

pub struct ProcessRemindersUseCase {
    webinar_repo: Arc<dyn WebinarRepository>,
    registration_repo: Arc<dyn RegistrationRepository>,
    log_repo: Arc<dyn DeliveryLogRepository>,
    notifier: Arc<WebinarNotificationHandler>,
    config: ReminderConfig,
}

impl ProcessRemindersUseCase {
    pub fn new(
        webinar_repo: Arc<dyn WebinarRepository>,
        registration_repo: Arc<dyn RegistrationRepository>,
        log_repo: Arc<dyn DeliveryLogRepository>,
        notifier: Arc<WebinarNotificationHandler>,
        config: ReminderConfig,
    ) -> Self {
        Self {
            webinar_repo,
            registration_repo,
            log_repo,
            notifier,
            config,
        }
    }

    pub async fn execute(&self) -> anyhow::Result<ReminderSummary> {
        self.execute_at(Utc::now()).await
    }

    /// Runs one reminder pass as if the clock read `now`.
    ///
    /// Failures are logged and counted, never fatal: a failed window query skips
    /// that window only, and per-webinar and per-recipient failures skip just
    /// that webinar or recipient.
    pub async fn execute_at(&self, now: DateTime<Utc>) -> anyhow::Result<ReminderSummary> {
        let mut summary = ReminderSummary::default();

        for kind in [ReminderKind::DayBefore, ReminderKind::HourBefore] {
            let (from, to) = kind.window().bounds(now);
            let webinars = match self.webinar_repo.find_due_for_reminder(from, to).await {
                Ok(webinars) => webinars,
                Err(err) => {
                    error!(
                        category = kind.category().as_str(),
                        %from,
                        %to,
                        error = %err,
                        "failed to query reminder window, skipping"
                    );
                    summary.windows_failed += 1;
                    continue;
                }
            };
            debug!(
                category = kind.category().as_str(),
                %from,
                %to,
                webinars = webinars.len(),
                "reminder window evaluated"
            );

            for webinar in &webinars {
                let registrations = match self.registration_repo.list_registered(webinar.id).await
                {
                    Ok(registrations) => registrations,
                    Err(err) => {
                        error!(
                            webinar_id = %webinar.id,
                            category = kind.category().as_str(),
                            error = %err,
                            "failed to load registrations, skipping webinar"
                        );
                        continue;
                    }
                };

                for registration in &registrations {
                    if self.already_sent(kind, webinar, registration).await {
                        summary.emails_skipped += 1;
                        continue;
                    }
                    let result = self.send(kind, webinar, registration).await;
                    if result.success {
                        summary.emails_sent += 1;
                    } else {
                        summary.emails_failed += 1;
                    }
                }

                match kind {
                    ReminderKind::DayBefore => summary.reminders_24h += 1,
                    ReminderKind::HourBefore => summary.reminders_1h += 1,
                }
            }
        }

        info!(
            reminders_24h = summary.reminders_24h,
            reminders_1h = summary.reminders_1h,
            sent = summary.emails_sent,
            failed = summary.emails_failed,
            skipped = summary.emails_skipped,
            windows_failed = summary.windows_failed,
            "reminder pass finished"
        );
        Ok(summary)
    }

    async fn already_sent(
        &self,
        kind: ReminderKind,
        webinar: &Webinar,
        registration: &Registration,
    ) -> bool {
        if !self.config.dedupe {
            return false;
        }
        match self
            .log_repo
            .has_sent(webinar.id, &registration.email, kind.category())
            .await
        {
            Ok(sent) => sent,
            Err(err) => {
                // lookup errors never suppress a reminder
                warn!(
                    webinar_id = %webinar.id,
                    recipient = %registration.email,
                    category = kind.category().as_str(),
                    error = %err,
                    "dedupe lookup failed"
                );
                false
            }
        }
    }

    async fn send(
        &self,
        kind: ReminderKind,
        webinar: &Webinar,
        registration: &Registration,
    ) -> DeliveryResult {
        match kind {
            ReminderKind::DayBefore => self.notifier.send_reminder_24h(webinar, registration).await,
            ReminderKind::HourBefore => self.notifier.send_reminder_1h(webinar, registration).await,
        }
    }
}
