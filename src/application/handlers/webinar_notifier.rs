use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    application::services::{
        dispatch::{EmailDispatchService, SendEmailRequest},
        webinar_mail::{ComposedEmail, WebinarMailComposer},
    },
    domain::{
        models::{DeliveryLogRecord, DeliveryResult, EmailCategory, Registration, Webinar},
        repositories::DeliveryLogRepository,
    },
};

/// Sends the lifecycle emails of one webinar registration and records every attempt.
pub struct WebinarNotificationHandler {
    dispatch: Arc<EmailDispatchService>,
    log_repo: Arc<dyn DeliveryLogRepository>,
    composer: WebinarMailComposer,
}

impl WebinarNotificationHandler {
    pub fn new(
        dispatch: Arc<EmailDispatchService>,
        log_repo: Arc<dyn DeliveryLogRepository>,
        composer: WebinarMailComposer,
    ) -> Self {
        Self {
            dispatch,
            log_repo,
            composer,
        }
    }

    pub async fn send_registration_confirmation(
        &self,
        webinar: &Webinar,
        registration: &Registration,
    ) -> DeliveryResult {
        let email = self.composer.confirmation(webinar, registration);
        self.notify(webinar, registration, EmailCategory::Confirmation, email)
            .await
    }

    pub async fn send_reminder_24h(
        &self,
        webinar: &Webinar,
        registration: &Registration,
    ) -> DeliveryResult {
        let email = self.composer.reminder_24h(webinar, registration);
        self.notify(webinar, registration, EmailCategory::Reminder24h, email)
            .await
    }

    pub async fn send_reminder_1h(
        &self,
        webinar: &Webinar,
        registration: &Registration,
    ) -> DeliveryResult {
        let email = self.composer.reminder_1h(webinar, registration);
        self.notify(webinar, registration, EmailCategory::Reminder1h, email)
            .await
    }

    pub async fn send_thank_you_with_recording(
        &self,
        webinar: &Webinar,
        registration: &Registration,
        recording_url: Option<&str>,
    ) -> DeliveryResult {
        let email = self.composer.thank_you(webinar, registration, recording_url);
        self.notify(webinar, registration, EmailCategory::ThankYou, email)
            .await
    }

    /// The attempt is logged whatever the outcome. A failed log write is reported and swallowed.
    async fn notify(
        &self,
        webinar: &Webinar,
        registration: &Registration,
        category: EmailCategory,
        email: ComposedEmail,
    ) -> DeliveryResult {
        let result = self
            .dispatch
            .send_email(SendEmailRequest {
                to: registration.email.clone(),
                subject: email.subject.clone(),
                html_body: email.html_body,
                from_name: None,
                from_address: None,
                reply_to: None,
            })
            .await;

        if result.success {
            info!(
                webinar_id = %webinar.id,
                recipient = %registration.email,
                category = category.as_str(),
                provider = result.provider.as_str(),
                "webinar email sent"
            );
        } else {
            warn!(
                webinar_id = %webinar.id,
                recipient = %registration.email,
                category = category.as_str(),
                provider = result.provider.as_str(),
                error = result.error.as_deref().unwrap_or_default(),
                "webinar email failed"
            );
        }

        let record = DeliveryLogRecord::from_result(
            Some(webinar.id),
            &registration.email,
            &email.subject,
            category,
            &result,
        );
        if let Err(err) = self.log_repo.insert(record).await {
            error!(
                webinar_id = %webinar.id,
                recipient = %registration.email,
                category = category.as_str(),
                error = %err,
                "failed to record delivery attempt"
            );
        }

        result
    }
}
