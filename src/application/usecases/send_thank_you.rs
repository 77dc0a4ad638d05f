use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    application::handlers::webinar_notifier::WebinarNotificationHandler,
    domain::{
        errors::DomainError,
        models::RecipientDelivery,
        repositories::{RegistrationRepository, WebinarRepository},
    },
};

pub struct SendThankYouUseCase {
    webinar_repo: Arc<dyn WebinarRepository>,
    registration_repo: Arc<dyn RegistrationRepository>,
    notifier: Arc<WebinarNotificationHandler>,
}

pub struct SendThankYouRequest {
    pub webinar_id: Uuid,
    /// Overrides the recording stored on the webinar.
    pub recording_url: Option<String>,
}

impl SendThankYouUseCase {
    pub fn new(
        webinar_repo: Arc<dyn WebinarRepository>,
        registration_repo: Arc<dyn RegistrationRepository>,
        notifier: Arc<WebinarNotificationHandler>,
    ) -> Self {
        Self {
            webinar_repo,
            registration_repo,
            notifier,
        }
    }

    pub async fn execute(
        &self,
        request: SendThankYouRequest,
    ) -> anyhow::Result<Vec<RecipientDelivery>> {
        let webinar = self
            .webinar_repo
            .get(request.webinar_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("webinar {}", request.webinar_id)))?;

        let recording_url = request
            .recording_url
            .filter(|url| !url.trim().is_empty())
            .or_else(|| webinar.recording_url.clone());

        let registrations = self.registration_repo.list_registered(webinar.id).await?;
        let mut results = Vec::with_capacity(registrations.len());
        for registration in &registrations {
            let result = self
                .notifier
                .send_thank_you_with_recording(&webinar, registration, recording_url.as_deref())
                .await;
            results.push(RecipientDelivery {
                email: registration.email.clone(),
                result,
            });
        }

        info!(
            webinar_id = %webinar.id,
            recipients = results.len(),
            with_recording = recording_url.is_some(),
            "thank-you emails sent"
        );
        Ok(results)
    }
}
