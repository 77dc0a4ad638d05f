use std::sync::Arc;

use uuid::Uuid;

use crate::{
    application::handlers::webinar_notifier::WebinarNotificationHandler,
    domain::{
        errors::DomainError,
        models::{DeliveryResult, Registration, Webinar},
        repositories::{RegistrationRepository, WebinarRepository},
    },
};

pub struct SendConfirmationUseCase {
    webinar_repo: Arc<dyn WebinarRepository>,
    registration_repo: Arc<dyn RegistrationRepository>,
    notifier: Arc<WebinarNotificationHandler>,
}

impl SendConfirmationUseCase {
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
        webinar_id: Uuid,
        registration_id: Uuid,
    ) -> anyhow::Result<DeliveryResult> {
        let (webinar, registration) = self.load(webinar_id, registration_id).await?;
        Ok(self
            .notifier
            .send_registration_confirmation(&webinar, &registration)
            .await)
    }

    async fn load(
        &self,
        webinar_id: Uuid,
        registration_id: Uuid,
    ) -> anyhow::Result<(Webinar, Registration)> {
        let webinar = self
            .webinar_repo
            .get(webinar_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("webinar {webinar_id}")))?;

        // a registration of another webinar is treated as absent
        let registration = self
            .registration_repo
            .get(registration_id)
            .await?
            .filter(|registration| registration.webinar_id == webinar.id)
            .ok_or_else(|| DomainError::NotFound(format!("registration {registration_id}")))?;

        Ok((webinar, registration))
    }
}
