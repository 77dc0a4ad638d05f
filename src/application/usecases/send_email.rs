use std::sync::Arc;

use uuid::Uuid;

use crate::{
    application::services::dispatch::{EmailDispatchService, SendEmailRequest},
    domain::{
        errors::DomainError,
        models::{DeliveryLogRecord, DeliveryResult, EmailCategory},
        repositories::DeliveryLogRepository,
    },
};

pub struct SendEmailUseCase {
    dispatch: Arc<EmailDispatchService>,
    log_repo: Arc<dyn DeliveryLogRepository>,
}

pub struct SendEmailCommand {
    pub entity_id: Option<Uuid>,
    pub email: SendEmailRequest,
}

impl SendEmailUseCase {
    pub fn new(
        dispatch: Arc<EmailDispatchService>,
        log_repo: Arc<dyn DeliveryLogRepository>,
    ) -> Self {
        Self { dispatch, log_repo }
    }

    pub async fn execute(&self, command: SendEmailCommand) -> anyhow::Result<DeliveryResult> {
        validate_recipient(&command.email.to)?;

        let recipient = command.email.to.clone();
        let subject = command.email.subject.clone();
        let result = self.dispatch.send_email(command.email).await;

        self.log_repo
            .insert(DeliveryLogRecord::from_result(
                command.entity_id,
                &recipient,
                &subject,
                EmailCategory::Transactional,
                &result,
            ))
            .await?;

        Ok(result)
    }
}

pub(crate) fn validate_recipient(address: &str) -> Result<(), DomainError> {
    let address = address.trim();
    match address.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(DomainError::Validation(format!(
            "invalid recipient address: {address:?}"
        ))),
    }
}
