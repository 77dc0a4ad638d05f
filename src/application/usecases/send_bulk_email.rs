use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::{
        services::dispatch::{BulkEmailRequest, EmailDispatchService},
        usecases::send_email::validate_recipient,
    },
    domain::{
        errors::DomainError,
        models::{DeliveryLogRecord, DeliveryResult, EmailCategory, RecipientDelivery},
        repositories::DeliveryLogRepository,
    },
};

pub const MAX_BULK_RECIPIENTS: usize = 1000;

pub struct SendBulkEmailUseCase {
    dispatch: Arc<EmailDispatchService>,
    log_repo: Arc<dyn DeliveryLogRepository>,
}

pub struct SendBulkEmailCommand {
    pub entity_id: Option<Uuid>,
    pub email: BulkEmailRequest,
}

#[derive(Debug, Clone)]
pub struct BulkSendSummary {
    pub results: Vec<RecipientDelivery>,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl SendBulkEmailUseCase {
    pub fn new(
        dispatch: Arc<EmailDispatchService>,
        log_repo: Arc<dyn DeliveryLogRepository>,
    ) -> Self {
        Self { dispatch, log_repo }
    }

    pub async fn execute(&self, command: SendBulkEmailCommand) -> anyhow::Result<BulkSendSummary> {
        validate_batch(&command.email)?;

        let entity_id = command.entity_id;
        let mut email = command.email;
        let subject = email.subject.clone();

        // malformed addresses fail on their own; the rest of the batch still goes out
        let mut rejected = Vec::new();
        let mut valid = Vec::with_capacity(email.recipients.len());
        for (index, recipient) in std::mem::take(&mut email.recipients)
            .into_iter()
            .enumerate()
        {
            match validate_recipient(&recipient.email) {
                Ok(()) => valid.push(recipient),
                Err(err) => {
                    warn!(
                        recipient = %recipient.email,
                        error = %err,
                        "skipping malformed recipient"
                    );
                    let result = DeliveryResult::failed(self.dispatch.provider(), err.to_string());
                    rejected.push((
                        index,
                        RecipientDelivery {
                            email: recipient.email,
                            result,
                        },
                    ));
                }
            }
        }
        email.recipients = valid;

        let mut results = if email.recipients.is_empty() {
            Vec::new()
        } else {
            self.dispatch.send_bulk(email).await
        };
        // ascending inserts restore input order
        for (index, delivery) in rejected {
            results.insert(index, delivery);
        }

        // a lost log row must not hide the results of sends that already happened
        for delivery in &results {
            let record = DeliveryLogRecord::from_result(
                entity_id,
                &delivery.email,
                &subject,
                EmailCategory::Campaign,
                &delivery.result,
            );
            if let Err(err) = self.log_repo.insert(record).await {
                error!(
                    recipient = %delivery.email,
                    category = EmailCategory::Campaign.as_str(),
                    error = %err,
                    "failed to record delivery attempt"
                );
            }
        }

        let successful = results.iter().filter(|d| d.result.success).count();
        let summary = BulkSendSummary {
            total: results.len(),
            successful,
            failed: results.len() - successful,
            results,
        };
        info!(
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            "bulk send finished"
        );
        Ok(summary)
    }
}

fn validate_batch(request: &BulkEmailRequest) -> Result<(), DomainError> {
    if request.recipients.is_empty() {
        return Err(DomainError::Validation(
            "at least one recipient is required".to_string(),
        ));
    }
    if request.recipients.len() > MAX_BULK_RECIPIENTS {
        return Err(DomainError::Validation(format!(
            "at most {MAX_BULK_RECIPIENTS} recipients per request, got {}",
            request.recipients.len()
        )));
    }
    Ok(())
}
