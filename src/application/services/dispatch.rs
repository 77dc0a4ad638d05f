use std::collections::HashMap;
use std::sync::Arc;

use futures::{StreamExt, stream};
use tracing::debug;

use crate::{
    application::services::email_provider::EmailProvider,
    domain::{
        models::{DeliveryResult, EmailMessage, ProviderKind, RecipientDelivery},
        value_objects::BulkRecipient,
    },
};

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub from_name: String,
    pub from_address: String,
    pub bulk_concurrency: usize,
}

#[derive(Debug, Clone)]
pub struct SendEmailRequest {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub from_name: Option<String>,
    pub from_address: Option<String>,
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BulkEmailRequest {
    pub recipients: Vec<BulkRecipient>,
    pub subject: String,
    pub html_body: String,
    pub from_name: Option<String>,
    pub from_address: Option<String>,
    pub reply_to: Option<String>,
}

/// Single entry point for every outbound email, whatever provider is configured.
#[derive(Clone)]
pub struct EmailDispatchService {
    provider: Arc<dyn EmailProvider>,
    config: DispatchConfig,
}

impl EmailDispatchService {
    pub fn new(provider: Arc<dyn EmailProvider>, config: DispatchConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider.kind()
    }

    pub async fn send_email(&self, request: SendEmailRequest) -> DeliveryResult {
        let message = EmailMessage {
            to: request.to,
            subject: request.subject,
            html_body: request.html_body,
            from_name: request
                .from_name
                .unwrap_or_else(|| self.config.from_name.clone()),
            from_address: request
                .from_address
                .unwrap_or_else(|| self.config.from_address.clone()),
            reply_to: request.reply_to,
        };
        debug!(
            recipient = %message.to,
            provider = self.provider.kind().as_str(),
            "dispatching email"
        );
        self.provider.send(&message).await
    }

    /// Personalizes the shared body per recipient and sends each one.
    ///
    /// Results come back in input order, one per recipient; a failed recipient
    /// does not stop the others.
    pub async fn send_bulk(&self, request: BulkEmailRequest) -> Vec<RecipientDelivery> {
        let BulkEmailRequest {
            recipients,
            subject,
            html_body,
            from_name,
            from_address,
            reply_to,
        } = request;
        let concurrency = self.config.bulk_concurrency.max(1);

        stream::iter(recipients)
            .map(|recipient| {
                let single = SendEmailRequest {
                    to: recipient.email.clone(),
                    subject: subject.clone(),
                    html_body: substitute_template(&html_body, &recipient.template_vars),
                    from_name: from_name.clone(),
                    from_address: from_address.clone(),
                    reply_to: reply_to.clone(),
                };
                async move {
                    let result = self.send_email(single).await;
                    RecipientDelivery {
                        email: recipient.email,
                        result,
                    }
                }
            })
            .buffered(concurrency)
            .collect()
            .await
    }
}

/// Replaces every literal `{{key}}` whose key is in `vars`. Unknown keys stay verbatim.
/// Values are inserted as-is and never re-expanded.
pub fn substitute_template(template: &str, vars: &HashMap<String, String>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let replaced = after_open.find("}}").and_then(|end| {
            vars.get(&after_open[..end])
                .map(|value| (value, &after_open[end + 2..]))
        });

        match replaced {
            Some((value, remaining)) => {
                output.push_str(value);
                rest = remaining;
            }
            None => {
                // not a known placeholder; keep one brace and rescan from the next char
                output.push('{');
                rest = &rest[start + 1..];
            }
        }
    }

    output.push_str(rest);
    output
}
