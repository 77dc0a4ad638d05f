use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use crate::{
    application::services::email_provider::EmailProvider,
    domain::{
        errors::DeliveryError,
        models::{EmailMessage, ProviderKind},
    },
};

pub const DEFAULT_SENDGRID_BASE_URL: &str = "https://api.sendgrid.com";

#[derive(Debug, Clone)]
pub struct SendgridConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

/// SendGrid v3 mail send. One request per message, no retries.
pub struct SendgridEmailProvider {
    client: Client,
    config: SendgridConfig,
}

impl SendgridEmailProvider {
    pub fn new(config: SendgridConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v3/mail/send", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EmailProvider for SendgridEmailProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Sendgrid
    }

    async fn deliver(&self, message: &EmailMessage) -> Result<Option<String>, DeliveryError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(DeliveryError::MissingConfig("SENDGRID_API_KEY"))?;

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request_body(message))
            .send()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::ACCEPTED {
            let message_id = response
                .headers()
                .get("x-message-id")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            return Ok(message_id);
        }

        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            reason: error_reason(&body),
        })
    }
}

fn request_body(message: &EmailMessage) -> Value {
    let mut body = json!({
        "personalizations": [{ "to": [{ "email": message.to }] }],
        "from": { "email": message.from_address, "name": message.from_name },
        "subject": message.subject,
        "content": [{ "type": "text/html", "value": message.html_body }],
    });
    if let Some(reply_to) = &message.reply_to {
        body["reply_to"] = json!({ "email": reply_to });
    }
    body
}

/// SendGrid reports `{"errors": [{"message": ...}]}`; anything else is passed through.
fn error_reason(body: &str) -> String {
    let messages: Vec<String> = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("errors").and_then(Value::as_array).cloned())
        .unwrap_or_default()
        .iter()
        .filter_map(|error| error.get("message").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    if messages.is_empty() {
        body.trim().to_string()
    } else {
        messages.join("; ")
    }
}
