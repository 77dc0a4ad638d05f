use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use tracing::debug;

use crate::{
    application::services::email_provider::EmailProvider,
    domain::{
        errors::DeliveryError,
        models::{EmailMessage, ProviderKind},
    },
};

pub const DEFAULT_SMTP_PORT: u16 = 587;
const IMPLICIT_TLS_PORT: u16 = 465;
const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Direct SMTP relay. Every message gets its own session, closed once the send returns.
pub struct SmtpEmailProvider {
    config: SmtpConfig,
}

impl SmtpEmailProvider {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, DeliveryError> {
        let host = required(&self.config.host, "SMTP_HOST")?;
        let username = required(&self.config.username, "SMTP_USERNAME")?;
        let password = required(&self.config.password, "SMTP_PASSWORD")?;

        let builder = if self.config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        Ok(builder
            .port(self.config.port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .timeout(Some(SMTP_TIMEOUT))
            .build())
    }
}

#[async_trait]
impl EmailProvider for SmtpEmailProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Smtp
    }

    async fn deliver(&self, message: &EmailMessage) -> Result<Option<String>, DeliveryError> {
        let transport = self.transport()?;
        let email = build_message(message)?;

        let response = transport
            .send(email)
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;
        debug!(
            recipient = %message.to,
            code = %response.code(),
            "smtp relay accepted message"
        );

        Ok(Some(format!("smtp-{}", Utc::now().timestamp_millis())))
    }
}

fn required<'a>(value: &'a Option<String>, key: &'static str) -> Result<&'a str, DeliveryError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or(DeliveryError::MissingConfig(key))
}

pub(crate) fn mailbox(name: Option<&str>, address: &str) -> Result<Mailbox, DeliveryError> {
    let parsed = address
        .trim()
        .parse::<Address>()
        .map_err(|err| DeliveryError::InvalidAddress {
            address: address.to_string(),
            reason: err.to_string(),
        })?;
    Ok(Mailbox::new(
        name.filter(|n| !n.is_empty()).map(str::to_string),
        parsed,
    ))
}

pub fn build_message(message: &EmailMessage) -> Result<Message, DeliveryError> {
    let mut builder = Message::builder()
        .from(mailbox(Some(&message.from_name), &message.from_address)?)
        .to(mailbox(None, &message.to)?)
        .subject(message.subject.as_str());
    if let Some(reply_to) = &message.reply_to {
        builder = builder.reply_to(mailbox(None, reply_to)?);
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            plain_text(&message.html_body),
            message.html_body.clone(),
        ))
        .map_err(|err| DeliveryError::Build(err.to_string()))
}

/// Text alternative of an HTML body: tags dropped, block ends become line breaks.
pub fn plain_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut chars = html.chars();
    while let Some(c) = chars.next() {
        if c != '<' {
            text.push(c);
            continue;
        }
        let tag: String = chars.by_ref().take_while(|&c| c != '>').collect();
        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let closing = tag.starts_with('/');
        match name.as_str() {
            "br" | "hr" => text.push('\n'),
            "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "div" | "li" | "tr" if closing => {
                text.push('\n')
            }
            _ => {}
        }
    }

    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
