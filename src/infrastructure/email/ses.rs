use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{Value, json};
use sha2::{Digest, Sha256};

use super::smtp::mailbox;
use crate::{
    application::services::email_provider::EmailProvider,
    domain::{
        errors::DeliveryError,
        models::{EmailMessage, ProviderKind},
    },
};

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_AWS_REGION: &str = "us-east-1";
const SEND_EMAIL_PATH: &str = "/v2/email/outbound-emails";
const SERVICE: &str = "ses";

#[derive(Debug, Clone)]
pub struct SesConfig {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub region: String,
    /// Overrides the regional endpoint, e.g. for local SES emulators.
    pub endpoint: Option<String>,
}

/// Amazon SES v2 `SendEmail` over plain HTTPS with SigV4 request signing.
pub struct SesEmailProvider {
    client: Client,
    config: SesConfig,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    #[serde(rename = "MessageId")]
    message_id: Option<String>,
}

impl SesEmailProvider {
    pub fn new(config: SesConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        match &self.config.endpoint {
            Some(endpoint) if !endpoint.trim().is_empty() => {
                endpoint.trim_end_matches('/').to_string()
            }
            _ => format!("https://email.{}.amazonaws.com", self.config.region),
        }
    }
}

#[async_trait]
impl EmailProvider for SesEmailProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ses
    }

    async fn deliver(&self, message: &EmailMessage) -> Result<Option<String>, DeliveryError> {
        let access_key_id = required(&self.config.access_key_id, "AWS_ACCESS_KEY_ID")?;
        let secret_access_key = required(&self.config.secret_access_key, "AWS_SECRET_ACCESS_KEY")?;

        let url = format!("{}{SEND_EMAIL_PATH}", self.endpoint());
        let parsed = Url::parse(&url).map_err(|err| DeliveryError::Build(err.to_string()))?;
        let host = match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => return Err(DeliveryError::Build(format!("endpoint has no host: {url}"))),
        };

        let body = serde_json::to_vec(&request_body(message)?)
            .map_err(|err| DeliveryError::Build(err.to_string()))?;
        let signed = sign_request(
            &SigningParams {
                access_key_id,
                secret_access_key,
                region: &self.config.region,
                host: &host,
                path: parsed.path(),
            },
            &body,
            Utc::now(),
        )?;

        let response = self
            .client
            .post(parsed)
            .header("Content-Type", "application/json")
            .header("x-amz-date", &signed.amz_date)
            .header("Authorization", &signed.authorization)
            .body(body)
            .send()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        if status.is_success() {
            let parsed: SendEmailResponse = serde_json::from_str(&text)
                .map_err(|err| DeliveryError::Transport(format!("unreadable SES response: {err}")))?;
            return Ok(parsed.message_id);
        }

        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            reason: error_message(&text),
        })
    }
}

fn required<'a>(value: &'a Option<String>, key: &'static str) -> Result<&'a str, DeliveryError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(DeliveryError::MissingConfig(key))
}

fn request_body(message: &EmailMessage) -> Result<Value, DeliveryError> {
    // RFC 5322 quoting for display names with specials
    let from = mailbox(Some(&message.from_name), &message.from_address)?.to_string();
    let mut body = json!({
        "FromEmailAddress": from,
        "Destination": { "ToAddresses": [message.to] },
        "Content": {
            "Simple": {
                "Subject": { "Data": message.subject, "Charset": "UTF-8" },
                "Body": { "Html": { "Data": message.html_body, "Charset": "UTF-8" } },
            }
        },
    });
    if let Some(reply_to) = &message.reply_to {
        body["ReplyToAddresses"] = json!([reply_to]);
    }
    Ok(body)
}

/// SES errors carry `message` (sometimes `Message`); fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("Message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

pub struct SigningParams<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub region: &'a str,
    pub host: &'a str,
    pub path: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub amz_date: String,
    pub authorization: String,
}

/// AWS Signature Version 4 for a JSON `POST` without query string.
pub fn sign_request(
    params: &SigningParams<'_>,
    body: &[u8],
    now: DateTime<Utc>,
) -> Result<SignedHeaders, DeliveryError> {
    let date_stamp = now.format("%Y%m%d").to_string();
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();

    let payload_hash = hex::encode(Sha256::digest(body));
    let signed_headers = "content-type;host;x-amz-date";
    let canonical_headers = format!(
        "content-type:application/json\nhost:{}\nx-amz-date:{amz_date}\n",
        params.host
    );
    let canonical_request = format!(
        "POST\n{}\n\n{canonical_headers}\n{signed_headers}\n{payload_hash}",
        params.path
    );

    let credential_scope = format!("{date_stamp}/{}/{SERVICE}/aws4_request", params.region);
    let canonical_hash = hex::encode(Sha256::digest(canonical_request.as_bytes()));
    let string_to_sign =
        format!("AWS4-HMAC-SHA256\n{amz_date}\n{credential_scope}\n{canonical_hash}");

    let signing_key =
        derive_signing_key(params.secret_access_key, &date_stamp, params.region, SERVICE)?;
    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);

    Ok(SignedHeaders {
        authorization: format!(
            "AWS4-HMAC-SHA256 Credential={}/{credential_scope}, SignedHeaders={signed_headers}, Signature={signature}",
            params.access_key_id
        ),
        amz_date,
    })
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, DeliveryError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|err| DeliveryError::Build(err.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn derive_signing_key(
    secret: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, DeliveryError> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn params() -> SigningParams<'static> {
        SigningParams {
            access_key_id: "AKIDEXAMPLE",
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            region: "eu-west-1",
            host: "email.eu-west-1.amazonaws.com",
            path: SEND_EMAIL_PATH,
        }
    }

    #[test]
    fn derives_documented_signing_key() {
        let key = derive_signing_key(
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            "20120215",
            "us-east-1",
            "iam",
        )
        .unwrap();
        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn authorization_header_has_scope_and_signature() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let signed = sign_request(&params(), b"{}", now).unwrap();

        assert_eq!(signed.amz_date, "20261018T093000Z");
        let prefix = "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20261018/eu-west-1/ses/aws4_request, \
                      SignedHeaders=content-type;host;x-amz-date, Signature=";
        assert!(signed.authorization.starts_with(prefix));
        let signature = &signed.authorization[prefix.len()..];
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn signature_depends_on_payload() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let a = sign_request(&params(), b"{\"a\":1}", now).unwrap();
        let b = sign_request(&params(), b"{\"a\":2}", now).unwrap();
        assert_eq!(a, sign_request(&params(), b"{\"a\":1}", now).unwrap());
        assert_ne!(a.authorization, b.authorization);
    }

    #[test]
    fn body_uses_display_name_and_optional_reply_to() {
        let message = EmailMessage {
            to: "ada@example.com".to_string(),
            subject: "Hi".to_string(),
            html_body: "<p>Hi</p>".to_string(),
            from_name: "eFunnels".to_string(),
            from_address: "noreply@efunnels.local".to_string(),
            reply_to: None,
        };
        let body = request_body(&message).unwrap();

        assert_eq!(body["FromEmailAddress"], "eFunnels <noreply@efunnels.local>");
        assert_eq!(body["Destination"]["ToAddresses"][0], "ada@example.com");
        assert!(body.get("ReplyToAddresses").is_none());
    }

    #[test]
    fn display_name_with_specials_is_quoted() {
        let message = EmailMessage {
            to: "ada@example.com".to_string(),
            subject: "Hi".to_string(),
            html_body: String::new(),
            from_name: "Acme, Inc".to_string(),
            from_address: "noreply@acme.example".to_string(),
            reply_to: Some("support@acme.example".to_string()),
        };
        let body = request_body(&message).unwrap();

        assert_eq!(body["FromEmailAddress"], "\"Acme, Inc\" <noreply@acme.example>");
        assert_eq!(body["ReplyToAddresses"][0], "support@acme.example");

        let bare = EmailMessage {
            from_name: String::new(),
            ..message.clone()
        };
        assert_eq!(
            request_body(&bare).unwrap()["FromEmailAddress"],
            "noreply@acme.example"
        );
    }

    #[test]
    fn malformed_sender_fails_before_signing() {
        let message = EmailMessage {
            to: "ada@example.com".to_string(),
            subject: "Hi".to_string(),
            html_body: String::new(),
            from_name: "Acme".to_string(),
            from_address: "not-an-address".to_string(),
            reply_to: None,
        };

        assert!(matches!(
            request_body(&message),
            Err(DeliveryError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn reads_error_message_variants() {
        assert_eq!(error_message(r#"{"message":"Email address is not verified."}"#), "Email address is not verified.");
        assert_eq!(error_message(r#"{"Message":"Throttled"}"#), "Throttled");
        assert_eq!(error_message("<html>502</html>"), "<html>502</html>");
    }

    #[tokio::test]
    async fn missing_credentials_are_a_failed_result() {
        let provider = SesEmailProvider::new(SesConfig {
            access_key_id: None,
            secret_access_key: Some("secret".to_string()),
            region: DEFAULT_AWS_REGION.to_string(),
            endpoint: None,
        });
        let message = EmailMessage {
            to: "ada@example.com".to_string(),
            subject: "Hi".to_string(),
            html_body: String::new(),
            from_name: String::new(),
            from_address: "noreply@efunnels.local".to_string(),
            reply_to: None,
        };

        let result = provider.send(&message).await;

        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("AWS_ACCESS_KEY_ID is not configured")
        );
    }
}
