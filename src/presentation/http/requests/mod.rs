use std::collections::HashMap;

use poem_openapi::Object;
use uuid::Uuid;

use crate::presentation::models::{EmailLengthKind, EmailPurposeKind, ToneKind};

#[derive(Object, Debug)]
pub struct SendEmailRequestDto {
    #[oai(validator(min_length = 3))]
    pub to: String,
    #[oai(validator(min_length = 1, max_length = 998))]
    pub subject: String,
    pub html_body: String,
    pub from_name: Option<String>,
    pub from_address: Option<String>,
    pub reply_to: Option<String>,
    /// Campaign or other entity the delivery log row is correlated with.
    pub entity_id: Option<Uuid>,
}

#[derive(Object, Debug)]
pub struct BulkRecipientDto {
    pub email: String,
    #[oai(default)]
    pub template_vars: HashMap<String, String>,
}

#[derive(Object, Debug)]
pub struct BulkEmailRequestDto {
    pub recipients: Vec<BulkRecipientDto>,
    #[oai(validator(min_length = 1, max_length = 998))]
    pub subject: String,
    /// Shared body; `{{key}}` is replaced with each recipient's `template_vars[key]`.
    pub html_body: String,
    pub from_name: Option<String>,
    pub from_address: Option<String>,
    pub reply_to: Option<String>,
    pub entity_id: Option<Uuid>,
}

#[derive(Object, Debug)]
pub struct RenderEmailRequestDto {
    /// Ordered content blocks, each tagged by `type`.
    pub blocks: Vec<serde_json::Value>,
}

#[derive(Object, Debug, Default)]
pub struct ThankYouRequestDto {
    /// Falls back to the recording stored on the webinar.
    pub recording_url: Option<String>,
}

#[derive(Object, Debug)]
pub struct EmailContentRequestDto {
    #[oai(validator(min_length = 1, max_length = 2000))]
    pub prompt: String,
    #[oai(default)]
    pub tone: ToneKind,
    #[oai(default)]
    pub purpose: EmailPurposeKind,
    #[oai(default)]
    pub length: EmailLengthKind,
    #[oai(default = "default_include_cta")]
    pub include_cta: bool,
}

fn default_include_cta() -> bool {
    true
}

#[derive(Object, Debug)]
pub struct SubjectLineRequestDto {
    #[oai(validator(min_length = 1, max_length = 998))]
    pub subject: String,
    pub context: Option<String>,
}
