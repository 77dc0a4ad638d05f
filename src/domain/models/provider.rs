use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Mock,
    Sendgrid,
    Smtp,
    Ses,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Mock => "mock",
            ProviderKind::Sendgrid => "sendgrid",
            ProviderKind::Smtp => "smtp",
            ProviderKind::Ses => "ses",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "mock" => Some(ProviderKind::Mock),
            "sendgrid" => Some(ProviderKind::Sendgrid),
            "smtp" => Some(ProviderKind::Smtp),
            "ses" => Some(ProviderKind::Ses),
            _ => None,
        }
    }
}
