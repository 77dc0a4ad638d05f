use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Casual,
    Urgent,
    Persuasive,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Casual => "casual",
            Tone::Urgent => "urgent",
            Tone::Persuasive => "persuasive",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmailPurpose {
    Welcome,
    Promotional,
    Newsletter,
    #[default]
    General,
}

impl EmailPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailPurpose::Welcome => "welcome",
            EmailPurpose::Promotional => "promotional",
            EmailPurpose::Newsletter => "newsletter",
            EmailPurpose::General => "general",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmailLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl EmailLength {
    pub fn describe(&self) -> &'static str {
        match self {
            EmailLength::Short => "short (under 100 words)",
            EmailLength::Medium => "medium-length (150 to 250 words)",
            EmailLength::Long => "long-form (300 to 500 words)",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmailContentRequest {
    pub prompt: String,
    pub tone: Tone,
    pub purpose: EmailPurpose,
    pub length: EmailLength,
    pub include_cta: bool,
}

/// Where a piece of copy came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CopySource {
    Generated,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedEmailContent {
    pub subject: String,
    pub content: String,
    pub preview_text: String,
    pub source: CopySource,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubjectSuggestions {
    pub alternatives: Vec<String>,
    pub source: CopySource,
}
