use poem_openapi::Enum;

use crate::domain::models::{
    CopySource, DeliveryStatus, EmailCategory, EmailLength, EmailPurpose, ProviderKind, Tone,
};

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProviderKindDto {
    #[oai(rename = "mock")]
    Mock,
    #[oai(rename = "sendgrid")]
    Sendgrid,
    #[oai(rename = "smtp")]
    Smtp,
    #[oai(rename = "ses")]
    Ses,
}

impl From<ProviderKind> for ProviderKindDto {
    fn from(value: ProviderKind) -> Self {
        match value {
            ProviderKind::Mock => ProviderKindDto::Mock,
            ProviderKind::Sendgrid => ProviderKindDto::Sendgrid,
            ProviderKind::Smtp => ProviderKindDto::Smtp,
            ProviderKind::Ses => ProviderKindDto::Ses,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum DeliveryStatusDto {
    #[oai(rename = "sent")]
    Sent,
    #[oai(rename = "failed")]
    Failed,
}

impl From<DeliveryStatus> for DeliveryStatusDto {
    fn from(value: DeliveryStatus) -> Self {
        match value {
            DeliveryStatus::Sent => DeliveryStatusDto::Sent,
            DeliveryStatus::Failed => DeliveryStatusDto::Failed,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum EmailCategoryDto {
    #[oai(rename = "confirmation")]
    Confirmation,
    #[oai(rename = "reminder_24h")]
    Reminder24h,
    #[oai(rename = "reminder_1h")]
    Reminder1h,
    #[oai(rename = "thank_you")]
    ThankYou,
    #[oai(rename = "campaign")]
    Campaign,
    #[oai(rename = "transactional")]
    Transactional,
}

impl From<EmailCategory> for EmailCategoryDto {
    fn from(value: EmailCategory) -> Self {
        match value {
            EmailCategory::Confirmation => EmailCategoryDto::Confirmation,
            EmailCategory::Reminder24h => EmailCategoryDto::Reminder24h,
            EmailCategory::Reminder1h => EmailCategoryDto::Reminder1h,
            EmailCategory::ThankYou => EmailCategoryDto::ThankYou,
            EmailCategory::Campaign => EmailCategoryDto::Campaign,
            EmailCategory::Transactional => EmailCategoryDto::Transactional,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ToneKind {
    #[oai(rename = "professional")]
    Professional,
    #[oai(rename = "friendly")]
    Friendly,
    #[oai(rename = "casual")]
    Casual,
    #[oai(rename = "urgent")]
    Urgent,
    #[oai(rename = "persuasive")]
    Persuasive,
}

impl Default for ToneKind {
    fn default() -> Self {
        ToneKind::Professional
    }
}

impl From<ToneKind> for Tone {
    fn from(value: ToneKind) -> Self {
        match value {
            ToneKind::Professional => Tone::Professional,
            ToneKind::Friendly => Tone::Friendly,
            ToneKind::Casual => Tone::Casual,
            ToneKind::Urgent => Tone::Urgent,
            ToneKind::Persuasive => Tone::Persuasive,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum EmailPurposeKind {
    #[oai(rename = "welcome")]
    Welcome,
    #[oai(rename = "promotional")]
    Promotional,
    #[oai(rename = "newsletter")]
    Newsletter,
    #[oai(rename = "general")]
    General,
}

impl Default for EmailPurposeKind {
    fn default() -> Self {
        EmailPurposeKind::General
    }
}

impl From<EmailPurposeKind> for EmailPurpose {
    fn from(value: EmailPurposeKind) -> Self {
        match value {
            EmailPurposeKind::Welcome => EmailPurpose::Welcome,
            EmailPurposeKind::Promotional => EmailPurpose::Promotional,
            EmailPurposeKind::Newsletter => EmailPurpose::Newsletter,
            EmailPurposeKind::General => EmailPurpose::General,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum EmailLengthKind {
    #[oai(rename = "short")]
    Short,
    #[oai(rename = "medium")]
    Medium,
    #[oai(rename = "long")]
    Long,
}

impl Default for EmailLengthKind {
    fn default() -> Self {
        EmailLengthKind::Medium
    }
}

impl From<EmailLengthKind> for EmailLength {
    fn from(value: EmailLengthKind) -> Self {
        match value {
            EmailLengthKind::Short => EmailLength::Short,
            EmailLengthKind::Medium => EmailLength::Medium,
            EmailLengthKind::Long => EmailLength::Long,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum CopySourceDto {
    #[oai(rename = "generated")]
    Generated,
    #[oai(rename = "fallback")]
    Fallback,
}

impl From<CopySource> for CopySourceDto {
    fn from(value: CopySource) -> Self {
        match value {
            CopySource::Generated => CopySourceDto::Generated,
            CopySource::Fallback => CopySourceDto::Fallback,
        }
    }
}
