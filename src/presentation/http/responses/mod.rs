use poem_openapi::Object;
use uuid::Uuid;

use crate::presentation::models::{
    CopySourceDto, DeliveryStatusDto, EmailCategoryDto, ProviderKindDto,
};

#[derive(Object)]
pub struct DeliveryResultDto {
    pub success: bool,
    pub provider: ProviderKindDto,
    pub message_id: Option<String>,
    pub error: Option<String>,
}

#[derive(Object)]
pub struct RecipientResultDto {
    pub email: String,
    pub result: DeliveryResultDto,
}

#[derive(Object)]
pub struct BatchDeliveryResponseDto {
    pub results: Vec<RecipientResultDto>,
    pub total: u32,
    pub successful: u32,
    pub failed: u32,
}

#[derive(Object)]
pub struct RenderEmailResponseDto {
    pub html: String,
}

#[derive(Object)]
pub struct DeliveryLogDto {
    pub id: Uuid,
    pub entity_id: Option<Uuid>,
    pub recipient: String,
    pub subject: String,
    pub status: DeliveryStatusDto,
    pub category: EmailCategoryDto,
    pub provider: ProviderKindDto,
    pub error_message: Option<String>,
    pub sent_at: Option<String>,
    pub created_at: String,
}

#[derive(Object)]
pub struct PaginatedDeliveryLogsDto {
    pub logs: Vec<DeliveryLogDto>,
    pub has_more: bool,
    pub next_offset: Option<u32>,
}

#[derive(Object)]
pub struct ReminderSummaryDto {
    /// Webinars that entered the 24-hour window on this pass.
    pub reminders_24h: u32,
    /// Webinars that entered the 1-hour window on this pass.
    pub reminders_1h: u32,
    pub emails_sent: u32,
    pub emails_failed: u32,
    pub emails_skipped: u32,
    /// Reminder windows skipped because the webinar query failed.
    pub windows_failed: u32,
}

#[derive(Object)]
pub struct GeneratedEmailContentDto {
    pub subject: String,
    pub content: String,
    pub preview_text: String,
    pub source: CopySourceDto,
}

#[derive(Object)]
pub struct SubjectSuggestionsDto {
    pub alternatives: Vec<String>,
    pub source: CopySourceDto,
}
