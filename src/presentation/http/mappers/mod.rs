use crate::{
    application::usecases::{
        list_delivery_logs::PaginatedDeliveryLogs, process_reminders::ReminderSummary,
        send_bulk_email::BulkSendSummary,
    },
    domain::models::{
        DeliveryLogRecord, DeliveryResult, GeneratedEmailContent, RecipientDelivery,
        SubjectSuggestions,
    },
    presentation::http::responses::{
        BatchDeliveryResponseDto, DeliveryLogDto, DeliveryResultDto, GeneratedEmailContentDto,
        PaginatedDeliveryLogsDto, RecipientResultDto, ReminderSummaryDto, SubjectSuggestionsDto,
    },
};

pub fn map_result(result: &DeliveryResult) -> DeliveryResultDto {
    DeliveryResultDto {
        success: result.success,
        provider: result.provider.into(),
        message_id: result.message_id.clone(),
        error: result.error.clone(),
    }
}

pub fn map_batch(results: &[RecipientDelivery]) -> BatchDeliveryResponseDto {
    let successful = results.iter().filter(|d| d.result.success).count() as u32;
    let total = results.len() as u32;
    BatchDeliveryResponseDto {
        results: map_recipients(results),
        total,
        successful,
        failed: total - successful,
    }
}

pub fn map_bulk_summary(summary: &BulkSendSummary) -> BatchDeliveryResponseDto {
    BatchDeliveryResponseDto {
        results: map_recipients(&summary.results),
        total: summary.total as u32,
        successful: summary.successful as u32,
        failed: summary.failed as u32,
    }
}

fn map_recipients(results: &[RecipientDelivery]) -> Vec<RecipientResultDto> {
    results
        .iter()
        .map(|delivery| RecipientResultDto {
            email: delivery.email.clone(),
            result: map_result(&delivery.result),
        })
        .collect()
}

pub fn map_log(log: &DeliveryLogRecord) -> DeliveryLogDto {
    DeliveryLogDto {
        id: log.id,
        entity_id: log.entity_id,
        recipient: log.recipient.clone(),
        subject: log.subject.clone(),
        status: log.status.into(),
        category: log.category.into(),
        provider: log.provider.into(),
        error_message: log.error_message.clone(),
        sent_at: log.sent_at.map(|at| at.to_rfc3339()),
        created_at: log.created_at.to_rfc3339(),
    }
}

pub fn map_logs_page(page: &PaginatedDeliveryLogs) -> PaginatedDeliveryLogsDto {
    PaginatedDeliveryLogsDto {
        logs: page.logs.iter().map(map_log).collect(),
        has_more: page.has_more,
        next_offset: page.next_offset,
    }
}

pub fn map_summary(summary: &ReminderSummary) -> ReminderSummaryDto {
    ReminderSummaryDto {
        reminders_24h: summary.reminders_24h as u32,
        reminders_1h: summary.reminders_1h as u32,
        emails_sent: summary.emails_sent as u32,
        emails_failed: summary.emails_failed as u32,
        emails_skipped: summary.emails_skipped as u32,
        windows_failed: summary.windows_failed as u32,
    }
}

pub fn map_content(content: GeneratedEmailContent) -> GeneratedEmailContentDto {
    GeneratedEmailContentDto {
        subject: content.subject,
        content: content.content,
        preview_text: content.preview_text,
        source: content.source.into(),
    }
}

pub fn map_subjects(suggestions: SubjectSuggestions) -> SubjectSuggestionsDto {
    SubjectSuggestionsDto {
        alternatives: suggestions.alternatives,
        source: suggestions.source.into(),
    }
}
