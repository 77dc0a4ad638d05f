use std::sync::Arc;

use poem_openapi::Tags;

use crate::{
    application::{
        services::copywriter::CopywriterService,
        usecases::{
            list_delivery_logs::ListDeliveryLogsUseCase,
            process_reminders::ProcessRemindersUseCase, send_bulk_email::SendBulkEmailUseCase,
            send_confirmation::SendConfirmationUseCase, send_email::SendEmailUseCase,
            send_thank_you::SendThankYouUseCase,
        },
    },
    presentation::http::endpoints::{
        copy::CopyEndpoints, delivery_logs::DeliveryLogsEndpoints, emails::EmailsEndpoints,
        health::HealthEndpoints, reminders::RemindersEndpoints, webinars::WebinarsEndpoints,
    },
};

#[derive(Clone)]
pub struct ApiState {
    pub send_email_usecase: Arc<SendEmailUseCase>,
    pub send_bulk_email_usecase: Arc<SendBulkEmailUseCase>,
    pub list_delivery_logs_usecase: Arc<ListDeliveryLogsUseCase>,
    pub process_reminders_usecase: Arc<ProcessRemindersUseCase>,
    pub send_confirmation_usecase: Arc<SendConfirmationUseCase>,
    pub send_thank_you_usecase: Arc<SendThankYouUseCase>,
    pub copywriter: Arc<CopywriterService>,
}

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Health,
    Emails,
    DeliveryLogs,
    Reminders,
    Webinars,
    Copy,
}

pub type Endpoints = (
    HealthEndpoints,
    EmailsEndpoints,
    DeliveryLogsEndpoints,
    RemindersEndpoints,
    WebinarsEndpoints,
    CopyEndpoints,
);

/// Every endpoint group, ready for `OpenApiService::new`.
pub fn endpoints(state: Arc<ApiState>) -> Endpoints {
    (
        HealthEndpoints,
        EmailsEndpoints::new(state.clone()),
        DeliveryLogsEndpoints::new(state.clone()),
        RemindersEndpoints::new(state.clone()),
        WebinarsEndpoints::new(state.clone()),
        CopyEndpoints::new(state),
    )
}
