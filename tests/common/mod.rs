#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mailing::{
    application::{
        handlers::webinar_notifier::WebinarNotificationHandler,
        services::{
            dispatch::{DispatchConfig, EmailDispatchService},
            email_provider::EmailProvider,
            webinar_mail::WebinarMailComposer,
        },
    },
    domain::{
        errors::DeliveryError,
        models::{
            EmailMessage, ProviderKind, Registration, RegistrationStatus, Webinar, WebinarStatus,
        },
    },
    infrastructure::repositories::in_memory::{
        InMemoryDeliveryLogRepository, InMemoryRegistrationRepository, InMemoryWebinarRepository,
    },
};
use uuid::Uuid;

pub const APP_BASE_URL: &str = "https://app.example.com";

/// Captures every message it is asked to deliver. Fails all of them when `failing`
/// is set, otherwise only those addressed to `reject`.
#[derive(Default)]
pub struct RecordingProvider {
    failing: bool,
    reject: Vec<String>,
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingProvider {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            failing: true,
            ..Default::default()
        })
    }

    pub fn rejecting(addresses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            reject: addresses.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        })
    }

    pub fn messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailProvider for RecordingProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Smtp
    }

    async fn deliver(&self, message: &EmailMessage) -> Result<Option<String>, DeliveryError> {
        self.sent.lock().unwrap().push(message.clone());
        if self.failing {
            return Err(DeliveryError::Transport("connection refused".to_string()));
        }
        if self.reject.contains(&message.to) {
            return Err(DeliveryError::Rejected {
                status: 550,
                reason: "mailbox unavailable".to_string(),
            });
        }
        Ok(Some(format!("rec-{}", message.to)))
    }
}

pub struct Harness {
    pub provider: Arc<RecordingProvider>,
    pub dispatch: Arc<EmailDispatchService>,
    pub logs: Arc<InMemoryDeliveryLogRepository>,
    pub webinars: Arc<InMemoryWebinarRepository>,
    pub registrations: Arc<InMemoryRegistrationRepository>,
    pub notifier: Arc<WebinarNotificationHandler>,
}

impl Harness {
    pub fn new(provider: Arc<RecordingProvider>) -> Self {
        let dispatch = Arc::new(EmailDispatchService::new(
            provider.clone(),
            DispatchConfig {
                from_name: "eFunnels".to_string(),
                from_address: "noreply@efunnels.local".to_string(),
                bulk_concurrency: 1,
            },
        ));
        let logs = Arc::new(InMemoryDeliveryLogRepository::new());
        let notifier = Arc::new(WebinarNotificationHandler::new(
            dispatch.clone(),
            logs.clone(),
            WebinarMailComposer::new(APP_BASE_URL),
        ));

        Self {
            provider,
            dispatch,
            logs,
            webinars: Arc::new(InMemoryWebinarRepository::new()),
            registrations: Arc::new(InMemoryRegistrationRepository::new()),
            notifier,
        }
    }

    pub async fn add_webinar(&self, scheduled_at: DateTime<Utc>) -> Webinar {
        let webinar = webinar(scheduled_at);
        self.webinars.upsert(webinar.clone()).await;
        webinar
    }

    pub async fn register(&self, webinar: &Webinar, email: &str) -> Registration {
        let registration = Registration {
            id: Uuid::new_v4(),
            webinar_id: webinar.id,
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            status: RegistrationStatus::Registered,
            registered_at: Utc::now(),
        };
        self.registrations.upsert(registration.clone()).await;
        registration
    }
}

pub fn webinar(scheduled_at: DateTime<Utc>) -> Webinar {
    Webinar {
        id: Uuid::new_v4(),
        title: "Funnel Masterclass".to_string(),
        description: "Build a converting funnel in one hour.".to_string(),
        presenter_name: "Grace Hopper".to_string(),
        scheduled_at,
        duration_minutes: 60,
        reminders_enabled: true,
        status: WebinarStatus::Scheduled,
        recording_url: None,
    }
}
