mod common;

use std::collections::HashMap;

use chrono::{Duration, Utc};
use common::{Harness, RecordingProvider};
use mailing::{
    application::{
        services::dispatch::BulkEmailRequest,
        usecases::{
            send_bulk_email::{SendBulkEmailCommand, SendBulkEmailUseCase},
            send_confirmation::SendConfirmationUseCase,
            send_thank_you::{SendThankYouRequest, SendThankYouUseCase},
        },
    },
    domain::{
        errors::DomainError,
        models::{DeliveryStatus, EmailCategory, Registration, RegistrationStatus},
        repositories::DeliveryLogRepository,
        value_objects::BulkRecipient,
    },
};
use uuid::Uuid;

fn recipient(email: &str, name: &str) -> BulkRecipient {
    BulkRecipient {
        email: email.to_string(),
        template_vars: HashMap::from([("name".to_string(), name.to_string())]),
    }
}

#[tokio::test]
async fn bulk_send_personalizes_each_recipient_in_order() {
    let harness = Harness::new(RecordingProvider::succeeding());
    let usecase = SendBulkEmailUseCase::new(harness.dispatch.clone(), harness.logs.clone());
    let campaign_id = Uuid::new_v4();

    let summary = usecase
        .execute(SendBulkEmailCommand {
            entity_id: Some(campaign_id),
            email: BulkEmailRequest {
                recipients: vec![
                    recipient("ada@example.com", "Ada"),
                    recipient("grace@example.com", "Grace"),
                ],
                subject: "Spring sale".to_string(),
                html_body: "<p>Hi {{name}}, {{missing}} stays</p>".to_string(),
                from_name: None,
                from_address: None,
                reply_to: None,
            },
        })
        .await
        .unwrap();

    assert_eq!(summary.total, 2);
    assert_eq!(summary.successful, 2);
    assert_eq!(summary.failed, 0);
    let order: Vec<&str> = summary.results.iter().map(|r| r.email.as_str()).collect();
    assert_eq!(order, vec!["ada@example.com", "grace@example.com"]);

    let messages = harness.provider.messages();
    assert_eq!(messages[0].html_body, "<p>Hi Ada, {{missing}} stays</p>");
    assert_eq!(messages[1].html_body, "<p>Hi Grace, {{missing}} stays</p>");
    assert_eq!(messages[0].from_address, "noreply@efunnels.local");

    let (logs, _) = harness.logs.list(Some(campaign_id), None, None).await.unwrap();
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|log| log.category == EmailCategory::Campaign));
}

#[tokio::test]
async fn malformed_bulk_address_fails_alone() {
    let harness = Harness::new(RecordingProvider::succeeding());
    let usecase = SendBulkEmailUseCase::new(harness.dispatch.clone(), harness.logs.clone());

    let summary = usecase
        .execute(SendBulkEmailCommand {
            entity_id: None,
            email: BulkEmailRequest {
                recipients: vec![
                    recipient("ada@example.com", "Ada"),
                    recipient("typo-no-at", "Typo"),
                    recipient("bob@example.com", "Bob"),
                ],
                subject: "Spring sale".to_string(),
                html_body: "<p>Hi {{name}}</p>".to_string(),
                from_name: None,
                from_address: None,
                reply_to: None,
            },
        })
        .await
        .unwrap();

    assert_eq!((summary.total, summary.successful, summary.failed), (3, 2, 1));
    let order: Vec<&str> = summary.results.iter().map(|r| r.email.as_str()).collect();
    assert_eq!(order, vec!["ada@example.com", "typo-no-at", "bob@example.com"]);
    assert!(summary.results[0].result.success);
    assert!(!summary.results[1].result.success);
    assert!(summary.results[1].result.error.is_some());
    assert!(summary.results[2].result.success);

    let delivered: Vec<String> = harness
        .provider
        .messages()
        .into_iter()
        .map(|m| m.to)
        .collect();
    assert_eq!(delivered, vec!["ada@example.com", "bob@example.com"]);

    let (logs, _) = harness.logs.list(None, None, None).await.unwrap();
    assert_eq!(logs.len(), 3);
    let typo = logs.iter().find(|log| log.recipient == "typo-no-at").unwrap();
    assert_eq!(typo.category, EmailCategory::Campaign);
    assert_eq!(typo.status, DeliveryStatus::Failed);
    assert!(typo.sent_at.is_none());
}

#[tokio::test]
async fn bulk_send_rejects_an_empty_batch() {
    let harness = Harness::new(RecordingProvider::succeeding());
    let usecase = SendBulkEmailUseCase::new(harness.dispatch.clone(), harness.logs.clone());

    let err = usecase
        .execute(SendBulkEmailCommand {
            entity_id: None,
            email: BulkEmailRequest {
                recipients: Vec::new(),
                subject: "Nothing".to_string(),
                html_body: "<p>Nothing</p>".to_string(),
                from_name: None,
                from_address: None,
                reply_to: None,
            },
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<DomainError>(),
        Some(DomainError::Validation(_))
    ));
    assert!(harness.provider.messages().is_empty());
}

#[tokio::test]
async fn confirmation_is_sent_and_logged_against_the_webinar() {
    let harness = Harness::new(RecordingProvider::succeeding());
    let webinar = harness.add_webinar(Utc::now() + Duration::days(3)).await;
    let registration = harness.register(&webinar, "ada@example.com").await;
    let usecase = SendConfirmationUseCase::new(
        harness.webinars.clone(),
        harness.registrations.clone(),
        harness.notifier.clone(),
    );

    let result = usecase.execute(webinar.id, registration.id).await.unwrap();

    assert!(result.success);
    let messages = harness.provider.messages();
    assert_eq!(messages[0].subject, "You're registered: Funnel Masterclass");
    let (logs, _) = harness.logs.list(Some(webinar.id), None, None).await.unwrap();
    assert_eq!(logs[0].category, EmailCategory::Confirmation);
}

#[tokio::test]
async fn confirmation_for_a_registration_of_another_webinar_is_not_found() {
    let harness = Harness::new(RecordingProvider::succeeding());
    let webinar = harness.add_webinar(Utc::now() + Duration::days(3)).await;
    let other = harness.add_webinar(Utc::now() + Duration::days(4)).await;
    let registration = harness.register(&other, "ada@example.com").await;
    let usecase = SendConfirmationUseCase::new(
        harness.webinars.clone(),
        harness.registrations.clone(),
        harness.notifier.clone(),
    );

    let err = usecase
        .execute(webinar.id, registration.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DomainError>(),
        Some(DomainError::NotFound(_))
    ));

    let err = usecase
        .execute(Uuid::new_v4(), registration.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DomainError>(),
        Some(DomainError::NotFound(_))
    ));
    assert!(harness.provider.messages().is_empty());
}

#[tokio::test]
async fn thank_you_falls_back_to_the_stored_recording() {
    let harness = Harness::new(RecordingProvider::succeeding());
    let mut webinar = common::webinar(Utc::now() - Duration::hours(2));
    webinar.recording_url = Some("https://cdn.example.com/rec/42".to_string());
    harness.webinars.upsert(webinar.clone()).await;
    harness.register(&webinar, "ada@example.com").await;
    harness
        .registrations
        .upsert(Registration {
            id: Uuid::new_v4(),
            webinar_id: webinar.id,
            name: "Left early".to_string(),
            email: "gone@example.com".to_string(),
            status: RegistrationStatus::Cancelled,
            registered_at: Utc::now(),
        })
        .await;
    let usecase = SendThankYouUseCase::new(
        harness.webinars.clone(),
        harness.registrations.clone(),
        harness.notifier.clone(),
    );

    let results = usecase
        .execute(SendThankYouRequest {
            webinar_id: webinar.id,
            recording_url: Some("   ".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].email, "ada@example.com");
    assert!(results[0].result.success);
    let messages = harness.provider.messages();
    assert!(messages[0].html_body.contains("https://cdn.example.com/rec/42"));
    let (logs, _) = harness.logs.list(Some(webinar.id), None, None).await.unwrap();
    assert_eq!(logs[0].category, EmailCategory::ThankYou);
}
