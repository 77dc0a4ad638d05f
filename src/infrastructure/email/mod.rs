use std::sync::Arc;

use tracing::info;

use crate::application::services::email_provider::EmailProvider;

pub mod mock;
pub mod sendgrid;
pub mod ses;
pub mod smtp;

pub use mock::MockEmailProvider;
pub use sendgrid::{SendgridConfig, SendgridEmailProvider};
pub use ses::{SesConfig, SesEmailProvider};
pub use smtp::{SmtpConfig, SmtpEmailProvider};

/// The delivery strategy chosen at startup, with the settings it reads.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Mock,
    Sendgrid(SendgridConfig),
    Smtp(SmtpConfig),
    Ses(SesConfig),
}

/// Credentials are checked per send, so an incomplete configuration still builds.
pub fn build_provider(config: &ProviderConfig) -> Arc<dyn EmailProvider> {
    let provider: Arc<dyn EmailProvider> = match config {
        ProviderConfig::Mock => Arc::new(MockEmailProvider::new()),
        ProviderConfig::Sendgrid(config) => Arc::new(SendgridEmailProvider::new(config.clone())),
        ProviderConfig::Smtp(config) => Arc::new(SmtpEmailProvider::new(config.clone())),
        ProviderConfig::Ses(config) => Arc::new(SesEmailProvider::new(config.clone())),
    };
    info!(provider = provider.kind().as_str(), "email provider configured");
    provider
}
