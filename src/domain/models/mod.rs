pub mod content_block;
pub mod copy;
pub mod delivery;
pub mod email;
pub mod provider;
pub mod webinar;

pub use content_block::{Align, BlockStyle, ContentBlock};
pub use copy::{
    CopySource, EmailContentRequest, EmailLength, EmailPurpose, GeneratedEmailContent,
    SubjectSuggestions, Tone,
};
pub use delivery::{DeliveryLogRecord, DeliveryStatus, EmailCategory};
pub use email::{DeliveryResult, EmailMessage, RecipientDelivery};
pub use provider::ProviderKind;
pub use webinar::{Registration, RegistrationStatus, Webinar, WebinarStatus};
