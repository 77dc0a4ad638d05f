pub mod block_renderer;
pub mod copy_fallback;
pub mod copy_parser;
pub mod copywriter;
pub mod dispatch;
pub mod email_provider;
pub mod text_generator;
pub mod webinar_mail;
