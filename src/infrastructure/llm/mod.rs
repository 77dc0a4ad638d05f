pub mod openai;

pub use openai::{LlmConfig, OpenAiTextGenerator};
