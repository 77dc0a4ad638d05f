pub mod email;
pub mod llm;
pub mod repositories;
pub mod scheduler;
