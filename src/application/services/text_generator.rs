use async_trait::async_trait;

/// Remote text generation, reduced to a single prompt/reply exchange.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String>;
}
