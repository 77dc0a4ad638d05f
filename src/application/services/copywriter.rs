use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    application::services::{
        copy_fallback::fallback_email_content,
        copy_parser::{MAX_SUBJECT_ALTERNATIVES, parse_email_content, parse_subject_alternatives},
        text_generator::TextGenerator,
    },
    domain::models::{CopySource, EmailContentRequest, GeneratedEmailContent, SubjectSuggestions},
};

const SYSTEM_PROMPT: &str = "You are an expert email marketing copywriter. \
You write clear, high-converting emails and you always reply with strict JSON only, \
without Markdown fences or commentary.";

/// AI-assisted email copy. Every call yields usable copy: when generation is
/// unavailable or its reply cannot be parsed, static templates are returned.
#[derive(Clone)]
pub struct CopywriterService {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl CopywriterService {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    pub fn is_generation_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn generate_email_content(
        &self,
        request: &EmailContentRequest,
    ) -> GeneratedEmailContent {
        let Some(generator) = &self.generator else {
            return fallback_email_content(request.purpose);
        };

        let reply = match generator
            .generate(SYSTEM_PROMPT, &email_content_prompt(request))
            .await
        {
            Ok(reply) => reply,
            Err(err) => {
                warn!(purpose = request.purpose.as_str(), error = %err, "email copy generation failed, using fallback");
                return fallback_email_content(request.purpose);
            }
        };

        match parse_email_content(&reply) {
            Some(parsed) => {
                info!(purpose = request.purpose.as_str(), "generated email copy");
                GeneratedEmailContent {
                    subject: parsed.subject,
                    content: parsed.content,
                    preview_text: parsed.preview_text,
                    source: CopySource::Generated,
                }
            }
            None => {
                warn!(purpose = request.purpose.as_str(), "unparseable email copy reply, using fallback");
                fallback_email_content(request.purpose)
            }
        }
    }

    /// On failure the original subject comes back as the only alternative.
    pub async fn improve_subject_line(
        &self,
        subject: &str,
        context: Option<&str>,
    ) -> SubjectSuggestions {
        let unchanged = || SubjectSuggestions {
            alternatives: vec![subject.to_string()],
            source: CopySource::Fallback,
        };
        let Some(generator) = &self.generator else {
            return unchanged();
        };

        match generator
            .generate(SYSTEM_PROMPT, &subject_line_prompt(subject, context))
            .await
        {
            Ok(reply) => match parse_subject_alternatives(&reply) {
                Some(alternatives) => SubjectSuggestions {
                    alternatives,
                    source: CopySource::Generated,
                },
                None => {
                    warn!("unparseable subject line reply, keeping original");
                    unchanged()
                }
            },
            Err(err) => {
                warn!(error = %err, "subject line generation failed, keeping original");
                unchanged()
            }
        }
    }
}

fn email_content_prompt(request: &EmailContentRequest) -> String {
    let cta = if request.include_cta {
        "End with a clear call-to-action button or link."
    } else {
        "Do not include a call-to-action."
    };
    format!(
        "Write a {length} {tone} {purpose} email.\n\
         Brief: {prompt}\n\
         {cta}\n\
         Respond with a JSON object with exactly these keys: \
         \"subject\" (the subject line), \"content\" (the email body as simple HTML) \
         and \"previewText\" (inbox preview, under 100 characters).",
        length = request.length.describe(),
        tone = request.tone.as_str(),
        purpose = request.purpose.as_str(),
        prompt = request.prompt.trim(),
    )
}

fn subject_line_prompt(subject: &str, context: Option<&str>) -> String {
    let context = context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| format!("Context: {c}\n"))
        .unwrap_or_default();
    format!(
        "Suggest {MAX_SUBJECT_ALTERNATIVES} improved alternatives for this email subject line \
         that increase open rates without sounding like spam.\n\
         Subject: {subject}\n\
         {context}\
         Respond with a JSON array of strings."
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::models::{EmailLength, EmailPurpose, Tone};

    struct CannedGenerator {
        reply: anyhow::Result<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedGenerator {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(anyhow::anyhow!("upstream timed out")),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _system: &str, user: &str) -> anyhow::Result<String> {
            self.prompts.lock().unwrap().push(user.to_string());
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(err) => Err(anyhow::anyhow!("{err}")),
            }
        }
    }

    fn request(purpose: EmailPurpose) -> EmailContentRequest {
        EmailContentRequest {
            prompt: "Launch of our new course".to_string(),
            tone: Tone::Friendly,
            purpose,
            length: EmailLength::Short,
            include_cta: true,
        }
    }

    #[tokio::test]
    async fn uses_generated_copy_when_reply_parses() {
        let generator = CannedGenerator::replying(
            "```json\n{\"subject\": \"New course!\", \"content\": \"<p>Join</p>\", \"previewText\": \"Out now\"}\n```",
        );
        let service = CopywriterService::new(Some(generator.clone()));

        let content = service
            .generate_email_content(&request(EmailPurpose::Promotional))
            .await;

        assert_eq!(content.subject, "New course!");
        assert_eq!(content.preview_text, "Out now");
        assert_eq!(content.source, CopySource::Generated);
        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("friendly promotional"));
        assert!(prompts[0].contains("call-to-action button"));
    }

    #[tokio::test]
    async fn forced_failure_yields_fallback_for_each_purpose() {
        let service = CopywriterService::new(Some(CannedGenerator::failing()));

        for purpose in [
            EmailPurpose::Welcome,
            EmailPurpose::Promotional,
            EmailPurpose::Newsletter,
            EmailPurpose::General,
        ] {
            let content = service.generate_email_content(&request(purpose)).await;
            assert_eq!(content, fallback_email_content(purpose));
        }
    }

    #[tokio::test]
    async fn malformed_reply_yields_fallback() {
        let service = CopywriterService::new(Some(CannedGenerator::replying("I cannot do that.")));

        let content = service
            .generate_email_content(&request(EmailPurpose::Welcome))
            .await;

        assert_eq!(content.source, CopySource::Fallback);
        assert_eq!(content, fallback_email_content(EmailPurpose::Welcome));
    }

    #[tokio::test]
    async fn without_generator_everything_falls_back() {
        let service = CopywriterService::new(None);

        assert!(!service.is_generation_enabled());
        let content = service
            .generate_email_content(&request(EmailPurpose::Newsletter))
            .await;
        assert_eq!(content.source, CopySource::Fallback);

        let subjects = service.improve_subject_line("Hello", None).await;
        assert_eq!(subjects.alternatives, vec!["Hello".to_string()]);
    }

    #[tokio::test]
    async fn subject_alternatives_are_capped_at_five() {
        let generator = CannedGenerator::replying(r#"["a", "b", "c", "d", "e", "f"]"#);
        let service = CopywriterService::new(Some(generator.clone()));

        let subjects = service
            .improve_subject_line("Our sale", Some("spring campaign"))
            .await;

        assert_eq!(subjects.alternatives.len(), 5);
        assert_eq!(subjects.source, CopySource::Generated);
        assert!(generator.prompts.lock().unwrap()[0].contains("Context: spring campaign"));
    }

    #[tokio::test]
    async fn subject_failure_returns_original_unchanged() {
        let service = CopywriterService::new(Some(CannedGenerator::failing()));

        let subjects = service.improve_subject_line("  Keep me  ", None).await;

        assert_eq!(subjects.alternatives, vec!["  Keep me  ".to_string()]);
        assert_eq!(subjects.source, CopySource::Fallback);
    }
}
