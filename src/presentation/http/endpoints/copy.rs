use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use crate::{
    domain::models::EmailContentRequest,
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        mappers::{map_content, map_subjects},
        requests::{EmailContentRequestDto, SubjectLineRequestDto},
        responses::{GeneratedEmailContentDto, SubjectSuggestionsDto},
    },
};

#[derive(Clone)]
pub struct CopyEndpoints {
    state: Arc<ApiState>,
}

impl CopyEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl CopyEndpoints {
    /// Drafts subject, body and preview text. Falls back to a stock template when generation fails.
    #[oai(path = "/copy/email-content", method = "post", tag = EndpointsTags::Copy)]
    pub async fn generate_email_content(
        &self,
        request: Json<EmailContentRequestDto>,
    ) -> Json<GeneratedEmailContentDto> {
        let Json(request) = request;
        let content = self
            .state
            .copywriter
            .generate_email_content(&EmailContentRequest {
                prompt: request.prompt,
                tone: request.tone.into(),
                purpose: request.purpose.into(),
                length: request.length.into(),
                include_cta: request.include_cta,
            })
            .await;

        Json(map_content(content))
    }

    /// Up to five alternative subject lines; the original subject alone when generation fails.
    #[oai(path = "/copy/subject-lines", method = "post", tag = EndpointsTags::Copy)]
    pub async fn improve_subject_line(
        &self,
        request: Json<SubjectLineRequestDto>,
    ) -> Json<SubjectSuggestionsDto> {
        let suggestions = self
            .state
            .copywriter
            .improve_subject_line(&request.subject, request.context.as_deref())
            .await;

        Json(map_subjects(suggestions))
    }
}
