use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, payload::Json};

use crate::{
    application::{
        services::{
            block_renderer,
            dispatch::{BulkEmailRequest, SendEmailRequest},
        },
        usecases::{send_bulk_email::SendBulkEmailCommand, send_email::SendEmailCommand},
    },
    domain::{models::ContentBlock, value_objects::BulkRecipient},
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        errors::{api_error, bad_request},
        mappers::{map_bulk_summary, map_result},
        requests::{BulkEmailRequestDto, RenderEmailRequestDto, SendEmailRequestDto},
        responses::{BatchDeliveryResponseDto, DeliveryResultDto, RenderEmailResponseDto},
    },
};

#[derive(Clone)]
pub struct EmailsEndpoints {
    state: Arc<ApiState>,
}

impl EmailsEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl EmailsEndpoints {
    /// Sends one transactional email through the configured provider.
    #[oai(path = "/emails", method = "post", tag = EndpointsTags::Emails)]
    pub async fn send_email(
        &self,
        request: Json<SendEmailRequestDto>,
    ) -> PoemResult<Json<DeliveryResultDto>> {
        let Json(request) = request;
        let command = SendEmailCommand {
            entity_id: request.entity_id,
            email: SendEmailRequest {
                to: request.to,
                subject: request.subject,
                html_body: request.html_body,
                from_name: request.from_name,
                from_address: request.from_address,
                reply_to: request.reply_to,
            },
        };

        let result = self
            .state
            .send_email_usecase
            .execute(command)
            .await
            .map_err(api_error)?;

        Ok(Json(map_result(&result)))
    }

    /// Personalizes and sends one campaign email per recipient.
    #[oai(path = "/emails/bulk", method = "post", tag = EndpointsTags::Emails)]
    pub async fn send_bulk(
        &self,
        request: Json<BulkEmailRequestDto>,
    ) -> PoemResult<Json<BatchDeliveryResponseDto>> {
        let Json(request) = request;
        let command = SendBulkEmailCommand {
            entity_id: request.entity_id,
            email: BulkEmailRequest {
                recipients: request
                    .recipients
                    .into_iter()
                    .map(|recipient| BulkRecipient {
                        email: recipient.email,
                        template_vars: recipient.template_vars,
                    })
                    .collect(),
                subject: request.subject,
                html_body: request.html_body,
                from_name: request.from_name,
                from_address: request.from_address,
                reply_to: request.reply_to,
            },
        };

        let summary = self
            .state
            .send_bulk_email_usecase
            .execute(command)
            .await
            .map_err(api_error)?;

        Ok(Json(map_bulk_summary(&summary)))
    }

    /// Renders builder blocks into a complete HTML document without sending anything.
    #[oai(path = "/emails/render", method = "post", tag = EndpointsTags::Emails)]
    pub async fn render_email(
        &self,
        request: Json<RenderEmailRequestDto>,
    ) -> PoemResult<Json<RenderEmailResponseDto>> {
        let Json(request) = request;
        let blocks = request
            .blocks
            .into_iter()
            .enumerate()
            .map(|(index, block)| {
                serde_json::from_value::<ContentBlock>(block)
                    .map_err(|err| bad_request(format!("invalid block at index {index}: {err}")))
            })
            .collect::<PoemResult<Vec<_>>>()?;

        Ok(Json(RenderEmailResponseDto {
            html: block_renderer::render(&blocks),
        }))
    }
}
