use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, param::Path, payload::Json};
use uuid::Uuid;

use crate::{
    application::usecases::send_thank_you::SendThankYouRequest,
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        errors::api_error,
        mappers::{map_batch, map_result},
        requests::ThankYouRequestDto,
        responses::{BatchDeliveryResponseDto, DeliveryResultDto},
    },
};

#[derive(Clone)]
pub struct WebinarsEndpoints {
    state: Arc<ApiState>,
}

impl WebinarsEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl WebinarsEndpoints {
    #[oai(
        path = "/webinars/:webinar_id/registrations/:registration_id/confirmation",
        method = "post",
        tag = EndpointsTags::Webinars,
    )]
    pub async fn send_confirmation(
        &self,
        webinar_id: Path<Uuid>,
        registration_id: Path<Uuid>,
    ) -> PoemResult<Json<DeliveryResultDto>> {
        let result = self
            .state
            .send_confirmation_usecase
            .execute(webinar_id.0, registration_id.0)
            .await
            .map_err(api_error)?;

        Ok(Json(map_result(&result)))
    }

    /// Thanks every registered attendee, linking the recording when one is known.
    #[oai(
        path = "/webinars/:webinar_id/actions/thank-you",
        method = "post",
        tag = EndpointsTags::Webinars,
    )]
    pub async fn send_thank_you(
        &self,
        webinar_id: Path<Uuid>,
        request: Json<ThankYouRequestDto>,
    ) -> PoemResult<Json<BatchDeliveryResponseDto>> {
        let results = self
            .state
            .send_thank_you_usecase
            .execute(SendThankYouRequest {
                webinar_id: webinar_id.0,
                recording_url: request.0.recording_url,
            })
            .await
            .map_err(api_error)?;

        Ok(Json(map_batch(&results)))
    }
}
