use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, payload::Json};

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    errors::api_error,
    mappers::map_summary,
    responses::ReminderSummaryDto,
};

#[derive(Clone)]
pub struct RemindersEndpoints {
    state: Arc<ApiState>,
}

impl RemindersEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl RemindersEndpoints {
    /// Runs one reminder pass. Meant to be called by an external scheduler.
    #[oai(
        path = "/reminders/actions/process",
        method = "post",
        tag = EndpointsTags::Reminders,
    )]
    pub async fn process_reminders(&self) -> PoemResult<Json<ReminderSummaryDto>> {
        let summary = self
            .state
            .process_reminders_usecase
            .execute()
            .await
            .map_err(api_error)?;

        Ok(Json(map_summary(&summary)))
    }
}
