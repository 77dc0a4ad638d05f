use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, param::Query, payload::Json};
use uuid::Uuid;

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    errors::api_error,
    mappers::map_logs_page,
    responses::PaginatedDeliveryLogsDto,
};

#[derive(Clone)]
pub struct DeliveryLogsEndpoints {
    state: Arc<ApiState>,
}

impl DeliveryLogsEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl DeliveryLogsEndpoints {
    /// Delivery attempts, newest first, optionally narrowed to one webinar or campaign.
    #[oai(path = "/delivery-logs", method = "get", tag = EndpointsTags::DeliveryLogs)]
    pub async fn list_delivery_logs(
        &self,
        entity_id: Query<Option<Uuid>>,
        limit: Query<Option<u32>>,
        offset: Query<Option<u32>>,
    ) -> PoemResult<Json<PaginatedDeliveryLogsDto>> {
        let page = self
            .state
            .list_delivery_logs_usecase
            .execute(entity_id.0, limit.0, offset.0)
            .await
            .map_err(api_error)?;

        Ok(Json(map_logs_page(&page)))
    }
}
