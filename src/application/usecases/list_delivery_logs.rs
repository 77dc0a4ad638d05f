use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{models::DeliveryLogRecord, repositories::DeliveryLogRepository};

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 200;

pub struct ListDeliveryLogsUseCase {
    repo: Arc<dyn DeliveryLogRepository>,
}

pub struct PaginatedDeliveryLogs {
    pub logs: Vec<DeliveryLogRecord>,
    pub has_more: bool,
    pub next_offset: Option<u32>,
}

impl ListDeliveryLogsUseCase {
    pub fn new(repo: Arc<dyn DeliveryLogRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        entity_id: Option<Uuid>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<PaginatedDeliveryLogs> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = offset.unwrap_or(0);

        let (logs, has_more) = self.repo.list(entity_id, Some(limit), Some(offset)).await?;
        let next_offset = has_more.then(|| offset + logs.len() as u32);

        Ok(PaginatedDeliveryLogs {
            logs,
            has_more,
            next_offset,
        })
    }
}
