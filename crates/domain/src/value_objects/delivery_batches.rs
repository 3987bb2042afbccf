use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::entities::delivery_batches::DeliveryBatchEntity;

#[derive(Debug, Clone, Serialize)]
pub struct DeliveryBatchDto {
    pub id: i64,
    pub batch_code: String,
    pub delivery_date: NaiveDate,
    pub zone_id: Option<i64>,
    pub status: String,
    pub cutoff_at: DateTime<Utc>,
    pub locked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<DeliveryBatchEntity> for DeliveryBatchDto {
    fn from(value: DeliveryBatchEntity) -> Self {
        Self {
            id: value.id,
            batch_code: value.batch_code,
            delivery_date: value.delivery_date,
            zone_id: value.zone_id,
            status: value.status,
            cutoff_at: value.cutoff_at,
            locked_at: value.locked_at,
            created_at: value.created_at,
        }
    }
}
