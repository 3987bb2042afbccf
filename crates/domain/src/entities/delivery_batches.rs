use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::schema::delivery_batches;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = delivery_batches)]
pub struct DeliveryBatchEntity {
    pub id: i64,
    pub batch_code: String,
    pub delivery_date: NaiveDate,
    pub zone_id: Option<i64>,
    pub cutoff_at: DateTime<Utc>,
    pub status: String,
    pub locked_at: Option<DateTime<Utc>>,
    pub dispatched_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = delivery_batches)]
pub struct InsertDeliveryBatchEntity {
    pub batch_code: String,
    pub delivery_date: NaiveDate,
    pub zone_id: Option<i64>,
    pub cutoff_at: DateTime<Utc>,
    pub status: String,
    pub locked_at: Option<DateTime<Utc>>,
    pub dispatched_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
