use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::delivery_batch_orders;

#[derive(Debug, Clone, Selectable, Queryable, Insertable)]
#[diesel(table_name = delivery_batch_orders)]
pub struct DeliveryBatchOrderEntity {
    pub batch_id: i64,
    pub order_id: i64,
    pub created_at: DateTime<Utc>,
}
