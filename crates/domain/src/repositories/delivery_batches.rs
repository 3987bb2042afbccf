use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use mockall::automock;

use crate::entities::delivery_batches::DeliveryBatchEntity;
use crate::value_objects::batch_assembly::GroupAttachOutcome;

#[async_trait]
#[automock]
pub trait DeliveryBatchRepository {
    /// Reuse-or-create the OPEN batch for the order's (delivery_date,
    /// zone_id) under a row lock, then attach the order idempotently.
    /// Fails with BATCH_LOCKED rather than mutating a frozen batch.
    async fn attach_order(&self, order_id: i64, cutoff_at: DateTime<Utc>) -> Result<i64>;

    /// Same contract for a whole (delivery_date, zone_id) group, one
    /// transaction per group.
    async fn attach_group(
        &self,
        delivery_date: NaiveDate,
        zone_id: Option<i64>,
        order_ids: Vec<i64>,
        cutoff_at: DateTime<Utc>,
    ) -> Result<GroupAttachOutcome>;

    /// Unlocked candidate scan; each id is re-verified under a row lock
    /// by `lock_batch_if_due`.
    async fn list_due_batch_ids(
        &self,
        delivery_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Vec<i64>>;

    /// Returns true only when this call performed the OPEN -> LOCKED
    /// transition; a batch a concurrent runner locked first yields false.
    async fn lock_batch_if_due(&self, batch_id: i64, now: DateTime<Utc>) -> Result<bool>;

    async fn find_by_id(&self, batch_id: i64) -> Result<Option<DeliveryBatchEntity>>;

    async fn list_recent(&self) -> Result<Vec<DeliveryBatchEntity>>;
}
