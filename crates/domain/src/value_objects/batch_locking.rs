use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::entities::delivery_batches::DeliveryBatchEntity;
use crate::value_objects::enums::delivery_batch_statuses::DeliveryBatchStatus;

/// Re-check under the row lock: a concurrent locker may have won, or the
/// cutoff may have moved since the candidate scan.
pub fn should_lock(batch: &DeliveryBatchEntity, now: DateTime<Utc>) -> bool {
    batch.locked_at.is_none()
        && batch.status == DeliveryBatchStatus::Open.to_string()
        && batch.cutoff_at <= now
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LockBatchesSummary {
    pub delivery_date: NaiveDate,
    pub locked: u64,
}
