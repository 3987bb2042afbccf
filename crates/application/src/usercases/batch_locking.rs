use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use domain::{
    repositories::delivery_batches::DeliveryBatchRepository,
    value_objects::batch_locking::LockBatchesSummary,
};

/// Freezes OPEN batches whose cutoff has passed. Candidates come from an
/// unlocked scan; each id is re-verified under its own row lock, so
/// concurrent lockers race safely and each batch is counted at most once.
pub struct BatchLockingUseCase<B>
where
    B: DeliveryBatchRepository + Send + Sync + 'static,
{
    batch_repo: Arc<B>,
}

impl<B> BatchLockingUseCase<B>
where
    B: DeliveryBatchRepository + Send + Sync + 'static,
{
    pub fn new(batch_repo: Arc<B>) -> Self {
        Self { batch_repo }
    }

    pub async fn run(
        &self,
        delivery_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<LockBatchesSummary> {
        info!(%delivery_date, %now, "lock_batches: run started");

        let candidate_ids = self
            .batch_repo
            .list_due_batch_ids(delivery_date, now)
            .await
            .map_err(|err| {
                error!(
                    %delivery_date,
                    db_error = ?err,
                    "lock_batches: failed to list due batches"
                );
                err
            })?;

        let mut locked = 0_u64;
        for batch_id in candidate_ids {
            match self.batch_repo.lock_batch_if_due(batch_id, now).await {
                Ok(true) => {
                    info!(batch_id, "lock_batches: batch locked");
                    locked += 1;
                }
                Ok(false) => {
                    debug!(batch_id, "lock_batches: batch no longer due or already locked");
                }
                Err(err) => {
                    warn!(
                        batch_id,
                        error = ?err,
                        "lock_batches: batch skipped after failure"
                    );
                }
            }
        }

        info!(%delivery_date, locked, "lock_batches: run finished");

        Ok(LockBatchesSummary {
            delivery_date,
            locked,
        })
    }
}
