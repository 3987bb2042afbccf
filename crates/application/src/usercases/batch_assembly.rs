use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use domain::{
    repositories::{delivery_batches::DeliveryBatchRepository, orders::OrderRepository},
    value_objects::{
        batch_assembly::{BatchAssemblySummary, group_orders_for_batching},
        enums::order_statuses::OrderStatus,
    },
};

/// Groups eligible orders by (delivery_date, zone_id) and reuses or
/// creates one OPEN batch per group. Each group is its own repository
/// transaction, so a failure in one zone does not roll back the others.
pub struct BatchAssemblyUseCase<O, B>
where
    O: OrderRepository + Send + Sync + 'static,
    B: DeliveryBatchRepository + Send + Sync + 'static,
{
    order_repo: Arc<O>,
    batch_repo: Arc<B>,
    halt_on_error: bool,
}

impl<O, B> BatchAssemblyUseCase<O, B>
where
    O: OrderRepository + Send + Sync + 'static,
    B: DeliveryBatchRepository + Send + Sync + 'static,
{
    pub fn new(order_repo: Arc<O>, batch_repo: Arc<B>, halt_on_error: bool) -> Self {
        Self {
            order_repo,
            batch_repo,
            halt_on_error,
        }
    }

    pub async fn run(
        &self,
        delivery_date: NaiveDate,
        cutoff_at: DateTime<Utc>,
    ) -> Result<BatchAssemblySummary> {
        info!(%delivery_date, %cutoff_at, "create_batches: run started");

        let orders = self
            .order_repo
            .list_eligible_for_batching(delivery_date, OrderStatus::Pending)
            .await
            .map_err(|err| {
                error!(
                    %delivery_date,
                    db_error = ?err,
                    "create_batches: failed to list eligible orders"
                );
                err
            })?;

        if orders.is_empty() {
            info!(%delivery_date, "create_batches: no eligible orders");
            return Ok(BatchAssemblySummary {
                delivery_date,
                batches_created: 0,
                orders_attached: 0,
            });
        }

        let groups = group_orders_for_batching(&orders);

        let mut batches_created = 0_u64;
        let mut orders_attached = 0_u64;

        for ((group_date, zone_id), order_ids) in groups {
            let group_size = order_ids.len();

            match self
                .batch_repo
                .attach_group(group_date, zone_id, order_ids, cutoff_at)
                .await
            {
                Ok(outcome) => {
                    if outcome.batch_created {
                        batches_created += 1;
                    }
                    orders_attached += outcome.orders_attached;

                    info!(
                        %group_date,
                        ?zone_id,
                        batch_id = outcome.batch_id,
                        batch_created = outcome.batch_created,
                        orders_attached = outcome.orders_attached,
                        group_size,
                        "create_batches: group processed"
                    );
                }
                Err(err) => {
                    if self.halt_on_error {
                        error!(
                            %group_date,
                            ?zone_id,
                            error = ?err,
                            "create_batches: halting run after group failure"
                        );
                        return Err(err);
                    }

                    warn!(
                        %group_date,
                        ?zone_id,
                        error = ?err,
                        "create_batches: zone group skipped after failure"
                    );
                }
            }
        }

        info!(
            %delivery_date,
            batches_created,
            orders_attached,
            "create_batches: run finished"
        );

        Ok(BatchAssemblySummary {
            delivery_date,
            batches_created,
            orders_attached,
        })
    }

    /// Single-order variant of the same contract; BATCH_LOCKED surfaces
    /// to the caller untouched.
    pub async fn attach_order(&self, order_id: i64, cutoff_at: DateTime<Utc>) -> Result<i64> {
        let batch_id = self
            .batch_repo
            .attach_order(order_id, cutoff_at)
            .await
            .map_err(|err| {
                warn!(order_id, error = ?err, "create_batches: attach_order failed");
                err
            })?;

        info!(order_id, batch_id, "create_batches: order attached");
        Ok(batch_id)
    }
}
