use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use std::{sync::Arc, time::Duration};
use tracing::{error, info};

use application::usercases::{
    batch_assembly::BatchAssemblyUseCase, batch_locking::BatchLockingUseCase,
    order_generation::OrderGenerationUseCase,
};
use domain::repositories::{
    delivery_batches::DeliveryBatchRepository, orders::OrderRepository,
    subscriptions::SubscriptionRepository,
};

/// The three engines wired together in pipeline order: generate orders,
/// assemble batches, lock batches past cutoff.
pub struct JobPipeline<S, O, B>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    B: DeliveryBatchRepository + Send + Sync + 'static,
{
    pub generation: Arc<OrderGenerationUseCase<S, O>>,
    pub assembly: Arc<BatchAssemblyUseCase<O, B>>,
    pub locking: Arc<BatchLockingUseCase<B>>,
    pub cutoff_hour: u32,
}

/// Cutoff moment for a delivery date, at the configured UTC hour.
pub fn cutoff_for(delivery_date: NaiveDate, cutoff_hour: u32) -> DateTime<Utc> {
    delivery_date
        .and_hms_opt(cutoff_hour, 0, 0)
        .expect("cutoff hour is validated at config load")
        .and_utc()
}

impl<S, O, B> JobPipeline<S, O, B>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    B: DeliveryBatchRepository + Send + Sync + 'static,
{
    /// One pipeline pass. Job failures are logged and do not stop the
    /// following stages: each stage is idempotent and the next run picks
    /// up whatever this one left behind.
    pub async fn run_once(&self, delivery_date: NaiveDate, now: DateTime<Utc>) {
        let cutoff_at = cutoff_for(delivery_date, self.cutoff_hour);

        match self.generation.run(delivery_date).await {
            Ok(summary) => info!(
                %delivery_date,
                created = summary.created,
                existing = summary.existing,
                "job_loop: generate_orders finished"
            ),
            Err(e) => error!("Error while generating orders: {}", e),
        }

        match self.assembly.run(delivery_date, cutoff_at).await {
            Ok(summary) => info!(
                %delivery_date,
                batches_created = summary.batches_created,
                orders_attached = summary.orders_attached,
                "job_loop: create_batches finished"
            ),
            Err(e) => error!("Error while creating batches: {}", e),
        }

        match self.locking.run(delivery_date, now).await {
            Ok(summary) => info!(
                %delivery_date,
                locked = summary.locked,
                "job_loop: lock_batches finished"
            ),
            Err(e) => error!("Error while locking batches: {}", e),
        }
    }
}

pub async fn run_job_loop<S, O, B>(
    pipeline: Arc<JobPipeline<S, O, B>>,
    interval_secs: u64,
) -> Result<()>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    B: DeliveryBatchRepository + Send + Sync + 'static,
{
    loop {
        let now = Utc::now();
        let delivery_date = now.date_naive();

        info!(%delivery_date, "job_loop: pipeline run started");
        pipeline.run_once(delivery_date, now).await;

        tokio::time::sleep(Duration::from_secs(interval_secs)).await;
    }
}
