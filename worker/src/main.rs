use anyhow::Result;
use application::usercases::{
    batch_assembly::BatchAssemblyUseCase, batch_locking::BatchLockingUseCase,
    order_generation::OrderGenerationUseCase,
};
use infra::postgres::{
    postgres_connection,
    repositories::{
        delivery_batches::DeliveryBatchPostgres, orders::OrderPostgres,
        subscriptions::SubscriptionPostgres,
    },
};
use std::sync::Arc;
use tracing::{error, info};
use worker::{
    axum_http::http_serve,
    config::config_loader,
    services::job_loop::{JobPipeline, run_job_loop},
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Worker exited with error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_observability("worker")?;

    let dotenvy_env = Arc::new(config_loader::load()?);
    info!("ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(&dotenvy_env.database.url)?;
    info!("Postgres connection has been established");

    let db_pool_arc = Arc::new(postgres_pool);

    let subscription_repo = Arc::new(SubscriptionPostgres::new(Arc::clone(&db_pool_arc)));
    let order_repo = Arc::new(OrderPostgres::new(Arc::clone(&db_pool_arc)));
    let batch_repo = Arc::new(DeliveryBatchPostgres::new(Arc::clone(&db_pool_arc)));

    let generation = Arc::new(OrderGenerationUseCase::new(
        Arc::clone(&subscription_repo),
        Arc::clone(&order_repo),
        dotenvy_env.jobs.page_size,
        dotenvy_env.jobs.halt_on_error,
    ));
    let assembly = Arc::new(BatchAssemblyUseCase::new(
        Arc::clone(&order_repo),
        Arc::clone(&batch_repo),
        dotenvy_env.jobs.halt_on_error,
    ));
    let locking = Arc::new(BatchLockingUseCase::new(Arc::clone(&batch_repo)));

    let pipeline = Arc::new(JobPipeline {
        generation,
        assembly,
        locking,
        cutoff_hour: dotenvy_env.jobs.cutoff_hour,
    });

    info!("Worker started");

    let loop_pipeline = Arc::clone(&pipeline);
    let interval_secs = dotenvy_env.jobs.interval_secs;
    let job_loop = tokio::spawn(run_job_loop(loop_pipeline, interval_secs));

    let server_config = Arc::clone(&dotenvy_env);
    let job_server = tokio::spawn(async move { http_serve::start(server_config, pipeline).await });

    tokio::select! {
        result = job_loop => result??,
        result = job_server => result??,
    };

    Ok(())
}
