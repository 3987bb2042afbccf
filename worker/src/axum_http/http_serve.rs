use crate::{
    axum_http::{default_routers, routers},
    config::config_model::DotEnvyConfig,
    services::job_loop::JobPipeline,
};
use anyhow::Result;
use axum::{Router, routing::get};
use domain::repositories::{
    delivery_batches::DeliveryBatchRepository, orders::OrderRepository,
    subscriptions::SubscriptionRepository,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::info;

pub async fn start<S, O, B>(
    config: Arc<DotEnvyConfig>,
    pipeline: Arc<JobPipeline<S, O, B>>,
) -> Result<()>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    B: DeliveryBatchRepository + Send + Sync + 'static,
{
    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest("/internal/v1/jobs", routers::jobs::routes(pipeline))
        .route("/internal/v1/health-check", get(default_routers::health_check))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.worker_server.timeout,
        )))
        .layer(RequestBodyLimitLayer::new(
            (config.worker_server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.worker_server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Worker server is running on port {}", config.worker_server.port);
    axum::serve(listener, app).await?;

    Ok(())
}
