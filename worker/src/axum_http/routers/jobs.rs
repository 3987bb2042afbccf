use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::services::job_loop::{JobPipeline, cutoff_for};
use domain::{
    errors::DomainError,
    repositories::{
        delivery_batches::DeliveryBatchRepository, orders::OrderRepository,
        subscriptions::SubscriptionRepository,
    },
};

// Run example
//   curl -X POST "http://localhost:$SERVER_PORT_WORKER/internal/v1/jobs/generate-orders" \
//     -H "Content-Type: application/json" \
//     -d '{"delivery_date":"2025-01-01"}'

pub fn routes<S, O, B>(pipeline: Arc<JobPipeline<S, O, B>>) -> Router
where
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    B: DeliveryBatchRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/generate-orders", post(generate_orders))
        .route("/create-batches", post(create_batches))
        .route("/lock-batches", post(lock_batches))
        .with_state(pipeline)
}

#[derive(Debug, Deserialize)]
pub struct GenerateOrdersRequest {
    pub delivery_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct CreateBatchesRequest {
    pub delivery_date: NaiveDate,
    pub cutoff_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct LockBatchesRequest {
    pub delivery_date: NaiveDate,
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct JobErrorBody {
    code: &'static str,
    message: String,
}

fn job_error_response(job: &str, err: anyhow::Error) -> Response {
    error!(job, error = ?err, "jobs router: job failed");

    let code = err
        .downcast_ref::<DomainError>()
        .map(|domain_err| domain_err.code())
        .unwrap_or("JOB_FAILED");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(JobErrorBody {
            code,
            message: err.to_string(),
        }),
    )
        .into_response()
}

pub async fn generate_orders<S, O, B>(
    State(pipeline): State<Arc<JobPipeline<S, O, B>>>,
    Json(request): Json<GenerateOrdersRequest>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    B: DeliveryBatchRepository + Send + Sync + 'static,
{
    match pipeline.generation.run(request.delivery_date).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => job_error_response("generate_orders", err),
    }
}

pub async fn create_batches<S, O, B>(
    State(pipeline): State<Arc<JobPipeline<S, O, B>>>,
    Json(request): Json<CreateBatchesRequest>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    B: DeliveryBatchRepository + Send + Sync + 'static,
{
    let cutoff_at = request
        .cutoff_at
        .unwrap_or_else(|| cutoff_for(request.delivery_date, pipeline.cutoff_hour));

    match pipeline.assembly.run(request.delivery_date, cutoff_at).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => job_error_response("create_batches", err),
    }
}

pub async fn lock_batches<S, O, B>(
    State(pipeline): State<Arc<JobPipeline<S, O, B>>>,
    Json(request): Json<LockBatchesRequest>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
    B: DeliveryBatchRepository + Send + Sync + 'static,
{
    let now = request.now.unwrap_or_else(Utc::now);

    match pipeline.locking.run(request.delivery_date, now).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => job_error_response("lock_batches", err),
    }
}
