use crate::axum_http::error_responses::error_response;
use crate::usecases::delivery_batches::{DeliveryBatchError, DeliveryBatchUseCase};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use domain::repositories::delivery_batches::DeliveryBatchRepository;
use infra::postgres::{
    postgres_connection::PgPoolSquad, repositories::delivery_batches::DeliveryBatchPostgres,
};
use std::sync::Arc;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let batch_repo = DeliveryBatchPostgres::new(Arc::clone(&db_pool));
    let batch_usecase = DeliveryBatchUseCase::new(Arc::new(batch_repo));

    Router::new()
        .route("/", get(list_batches))
        .route("/:batch_id", get(get_batch))
        .with_state(Arc::new(batch_usecase))
}

fn batch_error_response(err: DeliveryBatchError) -> Response {
    error_response(err.status_code(), err.code(), err.to_string())
}

pub async fn list_batches<B>(
    State(batch_usecase): State<Arc<DeliveryBatchUseCase<B>>>,
) -> impl IntoResponse
where
    B: DeliveryBatchRepository + Send + Sync,
{
    match batch_usecase.list().await {
        Ok(batches) => (StatusCode::OK, Json(batches)).into_response(),
        Err(err) => batch_error_response(err),
    }
}

pub async fn get_batch<B>(
    State(batch_usecase): State<Arc<DeliveryBatchUseCase<B>>>,
    Path(batch_id): Path<i64>,
) -> impl IntoResponse
where
    B: DeliveryBatchRepository + Send + Sync,
{
    match batch_usecase.get(batch_id).await {
        Ok(dto) => (StatusCode::OK, Json(dto)).into_response(),
        Err(err) => batch_error_response(err),
    }
}
