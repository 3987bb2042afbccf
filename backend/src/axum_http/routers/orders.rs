use crate::axum_http::error_responses::error_response;
use crate::usecases::orders::{OrderError, OrderUseCase};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use domain::repositories::orders::OrderRepository;
use infra::postgres::{postgres_connection::PgPoolSquad, repositories::orders::OrderPostgres};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let order_repo = OrderPostgres::new(Arc::clone(&db_pool));
    let order_usecase = OrderUseCase::new(Arc::new(order_repo));

    Router::new()
        .route("/", get(list_orders))
        .route("/:order_id", get(get_order))
        .with_state(Arc::new(order_usecase))
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub delivery_date: NaiveDate,
}

fn order_error_response(err: OrderError) -> Response {
    error_response(err.status_code(), err.code(), err.to_string())
}

pub async fn list_orders<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    Query(query): Query<ListOrdersQuery>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync,
{
    match order_usecase.list_by_delivery_date(query.delivery_date).await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(err) => order_error_response(err),
    }
}

pub async fn get_order<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    Path(order_id): Path<i64>,
) -> impl IntoResponse
where
    O: OrderRepository + Send + Sync,
{
    match order_usecase.get(order_id).await {
        Ok(dto) => (StatusCode::OK, Json(dto)).into_response(),
        Err(err) => order_error_response(err),
    }
}
