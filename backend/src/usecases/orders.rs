use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{error, info, warn};

use domain::{
    repositories::orders::OrderRepository,
    value_objects::orders::{OrderDto, OrderSummaryDto},
};

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order not found")]
    OrderNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl OrderError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            OrderError::OrderNotFound => StatusCode::NOT_FOUND,
            OrderError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            OrderError::OrderNotFound => "ORDER_NOT_FOUND",
            OrderError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

pub struct OrderUseCase<O>
where
    O: OrderRepository + Send + Sync + 'static,
{
    order_repo: Arc<O>,
}

impl<O> OrderUseCase<O>
where
    O: OrderRepository + Send + Sync + 'static,
{
    pub fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    pub async fn get(&self, order_id: i64) -> Result<OrderDto, OrderError> {
        let found = self
            .order_repo
            .find_with_items(order_id)
            .await
            .map_err(|err| {
                error!(order_id, db_error = ?err, "orders: failed to load order");
                OrderError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(order_id, "orders: not found");
                OrderError::OrderNotFound
            })?;

        Ok(OrderDto::from(found))
    }

    pub async fn list_by_delivery_date(
        &self,
        delivery_date: NaiveDate,
    ) -> Result<Vec<OrderSummaryDto>, OrderError> {
        let orders = self
            .order_repo
            .list_by_delivery_date(delivery_date)
            .await
            .map_err(|err| {
                error!(%delivery_date, db_error = ?err, "orders: failed to list orders");
                OrderError::Internal(err)
            })?;

        info!(%delivery_date, order_count = orders.len(), "orders: listed");

        Ok(orders.into_iter().map(OrderSummaryDto::from).collect())
    }
}
