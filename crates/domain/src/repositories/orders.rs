use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;

use crate::entities::orders::OrderEntity;
use crate::value_objects::enums::order_statuses::OrderStatus;
use crate::value_objects::order_generation::GeneratedOrder;
use crate::value_objects::orders::OrderWithItems;

#[async_trait]
#[automock]
pub trait OrderRepository {
    /// One atomic transaction: exclusive row lock on the subscription,
    /// lifecycle and due checks, idempotent lookup by generated key, then
    /// order + item snapshot creation with derived totals. A key hit
    /// returns the existing order with `was_created = false` and performs
    /// no writes.
    async fn generate_from_subscription(
        &self,
        subscription_id: i64,
        delivery_date: NaiveDate,
    ) -> Result<GeneratedOrder>;

    async fn list_eligible_for_batching(
        &self,
        delivery_date: NaiveDate,
        status: OrderStatus,
    ) -> Result<Vec<OrderEntity>>;

    async fn find_with_items(&self, order_id: i64) -> Result<Option<OrderWithItems>>;

    async fn list_by_delivery_date(&self, delivery_date: NaiveDate) -> Result<Vec<OrderEntity>>;
}
