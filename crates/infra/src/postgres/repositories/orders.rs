use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::{
        order_items::OrderItemEntity,
        orders::{InsertOrderEntity, OrderEntity},
        product_variants::ProductVariantEntity,
        subscription_items::SubscriptionItemEntity,
        subscriptions::SubscriptionEntity,
    },
    errors::DomainError,
    repositories::orders::OrderRepository,
    schema::{order_items, orders, product_variants, subscription_items, subscriptions},
    value_objects::{
        enums::order_statuses::OrderStatus,
        order_generation::{
            GeneratedOrder, build_generated_key, build_order_lines, build_order_no,
            ensure_generatable,
        },
        orders::OrderWithItems,
    },
};

pub struct OrderPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl OrderPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl OrderRepository for OrderPostgres {
    async fn generate_from_subscription(
        &self,
        subscription_id: i64,
        delivery_date: NaiveDate,
    ) -> Result<GeneratedOrder> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let generated = conn.transaction::<GeneratedOrder, anyhow::Error, _>(|conn| {
            // Lock the subscription row first; concurrent runs for the
            // same subscription serialize here. The unique constraint on
            // generated_key stays as the second line of defense.
            let subscription = subscriptions::table
                .find(subscription_id)
                .select(SubscriptionEntity::as_select())
                .for_update()
                .first::<SubscriptionEntity>(conn)
                .optional()?
                .ok_or(DomainError::SubscriptionNotFound)?;

            ensure_generatable(&subscription, delivery_date)?;

            let generated_key = build_generated_key(subscription.id, delivery_date);
            let existing = orders::table
                .filter(orders::generated_key.eq(&generated_key))
                .select(OrderEntity::as_select())
                .first::<OrderEntity>(conn)
                .optional()?;

            if let Some(order) = existing {
                return Ok(GeneratedOrder {
                    order,
                    was_created: false,
                });
            }

            let shipping_address_id = subscription
                .default_address_id
                .ok_or(DomainError::SubscriptionDefaultAddressRequired)?;

            let now = Utc::now();
            let order = diesel::insert_into(orders::table)
                .values(&InsertOrderEntity {
                    order_no: build_order_no(&generated_key),
                    user_id: subscription.user_id,
                    subscription_id: Some(subscription.id),
                    status: OrderStatus::Pending.to_string(),
                    delivery_date,
                    zone_id: None,
                    shipping_address_id,
                    notes: None,
                    currency: "THB".to_string(),
                    subtotal_amount: 0,
                    shipping_amount: 0,
                    total_amount: 0,
                    generated_key: Some(generated_key),
                    created_at: now,
                    updated_at: now,
                })
                .returning(OrderEntity::as_returning())
                .get_result::<OrderEntity>(conn)?;

            let item_rows = subscription_items::table
                .left_join(product_variants::table)
                .filter(subscription_items::subscription_id.eq(subscription.id))
                .order(subscription_items::id.asc())
                .select((
                    SubscriptionItemEntity::as_select(),
                    Option::<ProductVariantEntity>::as_select(),
                ))
                .load::<(SubscriptionItemEntity, Option<ProductVariantEntity>)>(conn)?;

            let lines = build_order_lines(order.id, &item_rows, now)?;

            let mut subtotal_amount = 0_i64;
            for line in lines {
                let already_attached = diesel::select(diesel::dsl::exists(
                    order_items::table
                        .filter(order_items::order_id.eq(line.order_id))
                        .filter(order_items::variant_id.eq(line.variant_id)),
                ))
                .get_result::<bool>(conn)?;

                if already_attached {
                    continue;
                }

                subtotal_amount += line.line_total_amount;
                diesel::insert_into(order_items::table)
                    .values(&line)
                    .execute(conn)?;
            }

            let order = diesel::update(orders::table.find(order.id))
                .set((
                    orders::subtotal_amount.eq(subtotal_amount),
                    orders::total_amount.eq(subtotal_amount + order.shipping_amount),
                    orders::updated_at.eq(now),
                ))
                .returning(OrderEntity::as_returning())
                .get_result::<OrderEntity>(conn)?;

            Ok(GeneratedOrder {
                order,
                was_created: true,
            })
        })?;

        Ok(generated)
    }

    async fn list_eligible_for_batching(
        &self,
        delivery_date: NaiveDate,
        status: OrderStatus,
    ) -> Result<Vec<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = orders::table
            .filter(orders::delivery_date.eq(delivery_date))
            .filter(orders::status.eq(status.to_string()))
            .order(orders::id.asc())
            .select(OrderEntity::as_select())
            .load::<OrderEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_with_items(&self, order_id: i64) -> Result<Option<OrderWithItems>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order = orders::table
            .find(order_id)
            .select(OrderEntity::as_select())
            .first::<OrderEntity>(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = order_items::table
            .filter(order_items::order_id.eq(order.id))
            .order(order_items::id.asc())
            .select(OrderItemEntity::as_select())
            .load::<OrderItemEntity>(&mut conn)?;

        Ok(Some(OrderWithItems { order, items }))
    }

    async fn list_by_delivery_date(&self, delivery_date: NaiveDate) -> Result<Vec<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = orders::table
            .filter(orders::delivery_date.eq(delivery_date))
            .order(orders::id.asc())
            .select(OrderEntity::as_select())
            .load::<OrderEntity>(&mut conn)?;

        Ok(results)
    }
}
