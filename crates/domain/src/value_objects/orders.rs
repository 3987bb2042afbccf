use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::entities::order_items::OrderItemEntity;
use crate::entities::orders::OrderEntity;

#[derive(Debug, Clone)]
pub struct OrderWithItems {
    pub order: OrderEntity,
    pub items: Vec<OrderItemEntity>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDto {
    pub id: i64,
    pub order_no: String,
    pub user_id: i64,
    pub subscription_id: Option<i64>,
    pub status: String,
    pub delivery_date: NaiveDate,
    pub zone_id: Option<i64>,
    pub shipping_address_id: i64,
    pub currency: String,
    pub subtotal_amount: i64,
    pub shipping_amount: i64,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemDto {
    pub id: i64,
    pub variant_id: i64,
    pub sku: String,
    pub name: String,
    pub quantity: i32,
    pub unit_amount: i64,
    pub line_total_amount: i64,
}

/// List view; item rows stay behind the detail endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummaryDto {
    pub id: i64,
    pub order_no: String,
    pub user_id: i64,
    pub subscription_id: Option<i64>,
    pub status: String,
    pub delivery_date: NaiveDate,
    pub zone_id: Option<i64>,
    pub currency: String,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
}

impl From<OrderEntity> for OrderSummaryDto {
    fn from(value: OrderEntity) -> Self {
        Self {
            id: value.id,
            order_no: value.order_no,
            user_id: value.user_id,
            subscription_id: value.subscription_id,
            status: value.status,
            delivery_date: value.delivery_date,
            zone_id: value.zone_id,
            currency: value.currency,
            total_amount: value.total_amount,
            created_at: value.created_at,
        }
    }
}

impl From<OrderItemEntity> for OrderItemDto {
    fn from(value: OrderItemEntity) -> Self {
        Self {
            id: value.id,
            variant_id: value.variant_id,
            sku: value.sku,
            name: value.name,
            quantity: value.quantity,
            unit_amount: value.unit_amount,
            line_total_amount: value.line_total_amount,
        }
    }
}

impl From<OrderWithItems> for OrderDto {
    fn from(value: OrderWithItems) -> Self {
        let OrderWithItems { order, items } = value;

        Self {
            id: order.id,
            order_no: order.order_no,
            user_id: order.user_id,
            subscription_id: order.subscription_id,
            status: order.status,
            delivery_date: order.delivery_date,
            zone_id: order.zone_id,
            shipping_address_id: order.shipping_address_id,
            currency: order.currency,
            subtotal_amount: order.subtotal_amount,
            shipping_amount: order.shipping_amount,
            total_amount: order.total_amount,
            created_at: order.created_at,
            items: items.into_iter().map(OrderItemDto::from).collect(),
        }
    }
}
