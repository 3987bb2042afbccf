use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::order_items;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = order_items)]
pub struct OrderItemEntity {
    pub id: i64,
    pub order_id: i64,
    pub variant_id: i64,
    pub sku: String,
    pub name: String,
    pub quantity: i32,
    pub unit_amount: i64,
    pub line_total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = order_items)]
pub struct InsertOrderItemEntity {
    pub order_id: i64,
    pub variant_id: i64,
    pub sku: String,
    pub name: String,
    pub quantity: i32,
    pub unit_amount: i64,
    pub line_total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
