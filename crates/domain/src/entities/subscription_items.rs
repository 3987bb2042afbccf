use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::subscription_items;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscription_items)]
pub struct SubscriptionItemEntity {
    pub id: i64,
    pub subscription_id: i64,
    pub variant_id: i64,
    pub quantity: i32,
    pub unit_amount: i64,
    pub currency: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscription_items)]
pub struct InsertSubscriptionItemEntity {
    pub subscription_id: i64,
    pub variant_id: i64,
    pub quantity: i32,
    pub unit_amount: i64,
    pub currency: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
