use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::schema::orders;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = orders)]
pub struct OrderEntity {
    pub id: i64,
    pub order_no: String,
    pub user_id: i64,
    pub subscription_id: Option<i64>,
    pub status: String,
    pub delivery_date: NaiveDate,
    pub zone_id: Option<i64>,
    pub shipping_address_id: i64,
    pub notes: Option<String>,
    pub currency: String,
    pub subtotal_amount: i64,
    pub shipping_amount: i64,
    pub total_amount: i64,
    pub generated_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub struct InsertOrderEntity {
    pub order_no: String,
    pub user_id: i64,
    pub subscription_id: Option<i64>,
    pub status: String,
    pub delivery_date: NaiveDate,
    pub zone_id: Option<i64>,
    pub shipping_address_id: i64,
    pub notes: Option<String>,
    pub currency: String,
    pub subtotal_amount: i64,
    pub shipping_amount: i64,
    pub total_amount: i64,
    pub generated_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
