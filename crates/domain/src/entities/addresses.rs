use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::addresses;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = addresses)]
pub struct AddressEntity {
    pub id: i64,
    pub user_id: i64,
    pub label: Option<String>,
    pub recipient_name: String,
    pub phone: String,
    pub line1: String,
    pub line2: Option<String>,
    pub subdistrict: Option<String>,
    pub district: Option<String>,
    pub province: String,
    pub postal_code: String,
    pub country_code: String,
    pub zone_id: Option<i64>,
    pub is_default: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
