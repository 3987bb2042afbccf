use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::product_variants;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = product_variants)]
pub struct ProductVariantEntity {
    pub id: i64,
    pub product_id: i64,
    pub sku: String,
    pub name: Option<String>,
    pub is_active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
