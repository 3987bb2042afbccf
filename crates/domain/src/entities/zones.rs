use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::zones;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = zones)]
pub struct ZoneEntity {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
