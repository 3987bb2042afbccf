use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::schema::subscriptions;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscriptions)]
pub struct SubscriptionEntity {
    pub id: i64,
    pub user_id: i64,
    pub plan_id: i64,
    pub status: String,
    pub start_date: NaiveDate,
    pub next_run_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub timezone: String,
    pub default_address_id: Option<i64>,
    pub paused_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscriptions)]
pub struct InsertSubscriptionEntity {
    pub user_id: i64,
    pub plan_id: i64,
    pub status: String,
    pub start_date: NaiveDate,
    pub next_run_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub timezone: String,
    pub default_address_id: Option<i64>,
    pub paused_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
