use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::subscription_items::SubscriptionItemEntity;
use crate::entities::subscriptions::SubscriptionEntity;

#[derive(Debug, Clone)]
pub struct SubscriptionWithItems {
    pub subscription: SubscriptionEntity,
    pub items: Vec<SubscriptionItemEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubscriptionModel {
    pub plan_id: i64,
    pub start_date: NaiveDate,
    pub default_address_id: i64,
    pub items: Vec<CreateSubscriptionItemModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubscriptionItemModel {
    pub variant_id: i64,
    pub quantity: i32,
    pub unit_amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionDto {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<SubscriptionItemDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionItemDto {
    pub id: i64,
    pub variant_id: i64,
    pub quantity: i32,
    pub unit_amount: i64,
    pub currency: String,
    pub is_active: bool,
}

impl From<SubscriptionItemEntity> for SubscriptionItemDto {
    fn from(value: SubscriptionItemEntity) -> Self {
        Self {
            id: value.id,
            variant_id: value.variant_id,
            quantity: value.quantity,
            unit_amount: value.unit_amount,
            currency: value.currency,
            is_active: value.is_active,
        }
    }
}

impl From<SubscriptionWithItems> for SubscriptionDto {
    fn from(value: SubscriptionWithItems) -> Self {
        let SubscriptionWithItems {
            subscription,
            items,
        } = value;

        Self {
            id: subscription.id,
            user_id: subscription.user_id,
            plan_id: subscription.plan_id,
            status: subscription.status,
            start_date: subscription.start_date,
            next_run_date: subscription.next_run_date,
            end_date: subscription.end_date,
            timezone: subscription.timezone,
            default_address_id: subscription.default_address_id,
            paused_at: subscription.paused_at,
            canceled_at: subscription.canceled_at,
            created_at: subscription.created_at,
            updated_at: subscription.updated_at,
            items: items.into_iter().map(SubscriptionItemDto::from).collect(),
        }
    }
}
