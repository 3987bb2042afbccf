use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use mockall::automock;

use crate::entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity};
use crate::value_objects::subscriptions::{CreateSubscriptionItemModel, SubscriptionWithItems};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    /// Due and active: all three lifecycle timestamps null and
    /// `next_run_date <= cutoff_date`. Ascending id for stable paging.
    async fn list_due_active(
        &self,
        cutoff_date: NaiveDate,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SubscriptionEntity>>;

    async fn find_owned_with_items(
        &self,
        subscription_id: i64,
        user_id: i64,
    ) -> Result<Option<SubscriptionWithItems>>;

    /// Subscription and items land in one transaction; item rows pick up
    /// the fresh subscription id.
    async fn create_with_items(
        &self,
        subscription: InsertSubscriptionEntity,
        items: Vec<CreateSubscriptionItemModel>,
    ) -> Result<SubscriptionWithItems>;

    /// Guarded update: no-op when already paused or canceled.
    async fn mark_paused(&self, subscription_id: i64, now: DateTime<Utc>) -> Result<()>;

    /// Guarded update: no-op when not paused or canceled.
    async fn clear_paused(&self, subscription_id: i64, now: DateTime<Utc>) -> Result<()>;

    /// Guarded update: no-op when already canceled. Also clears `paused_at`.
    async fn mark_canceled(&self, subscription_id: i64, now: DateTime<Utc>) -> Result<()>;
}
