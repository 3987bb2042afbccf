use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::{
        subscription_items::{InsertSubscriptionItemEntity, SubscriptionItemEntity},
        subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    },
    repositories::subscriptions::SubscriptionRepository,
    schema::{subscription_items, subscriptions},
    value_objects::{
        enums::subscription_statuses::SubscriptionStatus,
        subscriptions::{CreateSubscriptionItemModel, SubscriptionWithItems},
    },
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn list_due_active(
        &self,
        cutoff_date: NaiveDate,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscriptions::table
            .filter(subscriptions::paused_at.is_null())
            .filter(subscriptions::canceled_at.is_null())
            .filter(subscriptions::deleted_at.is_null())
            .filter(subscriptions::next_run_date.le(cutoff_date))
            .order(subscriptions::id.asc())
            .limit(limit)
            .offset(offset)
            .select(SubscriptionEntity::as_select())
            .load::<SubscriptionEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_owned_with_items(
        &self,
        subscription_id: i64,
        user_id: i64,
    ) -> Result<Option<SubscriptionWithItems>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let subscription = subscriptions::table
            .filter(subscriptions::id.eq(subscription_id))
            .filter(subscriptions::user_id.eq(user_id))
            .filter(subscriptions::deleted_at.is_null())
            .select(SubscriptionEntity::as_select())
            .first::<SubscriptionEntity>(&mut conn)
            .optional()?;

        let Some(subscription) = subscription else {
            return Ok(None);
        };

        let items = subscription_items::table
            .filter(subscription_items::subscription_id.eq(subscription.id))
            .order(subscription_items::id.asc())
            .select(SubscriptionItemEntity::as_select())
            .load::<SubscriptionItemEntity>(&mut conn)?;

        Ok(Some(SubscriptionWithItems {
            subscription,
            items,
        }))
    }

    async fn create_with_items(
        &self,
        subscription: InsertSubscriptionEntity,
        items: Vec<CreateSubscriptionItemModel>,
    ) -> Result<SubscriptionWithItems> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let created = conn.transaction::<SubscriptionWithItems, anyhow::Error, _>(|conn| {
            let subscription = diesel::insert_into(subscriptions::table)
                .values(&subscription)
                .returning(SubscriptionEntity::as_returning())
                .get_result::<SubscriptionEntity>(conn)?;

            let now = Utc::now();
            let mut created_items = Vec::with_capacity(items.len());
            for item in items {
                let created_item = diesel::insert_into(subscription_items::table)
                    .values(&InsertSubscriptionItemEntity {
                        subscription_id: subscription.id,
                        variant_id: item.variant_id,
                        quantity: item.quantity,
                        unit_amount: item.unit_amount,
                        currency: item.currency,
                        is_active: true,
                        created_at: now,
                        updated_at: now,
                    })
                    .returning(SubscriptionItemEntity::as_returning())
                    .get_result::<SubscriptionItemEntity>(conn)?;

                created_items.push(created_item);
            }

            Ok(SubscriptionWithItems {
                subscription,
                items: created_items,
            })
        })?;

        Ok(created)
    }

    async fn mark_paused(&self, subscription_id: i64, now: DateTime<Utc>) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        diesel::update(
            subscriptions::table
                .filter(subscriptions::id.eq(subscription_id))
                .filter(subscriptions::paused_at.is_null())
                .filter(subscriptions::canceled_at.is_null()),
        )
        .set((
            subscriptions::paused_at.eq(Some(now)),
            subscriptions::status.eq(SubscriptionStatus::Paused.to_string()),
            subscriptions::updated_at.eq(now),
        ))
        .execute(&mut conn)?;

        Ok(())
    }

    async fn clear_paused(&self, subscription_id: i64, now: DateTime<Utc>) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        diesel::update(
            subscriptions::table
                .filter(subscriptions::id.eq(subscription_id))
                .filter(subscriptions::canceled_at.is_null()),
        )
        .set((
            subscriptions::paused_at.eq(None::<DateTime<Utc>>),
            subscriptions::status.eq(SubscriptionStatus::Active.to_string()),
            subscriptions::updated_at.eq(now),
        ))
        .execute(&mut conn)?;

        Ok(())
    }

    async fn mark_canceled(&self, subscription_id: i64, now: DateTime<Utc>) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        diesel::update(
            subscriptions::table
                .filter(subscriptions::id.eq(subscription_id))
                .filter(subscriptions::canceled_at.is_null()),
        )
        .set((
            subscriptions::canceled_at.eq(Some(now)),
            subscriptions::paused_at.eq(None::<DateTime<Utc>>),
            subscriptions::status.eq(SubscriptionStatus::Canceled.to_string()),
            subscriptions::updated_at.eq(now),
        ))
        .execute(&mut conn)?;

        Ok(())
    }
}
