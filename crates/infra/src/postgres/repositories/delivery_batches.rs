use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::{PgConnection, RunQueryDsl, prelude::*};
use std::sync::Arc;

use crate::postgres::postgres_connection::PgPoolSquad;
use domain::{
    entities::{
        delivery_batch_orders::DeliveryBatchOrderEntity,
        delivery_batches::{DeliveryBatchEntity, InsertDeliveryBatchEntity},
        orders::OrderEntity,
    },
    errors::DomainError,
    repositories::delivery_batches::DeliveryBatchRepository,
    schema::{delivery_batch_orders, delivery_batches, orders},
    value_objects::{
        batch_assembly::{GroupAttachOutcome, build_batch_code, ensure_batch_open},
        batch_locking::should_lock,
        enums::delivery_batch_statuses::DeliveryBatchStatus,
    },
};

pub struct DeliveryBatchPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl DeliveryBatchPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

/// OPEN, unlocked batch for the (date, zone) key, locked FOR UPDATE so
/// concurrent attachers serialize. Locked batches are invisible here; an
/// order arriving after lock gets a fresh batch instead.
fn open_batch_for_update(
    conn: &mut PgConnection,
    delivery_date: NaiveDate,
    zone_id: Option<i64>,
) -> Result<Option<DeliveryBatchEntity>, diesel::result::Error> {
    delivery_batches::table
        .filter(delivery_batches::delivery_date.eq(delivery_date))
        .filter(delivery_batches::zone_id.is_not_distinct_from(zone_id))
        .filter(delivery_batches::status.eq(DeliveryBatchStatus::Open.to_string()))
        .filter(delivery_batches::locked_at.is_null())
        .select(DeliveryBatchEntity::as_select())
        .for_update()
        .first::<DeliveryBatchEntity>(conn)
        .optional()
}

fn create_open_batch(
    conn: &mut PgConnection,
    delivery_date: NaiveDate,
    zone_id: Option<i64>,
    cutoff_at: DateTime<Utc>,
) -> Result<DeliveryBatchEntity, diesel::result::Error> {
    // Predecessors (locked ones included) push the code sequence forward.
    let existing: i64 = delivery_batches::table
        .filter(delivery_batches::delivery_date.eq(delivery_date))
        .filter(delivery_batches::zone_id.is_not_distinct_from(zone_id))
        .count()
        .get_result(conn)?;

    let now = Utc::now();
    diesel::insert_into(delivery_batches::table)
        .values(&InsertDeliveryBatchEntity {
            batch_code: build_batch_code(delivery_date, zone_id, existing),
            delivery_date,
            zone_id,
            cutoff_at,
            status: DeliveryBatchStatus::Open.to_string(),
            locked_at: None,
            dispatched_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        })
        .returning(DeliveryBatchEntity::as_returning())
        .get_result::<DeliveryBatchEntity>(conn)
}

fn batch_has_order(
    conn: &mut PgConnection,
    batch_id: i64,
    order_id: i64,
) -> Result<bool, diesel::result::Error> {
    diesel::select(diesel::dsl::exists(
        delivery_batch_orders::table
            .filter(delivery_batch_orders::batch_id.eq(batch_id))
            .filter(delivery_batch_orders::order_id.eq(order_id)),
    ))
    .get_result::<bool>(conn)
}

fn attach_order_to_batch(
    conn: &mut PgConnection,
    batch_id: i64,
    order_id: i64,
) -> Result<bool, diesel::result::Error> {
    if batch_has_order(conn, batch_id, order_id)? {
        return Ok(false);
    }

    diesel::insert_into(delivery_batch_orders::table)
        .values(&DeliveryBatchOrderEntity {
            batch_id,
            order_id,
            created_at: Utc::now(),
        })
        .execute(conn)?;

    Ok(true)
}

#[async_trait]
impl DeliveryBatchRepository for DeliveryBatchPostgres {
    async fn attach_order(&self, order_id: i64, cutoff_at: DateTime<Utc>) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let batch_id = conn.transaction::<i64, anyhow::Error, _>(|conn| {
            let order = orders::table
                .find(order_id)
                .select(OrderEntity::as_select())
                .first::<OrderEntity>(conn)
                .optional()?
                .ok_or(DomainError::OrderNotFound)?;

            let batch = match open_batch_for_update(conn, order.delivery_date, order.zone_id)? {
                Some(batch) => batch,
                None => create_open_batch(conn, order.delivery_date, order.zone_id, cutoff_at)?,
            };

            ensure_batch_open(&batch)?;
            attach_order_to_batch(conn, batch.id, order.id)?;

            Ok(batch.id)
        })?;

        Ok(batch_id)
    }

    async fn attach_group(
        &self,
        delivery_date: NaiveDate,
        zone_id: Option<i64>,
        order_ids: Vec<i64>,
        cutoff_at: DateTime<Utc>,
    ) -> Result<GroupAttachOutcome> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let outcome = conn.transaction::<GroupAttachOutcome, anyhow::Error, _>(|conn| {
            let (batch, batch_created) =
                match open_batch_for_update(conn, delivery_date, zone_id)? {
                    Some(batch) => (batch, false),
                    None => (
                        create_open_batch(conn, delivery_date, zone_id, cutoff_at)?,
                        true,
                    ),
                };

            ensure_batch_open(&batch)?;

            let mut orders_attached = 0_u64;
            for order_id in order_ids {
                if attach_order_to_batch(conn, batch.id, order_id)? {
                    orders_attached += 1;
                }
            }

            Ok(GroupAttachOutcome {
                batch_id: batch.id,
                batch_created,
                orders_attached,
            })
        })?;

        Ok(outcome)
    }

    async fn list_due_batch_ids(
        &self,
        delivery_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Vec<i64>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let ids = delivery_batches::table
            .filter(delivery_batches::delivery_date.eq(delivery_date))
            .filter(delivery_batches::status.eq(DeliveryBatchStatus::Open.to_string()))
            .filter(delivery_batches::locked_at.is_null())
            .filter(delivery_batches::cutoff_at.le(now))
            .order(delivery_batches::id.asc())
            .select(delivery_batches::id)
            .load::<i64>(&mut conn)?;

        Ok(ids)
    }

    async fn lock_batch_if_due(&self, batch_id: i64, now: DateTime<Utc>) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let locked = conn.transaction::<bool, anyhow::Error, _>(|conn| {
            let batch = delivery_batches::table
                .find(batch_id)
                .select(DeliveryBatchEntity::as_select())
                .for_update()
                .first::<DeliveryBatchEntity>(conn)
                .optional()?;

            let Some(batch) = batch else {
                return Ok(false);
            };

            if !should_lock(&batch, now) {
                return Ok(false);
            }

            diesel::update(delivery_batches::table.find(batch.id))
                .set((
                    delivery_batches::locked_at.eq(Some(now)),
                    delivery_batches::status.eq(DeliveryBatchStatus::Locked.to_string()),
                    delivery_batches::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;

            Ok(true)
        })?;

        Ok(locked)
    }

    async fn find_by_id(&self, batch_id: i64) -> Result<Option<DeliveryBatchEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let batch = delivery_batches::table
            .find(batch_id)
            .select(DeliveryBatchEntity::as_select())
            .first::<DeliveryBatchEntity>(&mut conn)
            .optional()?;

        Ok(batch)
    }

    async fn list_recent(&self) -> Result<Vec<DeliveryBatchEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = delivery_batches::table
            .order(delivery_batches::delivery_date.desc())
            .select(DeliveryBatchEntity::as_select())
            .load::<DeliveryBatchEntity>(&mut conn)?;

        Ok(results)
    }
}
