use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::entities::delivery_batches::DeliveryBatchEntity;
use crate::entities::orders::OrderEntity;
use crate::errors::DomainError;

/// Deterministic, human-readable batch code. `seq` is the number of
/// batches that already exist for the (date, zone) key: the first batch
/// gets `B20250101-Z1`, a successor created after a lock gets
/// `B20250101-Z1-2`, keeping the unique constraint satisfiable without
/// randomness.
pub fn build_batch_code(delivery_date: NaiveDate, zone_id: Option<i64>, seq: i64) -> String {
    let code = format!(
        "B{}-Z{}",
        delivery_date.format("%Y%m%d"),
        zone_id.unwrap_or(0)
    );

    if seq <= 0 {
        code
    } else {
        format!("{}-{}", code, seq + 1)
    }
}

/// Partition orders by (delivery_date, zone_id). BTreeMap keeps group
/// processing order reproducible across runs.
pub fn group_orders_for_batching(
    orders: &[OrderEntity],
) -> BTreeMap<(NaiveDate, Option<i64>), Vec<i64>> {
    let mut groups: BTreeMap<(NaiveDate, Option<i64>), Vec<i64>> = BTreeMap::new();

    for order in orders {
        groups
            .entry((order.delivery_date, order.zone_id))
            .or_default()
            .push(order.id);
    }

    groups
}

pub fn ensure_batch_open(batch: &DeliveryBatchEntity) -> Result<(), DomainError> {
    if batch.locked_at.is_some() {
        return Err(DomainError::BatchLocked);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupAttachOutcome {
    pub batch_id: i64,
    pub batch_created: bool,
    pub orders_attached: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchAssemblySummary {
    pub delivery_date: NaiveDate,
    pub batches_created: u64,
    pub orders_attached: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_order(id: i64, delivery_date: NaiveDate, zone_id: Option<i64>) -> OrderEntity {
        let now = Utc::now();
        OrderEntity {
            id,
            order_no: format!("O{:012}", id),
            user_id: 1,
            subscription_id: Some(1),
            status: "pending".to_string(),
            delivery_date,
            zone_id,
            shipping_address_id: 1,
            notes: None,
            currency: "THB".to_string(),
            subtotal_amount: 0,
            shipping_amount: 0,
            total_amount: 0,
            generated_key: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_batch(locked: bool) -> DeliveryBatchEntity {
        let now = Utc::now();
        DeliveryBatchEntity {
            id: 1,
            batch_code: "B20250101-Z1".to_string(),
            delivery_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            zone_id: Some(1),
            cutoff_at: now,
            status: if locked { "locked" } else { "open" }.to_string(),
            locked_at: if locked { Some(now) } else { None },
            dispatched_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn batch_code_encodes_date_and_zone() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        assert_eq!(build_batch_code(date, Some(3), 0), "B20250101-Z3");
        assert_eq!(build_batch_code(date, None, 0), "B20250101-Z0");
    }

    #[test]
    fn successor_batch_codes_carry_a_sequence_suffix() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        assert_eq!(build_batch_code(date, Some(1), 1), "B20250101-Z1-2");
        assert_eq!(build_batch_code(date, Some(1), 2), "B20250101-Z1-3");
    }

    #[test]
    fn groups_split_by_zone_and_keep_all_orders() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let orders = vec![
            sample_order(1, date, Some(1)),
            sample_order(2, date, Some(1)),
            sample_order(3, date, Some(2)),
            sample_order(4, date, None),
        ];

        let groups = group_orders_for_batching(&orders);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[&(date, Some(1))], vec![1, 2]);
        assert_eq!(groups[&(date, Some(2))], vec![3]);
        assert_eq!(groups[&(date, None)], vec![4]);
    }

    #[test]
    fn open_batch_passes_lock_check() {
        assert!(ensure_batch_open(&sample_batch(false)).is_ok());
    }

    #[test]
    fn locked_batch_rejects_attachment() {
        assert_eq!(
            ensure_batch_open(&sample_batch(true)),
            Err(DomainError::BatchLocked)
        );
    }
}
