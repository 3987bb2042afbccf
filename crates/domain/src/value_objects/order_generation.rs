use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::entities::order_items::InsertOrderItemEntity;
use crate::entities::orders::OrderEntity;
use crate::entities::product_variants::ProductVariantEntity;
use crate::entities::subscription_items::SubscriptionItemEntity;
use crate::entities::subscriptions::SubscriptionEntity;
use crate::errors::DomainError;

/// Deterministic business key, one per (subscription, delivery date).
/// Backed by a unique constraint on `orders.generated_key`.
pub fn build_generated_key(subscription_id: i64, delivery_date: NaiveDate) -> String {
    format!(
        "sub:{}|delivery:{}",
        subscription_id,
        delivery_date.format("%Y-%m-%d")
    )
}

/// Order number derived from the generated key, so re-runs reproduce the
/// same number without a central counter.
pub fn build_order_no(generated_key: &str) -> String {
    let digest = Sha256::digest(generated_key.as_bytes());
    let short: String = hex::encode(digest).chars().take(12).collect();
    format!("O{}", short.to_uppercase())
}

/// Lifecycle timestamps are the source of truth; the cosmetic `status`
/// column is deliberately ignored here.
pub fn ensure_generatable(
    subscription: &SubscriptionEntity,
    delivery_date: NaiveDate,
) -> Result<(), DomainError> {
    if subscription.deleted_at.is_some()
        || subscription.canceled_at.is_some()
        || subscription.paused_at.is_some()
    {
        return Err(DomainError::SubscriptionNotActive);
    }

    if subscription.next_run_date > delivery_date {
        return Err(DomainError::SubscriptionNotDue);
    }

    Ok(())
}

/// Snapshot active subscription items into order lines. Prices and names
/// are frozen here and never recomputed from the catalog afterwards.
pub fn build_order_lines(
    order_id: i64,
    items: &[(SubscriptionItemEntity, Option<ProductVariantEntity>)],
    now: DateTime<Utc>,
) -> Result<Vec<InsertOrderItemEntity>, DomainError> {
    let mut lines = Vec::new();

    for (item, variant) in items {
        if !item.is_active {
            continue;
        }

        if item.quantity <= 0 {
            continue;
        }

        let variant = variant
            .as_ref()
            .ok_or(DomainError::SubscriptionItemVariantMissing)?;

        if item.unit_amount < 0 {
            return Err(DomainError::SubscriptionItemPriceInvalid);
        }

        let line_total = item.unit_amount * item.quantity as i64;

        lines.push(InsertOrderItemEntity {
            order_id,
            variant_id: item.variant_id,
            sku: variant.sku.clone(),
            name: variant.name.clone().unwrap_or_default(),
            quantity: item.quantity,
            unit_amount: item.unit_amount,
            line_total_amount: line_total,
            created_at: now,
            updated_at: now,
        });
    }

    Ok(lines)
}

#[derive(Debug, Clone)]
pub struct GeneratedOrder {
    pub order: OrderEntity,
    pub was_created: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerateOrdersSummary {
    pub delivery_date: NaiveDate,
    pub created: u64,
    pub existing: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_subscription() -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: 11,
            user_id: 1,
            plan_id: 1,
            status: "active".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            next_run_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: None,
            timezone: "Asia/Bangkok".to_string(),
            default_address_id: Some(5),
            paused_at: None,
            canceled_at: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_item(variant_id: i64, quantity: i32, unit_amount: i64) -> SubscriptionItemEntity {
        let now = Utc::now();
        SubscriptionItemEntity {
            id: variant_id * 100,
            subscription_id: 11,
            variant_id,
            quantity,
            unit_amount,
            currency: "THB".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_variant(id: i64, sku: &str, name: Option<&str>) -> ProductVariantEntity {
        let now = Utc::now();
        ProductVariantEntity {
            id,
            product_id: 1,
            sku: sku.to_string(),
            name: name.map(|n| n.to_string()),
            is_active: true,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn generated_key_matches_expected_format() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(build_generated_key(42, date), "sub:42|delivery:2025-01-01");
    }

    #[test]
    fn order_no_is_deterministic_and_short() {
        let key = build_generated_key(42, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let first = build_order_no(&key);
        let second = build_order_no(&key);

        assert_eq!(first, second);
        assert_eq!(first.len(), 13);
        assert!(first.starts_with('O'));
        assert!(first[1..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(first[1..].to_uppercase(), &first[1..]);
    }

    #[test]
    fn distinct_keys_produce_distinct_order_numbers() {
        let d1 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();

        let one = build_order_no(&build_generated_key(42, d1));
        let other = build_order_no(&build_generated_key(42, d2));

        assert_ne!(one, other);
    }

    #[test]
    fn generatable_when_timestamps_clear_and_due() {
        let sub = sample_subscription();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        assert!(ensure_generatable(&sub, date).is_ok());
    }

    #[test]
    fn paused_subscription_is_not_active() {
        let mut sub = sample_subscription();
        sub.paused_at = Some(Utc::now());

        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(
            ensure_generatable(&sub, date),
            Err(DomainError::SubscriptionNotActive)
        );
    }

    #[test]
    fn canceled_subscription_is_not_active_even_with_active_status_text() {
        let mut sub = sample_subscription();
        sub.canceled_at = Some(Utc::now());
        sub.status = "active".to_string();

        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(
            ensure_generatable(&sub, date),
            Err(DomainError::SubscriptionNotActive)
        );
    }

    #[test]
    fn deleted_subscription_is_not_active() {
        let mut sub = sample_subscription();
        sub.deleted_at = Some(Utc::now());

        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(
            ensure_generatable(&sub, date),
            Err(DomainError::SubscriptionNotActive)
        );
    }

    #[test]
    fn subscription_with_future_next_run_date_is_not_due() {
        let sub = sample_subscription();
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

        assert_eq!(
            ensure_generatable(&sub, date),
            Err(DomainError::SubscriptionNotDue)
        );
    }

    #[test]
    fn lines_snapshot_price_and_quantity() {
        let now = Utc::now();
        let items = vec![(
            sample_item(7, 2, 1000),
            Some(sample_variant(7, "SKU-7", Some("Milk"))),
        )];

        let lines = build_order_lines(99, &items, now).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].order_id, 99);
        assert_eq!(lines[0].variant_id, 7);
        assert_eq!(lines[0].sku, "SKU-7");
        assert_eq!(lines[0].name, "Milk");
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].unit_amount, 1000);
        assert_eq!(lines[0].line_total_amount, 2000);
    }

    #[test]
    fn subtotal_is_sum_of_line_totals() {
        let now = Utc::now();
        let items = vec![
            (
                sample_item(1, 2, 1000),
                Some(sample_variant(1, "SKU-1", Some("A"))),
            ),
            (
                sample_item(2, 3, 250),
                Some(sample_variant(2, "SKU-2", Some("B"))),
            ),
        ];

        let lines = build_order_lines(1, &items, now).unwrap();
        let subtotal: i64 = lines.iter().map(|l| l.line_total_amount).sum();

        assert_eq!(subtotal, 2750);
    }

    #[test]
    fn inactive_and_zero_quantity_items_are_skipped() {
        let now = Utc::now();
        let mut inactive = sample_item(1, 2, 1000);
        inactive.is_active = false;

        let items = vec![
            (inactive, Some(sample_variant(1, "SKU-1", None))),
            (
                sample_item(2, 0, 1000),
                Some(sample_variant(2, "SKU-2", None)),
            ),
            (
                sample_item(3, 1, 500),
                Some(sample_variant(3, "SKU-3", None)),
            ),
        ];

        let lines = build_order_lines(1, &items, now).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].variant_id, 3);
    }

    #[test]
    fn missing_variant_aborts_line_building() {
        let now = Utc::now();
        let items = vec![(sample_item(1, 1, 1000), None)];

        assert_eq!(
            build_order_lines(1, &items, now),
            Err(DomainError::SubscriptionItemVariantMissing)
        );
    }

    #[test]
    fn negative_price_aborts_line_building() {
        let now = Utc::now();
        let items = vec![(
            sample_item(1, 1, -5),
            Some(sample_variant(1, "SKU-1", None)),
        )];

        assert_eq!(
            build_order_lines(1, &items, now),
            Err(DomainError::SubscriptionItemPriceInvalid)
        );
    }

    #[test]
    fn variant_without_name_snapshots_empty_string() {
        let now = Utc::now();
        let items = vec![(sample_item(1, 1, 100), Some(sample_variant(1, "SKU-1", None)))];

        let lines = build_order_lines(1, &items, now).unwrap();
        assert_eq!(lines[0].name, "");
    }
}
