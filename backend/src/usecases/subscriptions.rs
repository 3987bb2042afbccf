use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};

use domain::{
    entities::subscriptions::InsertSubscriptionEntity,
    repositories::{
        addresses::AddressRepository, plans::PlanRepository,
        product_variants::ProductVariantRepository, subscriptions::SubscriptionRepository,
    },
    value_objects::{
        enums::subscription_statuses::SubscriptionStatus,
        subscriptions::{CreateSubscriptionModel, SubscriptionDto, SubscriptionWithItems},
    },
};

const SUPPORTED_CURRENCY: &str = "THB";

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("plan not found")]
    PlanNotFound,
    #[error("plan is inactive")]
    PlanInactive,
    #[error("address is not owned by the user")]
    AddressNotOwned,
    #[error("variants not found or inactive: {0:?}")]
    VariantNotFound(Vec<i64>),
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),
    #[error("subscription not found")]
    SubscriptionNotFound,
    #[error("subscription already canceled")]
    AlreadyCanceled,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::PlanNotFound
            | SubscriptionError::SubscriptionNotFound
            | SubscriptionError::VariantNotFound(_) => StatusCode::NOT_FOUND,
            SubscriptionError::PlanInactive
            | SubscriptionError::AddressNotOwned
            | SubscriptionError::UnsupportedCurrency(_)
            | SubscriptionError::AlreadyCanceled => StatusCode::BAD_REQUEST,
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SubscriptionError::PlanNotFound => "PLAN_NOT_FOUND",
            SubscriptionError::PlanInactive => "PLAN_INACTIVE",
            SubscriptionError::AddressNotOwned => "ADDRESS_NOT_OWNED_BY_USER",
            SubscriptionError::VariantNotFound(_) => "VARIANT_NOT_FOUND",
            SubscriptionError::UnsupportedCurrency(_) => "UNSUPPORTED_CURRENCY",
            SubscriptionError::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            SubscriptionError::AlreadyCanceled => "SUBSCRIPTION_ALREADY_CANCELED",
            SubscriptionError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

/// Lifecycle management over the timestamp model: the engines read
/// `paused_at` / `canceled_at` / `deleted_at`, and this usecase is the
/// only writer. The text `status` column is mirrored for display.
pub struct SubscriptionUseCase<S, P, A, V>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    A: AddressRepository + Send + Sync + 'static,
    V: ProductVariantRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    plan_repo: Arc<P>,
    address_repo: Arc<A>,
    variant_repo: Arc<V>,
}

impl<S, P, A, V> SubscriptionUseCase<S, P, A, V>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    A: AddressRepository + Send + Sync + 'static,
    V: ProductVariantRepository + Send + Sync + 'static,
{
    pub fn new(
        subscription_repo: Arc<S>,
        plan_repo: Arc<P>,
        address_repo: Arc<A>,
        variant_repo: Arc<V>,
    ) -> Self {
        Self {
            subscription_repo,
            plan_repo,
            address_repo,
            variant_repo,
        }
    }

    pub async fn create(
        &self,
        user_id: i64,
        model: CreateSubscriptionModel,
    ) -> UseCaseResult<SubscriptionDto> {
        info!(
            user_id,
            plan_id = model.plan_id,
            item_count = model.items.len(),
            "subscriptions: create requested"
        );

        let plan = self
            .plan_repo
            .find_by_id(model.plan_id)
            .await
            .map_err(|err| {
                error!(user_id, plan_id = model.plan_id, db_error = ?err, "subscriptions: failed to load plan");
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(user_id, plan_id = model.plan_id, "subscriptions: plan not found");
                SubscriptionError::PlanNotFound
            })?;

        if !plan.is_active {
            warn!(user_id, plan_id = plan.id, "subscriptions: plan is inactive");
            return Err(SubscriptionError::PlanInactive);
        }

        self.address_repo
            .find_owned(model.default_address_id, user_id)
            .await
            .map_err(|err| {
                error!(
                    user_id,
                    address_id = model.default_address_id,
                    db_error = ?err,
                    "subscriptions: failed to load address"
                );
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(
                    user_id,
                    address_id = model.default_address_id,
                    "subscriptions: address not owned by user"
                );
                SubscriptionError::AddressNotOwned
            })?;

        let variant_ids: Vec<i64> = model.items.iter().map(|item| item.variant_id).collect();
        let variants = self
            .variant_repo
            .list_active_by_ids(variant_ids.clone())
            .await
            .map_err(|err| {
                error!(user_id, db_error = ?err, "subscriptions: failed to load variants");
                SubscriptionError::Internal(err)
            })?;

        let missing: Vec<i64> = variant_ids
            .iter()
            .filter(|id| !variants.iter().any(|v| v.id == **id))
            .copied()
            .collect();
        if !missing.is_empty() {
            warn!(user_id, missing_variant_ids = ?missing, "subscriptions: variants missing");
            return Err(SubscriptionError::VariantNotFound(missing));
        }

        let mut items = model.items;
        for item in &mut items {
            let currency = item.currency.to_uppercase();
            if currency != SUPPORTED_CURRENCY {
                warn!(
                    user_id,
                    currency = %item.currency,
                    "subscriptions: unsupported currency"
                );
                return Err(SubscriptionError::UnsupportedCurrency(item.currency.clone()));
            }
            item.currency = currency;
        }

        let now = Utc::now();
        let created = self
            .subscription_repo
            .create_with_items(
                InsertSubscriptionEntity {
                    user_id,
                    plan_id: plan.id,
                    status: SubscriptionStatus::Active.to_string(),
                    start_date: model.start_date,
                    next_run_date: model.start_date,
                    end_date: None,
                    timezone: "Asia/Bangkok".to_string(),
                    default_address_id: Some(model.default_address_id),
                    paused_at: None,
                    canceled_at: None,
                    deleted_at: None,
                    created_at: now,
                    updated_at: now,
                },
                items,
            )
            .await
            .map_err(|err| {
                error!(user_id, db_error = ?err, "subscriptions: failed to create subscription");
                SubscriptionError::Internal(err)
            })?;

        info!(
            user_id,
            subscription_id = created.subscription.id,
            "subscriptions: subscription created"
        );

        Ok(SubscriptionDto::from(created))
    }

    pub async fn get(&self, user_id: i64, subscription_id: i64) -> UseCaseResult<SubscriptionDto> {
        let found = self.find_owned(user_id, subscription_id).await?;
        Ok(SubscriptionDto::from(found))
    }

    pub async fn pause(
        &self,
        user_id: i64,
        subscription_id: i64,
    ) -> UseCaseResult<SubscriptionDto> {
        let found = self.find_owned(user_id, subscription_id).await?;

        if found.subscription.canceled_at.is_some() {
            warn!(
                user_id,
                subscription_id, "subscriptions: cannot pause a canceled subscription"
            );
            return Err(SubscriptionError::AlreadyCanceled);
        }

        if found.subscription.paused_at.is_none() {
            self.subscription_repo
                .mark_paused(subscription_id, Utc::now())
                .await
                .map_err(|err| {
                    error!(user_id, subscription_id, db_error = ?err, "subscriptions: failed to pause");
                    SubscriptionError::Internal(err)
                })?;
            info!(user_id, subscription_id, "subscriptions: paused");
        }

        let reloaded = self.find_owned(user_id, subscription_id).await?;
        Ok(SubscriptionDto::from(reloaded))
    }

    pub async fn resume(
        &self,
        user_id: i64,
        subscription_id: i64,
    ) -> UseCaseResult<SubscriptionDto> {
        let found = self.find_owned(user_id, subscription_id).await?;

        if found.subscription.canceled_at.is_some() {
            warn!(
                user_id,
                subscription_id, "subscriptions: cannot resume a canceled subscription"
            );
            return Err(SubscriptionError::AlreadyCanceled);
        }

        if found.subscription.paused_at.is_some() {
            self.subscription_repo
                .clear_paused(subscription_id, Utc::now())
                .await
                .map_err(|err| {
                    error!(user_id, subscription_id, db_error = ?err, "subscriptions: failed to resume");
                    SubscriptionError::Internal(err)
                })?;
            info!(user_id, subscription_id, "subscriptions: resumed");
        }

        let reloaded = self.find_owned(user_id, subscription_id).await?;
        Ok(SubscriptionDto::from(reloaded))
    }

    /// Cancel is idempotent: canceling twice returns the same state.
    pub async fn cancel(
        &self,
        user_id: i64,
        subscription_id: i64,
    ) -> UseCaseResult<SubscriptionDto> {
        let found = self.find_owned(user_id, subscription_id).await?;

        if found.subscription.canceled_at.is_none() {
            self.subscription_repo
                .mark_canceled(subscription_id, Utc::now())
                .await
                .map_err(|err| {
                    error!(user_id, subscription_id, db_error = ?err, "subscriptions: failed to cancel");
                    SubscriptionError::Internal(err)
                })?;
            info!(user_id, subscription_id, "subscriptions: canceled");
        }

        let reloaded = self.find_owned(user_id, subscription_id).await?;
        Ok(SubscriptionDto::from(reloaded))
    }

    async fn find_owned(
        &self,
        user_id: i64,
        subscription_id: i64,
    ) -> UseCaseResult<SubscriptionWithItems> {
        self.subscription_repo
            .find_owned_with_items(subscription_id, user_id)
            .await
            .map_err(|err| {
                error!(
                    user_id,
                    subscription_id,
                    db_error = ?err,
                    "subscriptions: failed to load subscription"
                );
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(user_id, subscription_id, "subscriptions: not found");
                SubscriptionError::SubscriptionNotFound
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::{
        entities::{
            plans::PlanEntity, product_variants::ProductVariantEntity,
            subscription_items::SubscriptionItemEntity, subscriptions::SubscriptionEntity,
        },
        repositories::{
            addresses::MockAddressRepository, plans::MockPlanRepository,
            product_variants::MockProductVariantRepository,
            subscriptions::MockSubscriptionRepository,
        },
        value_objects::subscriptions::{CreateSubscriptionItemModel, SubscriptionWithItems},
    };
    use mockall::predicate::eq;

    fn sample_subscription(id: i64, user_id: i64) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id,
            user_id,
            plan_id: 1,
            status: "active".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
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

    fn sample_item(subscription_id: i64) -> SubscriptionItemEntity {
        let now = Utc::now();
        SubscriptionItemEntity {
            id: 1,
            subscription_id,
            variant_id: 7,
            quantity: 2,
            unit_amount: 1000,
            currency: "THB".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn with_items(subscription: SubscriptionEntity) -> SubscriptionWithItems {
        let items = vec![sample_item(subscription.id)];
        SubscriptionWithItems {
            subscription,
            items,
        }
    }

    fn sample_plan(id: i64, is_active: bool) -> PlanEntity {
        let now = Utc::now();
        PlanEntity {
            id,
            name: "Weekly Box".to_string(),
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_variant(id: i64) -> ProductVariantEntity {
        let now = Utc::now();
        ProductVariantEntity {
            id,
            product_id: 1,
            sku: format!("SKU-{}", id),
            name: Some("Variant".to_string()),
            is_active: true,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn usecase_with(
        subscription_repo: MockSubscriptionRepository,
        plan_repo: MockPlanRepository,
        address_repo: MockAddressRepository,
        variant_repo: MockProductVariantRepository,
    ) -> SubscriptionUseCase<
        MockSubscriptionRepository,
        MockPlanRepository,
        MockAddressRepository,
        MockProductVariantRepository,
    > {
        SubscriptionUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(plan_repo),
            Arc::new(address_repo),
            Arc::new(variant_repo),
        )
    }

    #[tokio::test]
    async fn pause_sets_paused_at_once() {
        let mut subscription_repo = MockSubscriptionRepository::new();

        subscription_repo
            .expect_find_owned_with_items()
            .with(eq(11), eq(1))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(Some(with_items(sample_subscription(11, 1)))) }));
        subscription_repo
            .expect_mark_paused()
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(()) }));
        subscription_repo
            .expect_find_owned_with_items()
            .with(eq(11), eq(1))
            .times(1)
            .returning(|_, _| {
                Box::pin(async {
                    let mut subscription = sample_subscription(11, 1);
                    subscription.paused_at = Some(Utc::now());
                    subscription.status = "paused".to_string();
                    Ok(Some(with_items(subscription)))
                })
            });

        let usecase = usecase_with(
            subscription_repo,
            MockPlanRepository::new(),
            MockAddressRepository::new(),
            MockProductVariantRepository::new(),
        );

        let dto = usecase.pause(1, 11).await.unwrap();

        assert!(dto.paused_at.is_some());
        assert_eq!(dto.status, "paused");
    }

    #[tokio::test]
    async fn pause_is_idempotent_for_an_already_paused_subscription() {
        let mut subscription_repo = MockSubscriptionRepository::new();

        subscription_repo
            .expect_find_owned_with_items()
            .times(2)
            .returning(|_, _| {
                Box::pin(async {
                    let mut subscription = sample_subscription(11, 1);
                    subscription.paused_at = Some(Utc::now());
                    Ok(Some(with_items(subscription)))
                })
            });
        subscription_repo.expect_mark_paused().times(0);

        let usecase = usecase_with(
            subscription_repo,
            MockPlanRepository::new(),
            MockAddressRepository::new(),
            MockProductVariantRepository::new(),
        );

        let dto = usecase.pause(1, 11).await.unwrap();
        assert!(dto.paused_at.is_some());
    }

    #[tokio::test]
    async fn pause_rejects_canceled_subscription() {
        let mut subscription_repo = MockSubscriptionRepository::new();

        subscription_repo
            .expect_find_owned_with_items()
            .times(1)
            .returning(|_, _| {
                Box::pin(async {
                    let mut subscription = sample_subscription(11, 1);
                    subscription.canceled_at = Some(Utc::now());
                    Ok(Some(with_items(subscription)))
                })
            });
        subscription_repo.expect_mark_paused().times(0);

        let usecase = usecase_with(
            subscription_repo,
            MockPlanRepository::new(),
            MockAddressRepository::new(),
            MockProductVariantRepository::new(),
        );

        let err = usecase.pause(1, 11).await.unwrap_err();
        assert!(matches!(err, SubscriptionError::AlreadyCanceled));
    }

    #[tokio::test]
    async fn cancel_twice_is_a_no_op_the_second_time() {
        let mut subscription_repo = MockSubscriptionRepository::new();

        subscription_repo
            .expect_find_owned_with_items()
            .times(2)
            .returning(|_, _| {
                Box::pin(async {
                    let mut subscription = sample_subscription(11, 1);
                    subscription.canceled_at = Some(Utc::now());
                    subscription.status = "canceled".to_string();
                    Ok(Some(with_items(subscription)))
                })
            });
        subscription_repo.expect_mark_canceled().times(0);

        let usecase = usecase_with(
            subscription_repo,
            MockPlanRepository::new(),
            MockAddressRepository::new(),
            MockProductVariantRepository::new(),
        );

        let dto = usecase.cancel(1, 11).await.unwrap();
        assert!(dto.canceled_at.is_some());
        assert_eq!(dto.status, "canceled");
    }

    #[tokio::test]
    async fn get_unknown_subscription_is_not_found() {
        let mut subscription_repo = MockSubscriptionRepository::new();

        subscription_repo
            .expect_find_owned_with_items()
            .with(eq(99), eq(1))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase = usecase_with(
            subscription_repo,
            MockPlanRepository::new(),
            MockAddressRepository::new(),
            MockProductVariantRepository::new(),
        );

        let err = usecase.get(1, 99).await.unwrap_err();
        assert!(matches!(err, SubscriptionError::SubscriptionNotFound));
    }

    #[tokio::test]
    async fn create_rejects_inactive_plan() {
        let mut plan_repo = MockPlanRepository::new();

        plan_repo
            .expect_find_by_id()
            .with(eq(3))
            .times(1)
            .returning(|_| Box::pin(async { Ok(Some(sample_plan(3, false))) }));

        let usecase = usecase_with(
            MockSubscriptionRepository::new(),
            plan_repo,
            MockAddressRepository::new(),
            MockProductVariantRepository::new(),
        );

        let model = CreateSubscriptionModel {
            plan_id: 3,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            default_address_id: 5,
            items: vec![],
        };

        let err = usecase.create(1, model).await.unwrap_err();
        assert!(matches!(err, SubscriptionError::PlanInactive));
    }

    #[tokio::test]
    async fn create_reports_missing_variants() {
        let mut plan_repo = MockPlanRepository::new();
        let mut address_repo = MockAddressRepository::new();
        let mut variant_repo = MockProductVariantRepository::new();

        plan_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Box::pin(async { Ok(Some(sample_plan(1, true))) }));
        address_repo.expect_find_owned().times(1).returning(|_, _| {
            Box::pin(async {
                let now = Utc::now();
                Ok(Some(domain::entities::addresses::AddressEntity {
                    id: 5,
                    user_id: 1,
                    label: None,
                    recipient_name: "A".to_string(),
                    phone: "0".to_string(),
                    line1: "1".to_string(),
                    line2: None,
                    subdistrict: None,
                    district: None,
                    province: "Bangkok".to_string(),
                    postal_code: "10100".to_string(),
                    country_code: "TH".to_string(),
                    zone_id: Some(1),
                    is_default: true,
                    deleted_at: None,
                    created_at: now,
                    updated_at: now,
                }))
            })
        });
        variant_repo
            .expect_list_active_by_ids()
            .with(eq(vec![7, 8]))
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![sample_variant(7)]) }));

        let usecase = usecase_with(
            MockSubscriptionRepository::new(),
            plan_repo,
            address_repo,
            variant_repo,
        );

        let model = CreateSubscriptionModel {
            plan_id: 1,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            default_address_id: 5,
            items: vec![
                CreateSubscriptionItemModel {
                    variant_id: 7,
                    quantity: 1,
                    unit_amount: 1000,
                    currency: "THB".to_string(),
                },
                CreateSubscriptionItemModel {
                    variant_id: 8,
                    quantity: 1,
                    unit_amount: 500,
                    currency: "THB".to_string(),
                },
            ],
        };

        let err = usecase.create(1, model).await.unwrap_err();
        match err {
            SubscriptionError::VariantNotFound(missing) => assert_eq!(missing, vec![8]),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
