use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, info, warn};

use domain::{
    repositories::{orders::OrderRepository, subscriptions::SubscriptionRepository},
    value_objects::order_generation::GenerateOrdersSummary,
};

/// Pages through due subscriptions and generates one order per
/// (subscription, delivery date). Each subscription is one repository
/// transaction, so a crash mid-run leaves already-processed units intact
/// and the next run re-derives the same idempotent outcomes.
pub struct OrderGenerationUseCase<S, O>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    order_repo: Arc<O>,
    page_size: i64,
    halt_on_error: bool,
}

impl<S, O> OrderGenerationUseCase<S, O>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    O: OrderRepository + Send + Sync + 'static,
{
    pub fn new(
        subscription_repo: Arc<S>,
        order_repo: Arc<O>,
        page_size: i64,
        halt_on_error: bool,
    ) -> Self {
        Self {
            subscription_repo,
            order_repo,
            page_size,
            halt_on_error,
        }
    }

    pub async fn run(&self, delivery_date: NaiveDate) -> Result<GenerateOrdersSummary> {
        info!(
            %delivery_date,
            page_size = self.page_size,
            "generate_orders: run started"
        );

        let mut created = 0_u64;
        let mut existing = 0_u64;
        let mut offset = 0_i64;

        loop {
            let page = self
                .subscription_repo
                .list_due_active(delivery_date, self.page_size, offset)
                .await
                .map_err(|err| {
                    error!(
                        %delivery_date,
                        offset,
                        db_error = ?err,
                        "generate_orders: failed to list due subscriptions"
                    );
                    err
                })?;

            if page.is_empty() {
                break;
            }

            for subscription in &page {
                match self
                    .order_repo
                    .generate_from_subscription(subscription.id, delivery_date)
                    .await
                {
                    Ok(generated) if generated.was_created => {
                        info!(
                            subscription_id = subscription.id,
                            order_id = generated.order.id,
                            order_no = %generated.order.order_no,
                            "generate_orders: order created"
                        );
                        created += 1;
                    }
                    Ok(_) => {
                        existing += 1;
                    }
                    Err(err) => {
                        if self.halt_on_error {
                            error!(
                                subscription_id = subscription.id,
                                %delivery_date,
                                error = ?err,
                                "generate_orders: halting run after failure"
                            );
                            return Err(err);
                        }

                        warn!(
                            subscription_id = subscription.id,
                            %delivery_date,
                            error = ?err,
                            "generate_orders: subscription skipped after failure"
                        );
                    }
                }
            }

            offset += self.page_size;
        }

        info!(
            %delivery_date,
            created,
            existing,
            "generate_orders: run finished"
        );

        Ok(GenerateOrdersSummary {
            delivery_date,
            created,
            existing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use chrono::Utc;
    use domain::{
        entities::{orders::OrderEntity, subscriptions::SubscriptionEntity},
        repositories::{orders::MockOrderRepository, subscriptions::MockSubscriptionRepository},
        value_objects::order_generation::GeneratedOrder,
    };
    use mockall::predicate::eq;

    fn delivery_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn sample_subscription(id: i64) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id,
            user_id: 1,
            plan_id: 1,
            status: "active".to_string(),
            start_date: delivery_date(),
            next_run_date: delivery_date(),
            end_date: None,
            timezone: "Asia/Bangkok".to_string(),
            default_address_id: Some(1),
            paused_at: None,
            canceled_at: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_order(id: i64, subscription_id: i64) -> OrderEntity {
        let now = Utc::now();
        OrderEntity {
            id,
            order_no: format!("O{:012}", id),
            user_id: 1,
            subscription_id: Some(subscription_id),
            status: "pending".to_string(),
            delivery_date: delivery_date(),
            zone_id: None,
            shipping_address_id: 1,
            notes: None,
            currency: "THB".to_string(),
            subtotal_amount: 2000,
            shipping_amount: 0,
            total_amount: 2000,
            generated_key: Some(format!("sub:{}|delivery:2025-01-01", subscription_id)),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn counts_created_and_existing_orders() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut order_repo = MockOrderRepository::new();

        subscription_repo
            .expect_list_due_active()
            .with(eq(delivery_date()), eq(200), eq(0))
            .times(1)
            .returning(|_, _, _| {
                Box::pin(async { Ok(vec![sample_subscription(1), sample_subscription(2)]) })
            });
        subscription_repo
            .expect_list_due_active()
            .with(eq(delivery_date()), eq(200), eq(200))
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(vec![]) }));

        order_repo
            .expect_generate_from_subscription()
            .with(eq(1), eq(delivery_date()))
            .times(1)
            .returning(|_, _| {
                Box::pin(async {
                    Ok(GeneratedOrder {
                        order: sample_order(10, 1),
                        was_created: true,
                    })
                })
            });
        order_repo
            .expect_generate_from_subscription()
            .with(eq(2), eq(delivery_date()))
            .times(1)
            .returning(|_, _| {
                Box::pin(async {
                    Ok(GeneratedOrder {
                        order: sample_order(20, 2),
                        was_created: false,
                    })
                })
            });

        let usecase = OrderGenerationUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(order_repo),
            200,
            false,
        );

        let summary = usecase.run(delivery_date()).await.unwrap();

        assert_eq!(summary.created, 1);
        assert_eq!(summary.existing, 1);
    }

    #[tokio::test]
    async fn second_run_reports_only_existing_orders() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut order_repo = MockOrderRepository::new();

        subscription_repo
            .expect_list_due_active()
            .with(eq(delivery_date()), eq(200), eq(0))
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(vec![sample_subscription(1)]) }));
        subscription_repo
            .expect_list_due_active()
            .with(eq(delivery_date()), eq(200), eq(200))
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(vec![]) }));

        order_repo
            .expect_generate_from_subscription()
            .with(eq(1), eq(delivery_date()))
            .times(1)
            .returning(|_, _| {
                Box::pin(async {
                    Ok(GeneratedOrder {
                        order: sample_order(10, 1),
                        was_created: false,
                    })
                })
            });

        let usecase = OrderGenerationUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(order_repo),
            200,
            false,
        );

        let summary = usecase.run(delivery_date()).await.unwrap();

        assert_eq!(summary.created, 0);
        assert_eq!(summary.existing, 1);
    }

    #[tokio::test]
    async fn pages_through_all_due_subscriptions() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut order_repo = MockOrderRepository::new();

        subscription_repo
            .expect_list_due_active()
            .with(eq(delivery_date()), eq(2), eq(0))
            .times(1)
            .returning(|_, _, _| {
                Box::pin(async { Ok(vec![sample_subscription(1), sample_subscription(2)]) })
            });
        subscription_repo
            .expect_list_due_active()
            .with(eq(delivery_date()), eq(2), eq(2))
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(vec![sample_subscription(3)]) }));
        subscription_repo
            .expect_list_due_active()
            .with(eq(delivery_date()), eq(2), eq(4))
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(vec![]) }));

        order_repo
            .expect_generate_from_subscription()
            .times(3)
            .returning(|subscription_id, _| {
                Box::pin(async move {
                    Ok(GeneratedOrder {
                        order: sample_order(subscription_id * 10, subscription_id),
                        was_created: true,
                    })
                })
            });

        let usecase = OrderGenerationUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(order_repo),
            2,
            false,
        );

        let summary = usecase.run(delivery_date()).await.unwrap();

        assert_eq!(summary.created, 3);
        assert_eq!(summary.existing, 0);
    }

    #[tokio::test]
    async fn one_failed_subscription_does_not_abort_the_page() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut order_repo = MockOrderRepository::new();

        subscription_repo
            .expect_list_due_active()
            .with(eq(delivery_date()), eq(200), eq(0))
            .times(1)
            .returning(|_, _, _| {
                Box::pin(async { Ok(vec![sample_subscription(1), sample_subscription(2)]) })
            });
        subscription_repo
            .expect_list_due_active()
            .with(eq(delivery_date()), eq(200), eq(200))
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(vec![]) }));

        order_repo
            .expect_generate_from_subscription()
            .with(eq(1), eq(delivery_date()))
            .times(1)
            .returning(|_, _| Box::pin(async { Err(anyhow!("SUBSCRIPTION_NOT_ACTIVE")) }));
        order_repo
            .expect_generate_from_subscription()
            .with(eq(2), eq(delivery_date()))
            .times(1)
            .returning(|_, _| {
                Box::pin(async {
                    Ok(GeneratedOrder {
                        order: sample_order(20, 2),
                        was_created: true,
                    })
                })
            });

        let usecase = OrderGenerationUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(order_repo),
            200,
            false,
        );

        let summary = usecase.run(delivery_date()).await.unwrap();

        assert_eq!(summary.created, 1);
        assert_eq!(summary.existing, 0);
    }

    #[tokio::test]
    async fn halt_on_error_aborts_the_run() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut order_repo = MockOrderRepository::new();

        subscription_repo
            .expect_list_due_active()
            .with(eq(delivery_date()), eq(200), eq(0))
            .times(1)
            .returning(|_, _, _| {
                Box::pin(async { Ok(vec![sample_subscription(1), sample_subscription(2)]) })
            });

        order_repo
            .expect_generate_from_subscription()
            .with(eq(1), eq(delivery_date()))
            .times(1)
            .returning(|_, _| Box::pin(async { Err(anyhow!("connection reset")) }));

        let usecase = OrderGenerationUseCase::new(
            Arc::new(subscription_repo),
            Arc::new(order_repo),
            200,
            true,
        );

        assert!(usecase.run(delivery_date()).await.is_err());
    }
}
