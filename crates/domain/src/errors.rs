use thiserror::Error;

/// Business rule violations raised inside repository transactions.
///
/// Raising one of these aborts the enclosing transaction; callers recover
/// the typed variant from `anyhow::Error` via `downcast_ref`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("SUBSCRIPTION_NOT_FOUND")]
    SubscriptionNotFound,
    #[error("SUBSCRIPTION_NOT_ACTIVE")]
    SubscriptionNotActive,
    #[error("SUBSCRIPTION_NOT_DUE")]
    SubscriptionNotDue,
    #[error("SUBSCRIPTION_DEFAULT_ADDRESS_REQUIRED")]
    SubscriptionDefaultAddressRequired,
    #[error("SUBSCRIPTION_ITEM_VARIANT_MISSING")]
    SubscriptionItemVariantMissing,
    #[error("SUBSCRIPTION_ITEM_PRICE_INVALID")]
    SubscriptionItemPriceInvalid,
    #[error("ORDER_NOT_FOUND")]
    OrderNotFound,
    #[error("BATCH_LOCKED")]
    BatchLocked,
}

impl DomainError {
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            DomainError::SubscriptionNotActive => "SUBSCRIPTION_NOT_ACTIVE",
            DomainError::SubscriptionNotDue => "SUBSCRIPTION_NOT_DUE",
            DomainError::SubscriptionDefaultAddressRequired => {
                "SUBSCRIPTION_DEFAULT_ADDRESS_REQUIRED"
            }
            DomainError::SubscriptionItemVariantMissing => "SUBSCRIPTION_ITEM_VARIANT_MISSING",
            DomainError::SubscriptionItemPriceInvalid => "SUBSCRIPTION_ITEM_PRICE_INVALID",
            DomainError::OrderNotFound => "ORDER_NOT_FOUND",
            DomainError::BatchLocked => "BATCH_LOCKED",
        }
    }
}
