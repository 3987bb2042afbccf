pub mod delivery_batch_statuses;
pub mod order_statuses;
pub mod subscription_statuses;
