pub mod addresses;
pub mod delivery_batch_orders;
pub mod delivery_batches;
pub mod order_items;
pub mod orders;
pub mod plans;
pub mod product_variants;
pub mod subscription_items;
pub mod subscriptions;
pub mod zones;
