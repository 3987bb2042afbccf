pub mod addresses;
pub mod delivery_batches;
pub mod orders;
pub mod plans;
pub mod product_variants;
pub mod subscriptions;
