pub mod delivery_batches;
pub mod orders;
pub mod subscriptions;
