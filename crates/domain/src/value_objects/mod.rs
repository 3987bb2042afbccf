pub mod batch_assembly;
pub mod batch_locking;
pub mod delivery_batches;
pub mod enums;
pub mod order_generation;
pub mod orders;
pub mod subscriptions;
