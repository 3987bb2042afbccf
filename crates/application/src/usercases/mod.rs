pub mod batch_assembly;
pub mod batch_locking;
pub mod order_generation;
