pub mod inventory_provider;

pub use inventory_provider::{InventoryProvider, InventorySession};
