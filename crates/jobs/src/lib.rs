pub mod inventory_refresh;

pub use inventory_refresh::{InventoryRefreshJob, RefreshJobHandle};
