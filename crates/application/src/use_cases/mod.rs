pub mod dispatch_query;
pub mod refresh_inventory;

pub use dispatch_query::{DispatchMetrics, DispatchOutcome, QueryDispatcher};
pub use refresh_inventory::{RefreshInventoryUseCase, RefreshMetrics, RefreshStats};
