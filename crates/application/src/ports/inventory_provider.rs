use async_trait::async_trait;
use nimbus_dns_domain::{DomainError, InventoryHost};

/// Application-layer port for the external host inventory.
///
/// Credentials and region are owned by the implementation; `authenticate`
/// performs the handshake and yields a session used for exactly one listing.
#[async_trait]
pub trait InventoryProvider: Send + Sync {
    async fn authenticate(&self) -> Result<Box<dyn InventorySession>, DomainError>;
}

/// An authenticated, lazily paginated host listing.
#[async_trait]
pub trait InventorySession: Send {
    /// Fetch the next page of hosts. `Ok(None)` once the listing is exhausted.
    /// An error at any page invalidates the whole listing.
    async fn next_page(&mut self) -> Result<Option<Vec<InventoryHost>>, DomainError>;
}
