use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Inventory authentication failed: {0}")]
    InventoryAuth(String),

    #[error("Inventory listing failed: {0}")]
    InventoryList(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
