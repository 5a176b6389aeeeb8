pub mod handler;
pub mod server;
pub mod wire;

pub use handler::{next_or_failure, DnsHandler, InventoryHandler};
pub use server::DnsServerHandler;
