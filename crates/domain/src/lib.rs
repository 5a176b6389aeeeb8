//! Nimbus DNS Domain Layer
pub mod answer;
pub mod config;
pub mod dns_query;
pub mod errors;
pub mod inventory;
pub mod reverse;
pub mod zones;

pub use answer::{AnswerData, AnswerRecord};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::{DnsQuery, RecordType};
pub use errors::DomainError;
pub use inventory::{AddressDisposition, AddressEntry, AddressRole, InventoryHost};
pub use zones::{Fallthrough, Zones};
