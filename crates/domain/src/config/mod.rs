//! Configuration module for Nimbus DNS
//!
//! This module contains all configuration structures organized by domain:
//! - `root`: Main configuration and CLI overrides
//! - `server`: Listener ports and binding
//! - `openstack`: Inventory source, zones, TTL, reload and fallthrough
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod errors;
pub mod logging;
pub mod openstack;
pub mod root;
pub mod server;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use openstack::{AuthConfig, OpenStackConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
