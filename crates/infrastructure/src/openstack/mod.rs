//! OpenStack inventory provider.
//!
//! Authenticates against Keystone v3 with a password, locates the public
//! compute endpoint for the configured region in the token catalog, and
//! lists servers from Nova page by page.

pub mod provider;
pub mod types;

pub use provider::OpenStackProvider;
