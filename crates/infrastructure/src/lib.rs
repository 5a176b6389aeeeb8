//! Nimbus DNS Infrastructure Layer
//!
//! - `openstack`: inventory provider backed by Keystone and Nova
//! - `dns`: wire conversion, the handler chain link and the listeners
pub mod dns;
pub mod openstack;
