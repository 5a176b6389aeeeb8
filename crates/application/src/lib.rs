//! Nimbus DNS Application Layer
//!
//! Ports implemented by infrastructure, the host directory and its snapshot
//! store, and the two use cases: refreshing the directory from the inventory
//! and dispatching queries against it.
pub mod ports;
pub mod services;
pub mod use_cases;
