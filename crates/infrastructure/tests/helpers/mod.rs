#![allow(dead_code)]

mod messages;
mod mock_openstack;

pub use messages::{query_message, RecordingHandler};
pub use mock_openstack::MockOpenStack;
