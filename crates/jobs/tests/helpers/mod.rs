#![allow(dead_code)]

mod mock_inventory;

pub use mock_inventory::{host, MockInventoryProvider};
