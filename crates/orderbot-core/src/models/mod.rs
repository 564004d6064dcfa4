//! Data models for the order-bot backend.
//!
//! - `MenuItemPayload`: one row of a bot's menu, as read and written
//!   through `/menu-items`

pub mod menu;

pub use menu::{MenuItemPayload, MenuItemsRequest};
