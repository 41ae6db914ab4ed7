//! Menu and staff records.
//!
//! The order lifecycle only reads from these: menu entries to fill in item
//! snapshots, users to check the cashier on a submission.

mod menu;
mod users;

pub use menu::{MenuCatalog, MenuItem, MenuItemPatch, NewMenuItem, default_menu};
pub use users::{Role, User, UserDirectory, UserProfile, default_users};
