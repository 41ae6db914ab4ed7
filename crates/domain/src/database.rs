//! The POS document kept in the [`Store`](store::Store).

use serde::{Deserialize, Serialize};

use crate::billing::Bill;
use crate::catalog::{MenuItem, User, default_menu, default_users};
use crate::kot::KotLogEntry;
use crate::order::Order;

/// Everything the POS persists, as one JSON document.
///
/// Collections are append-only except for in-place order and menu edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosDatabase {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub kot_logs: Vec<KotLogEntry>,
}

impl PosDatabase {
    /// A database with no users, menu, or history.
    pub fn empty() -> Self {
        Self {
            users: Vec::new(),
            menu: Vec::new(),
            orders: Vec::new(),
            bills: Vec::new(),
            kot_logs: Vec::new(),
        }
    }
}

/// The seeded database: three staff accounts and the house menu.
impl Default for PosDatabase {
    fn default() -> Self {
        Self {
            users: default_users(),
            menu: default_menu(),
            ..Self::empty()
        }
    }
}
