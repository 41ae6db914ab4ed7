//! Shared handles every handler reaches through `State`.

use std::sync::Arc;

use domain::{
    BillingFinalizer, LifecyclePolicy, MenuCatalog, OrderService, PosDatabase, UserDirectory,
};
use realtime::RealtimeHub;
use reports::SalesReports;
use store::Store;

use crate::config::Config;

/// Shared application state accessible from all handlers.
///
/// Every service wraps the same store, so they all see one database.
pub struct AppState {
    pub store: Store<PosDatabase>,
    pub orders: OrderService,
    pub billing: BillingFinalizer,
    pub menu: MenuCatalog,
    pub users: UserDirectory,
    pub reports: SalesReports,
    pub hub: RealtimeHub,
}

impl AppState {
    pub fn new(store: Store<PosDatabase>, policy: LifecyclePolicy, hub: RealtimeHub) -> Self {
        Self {
            orders: OrderService::new(store.clone(), Arc::new(hub.clone())).with_policy(policy),
            billing: BillingFinalizer::new(store.clone()).with_policy(policy),
            menu: MenuCatalog::new(store.clone()),
            users: UserDirectory::new(store.clone()),
            reports: SalesReports::new(store.clone()),
            hub,
            store,
        }
    }
}

/// Builds the state for a configured server.
pub fn create_state(store: Store<PosDatabase>, config: &Config) -> Arc<AppState> {
    Arc::new(AppState::new(
        store,
        config.lifecycle_policy,
        RealtimeHub::new(config.broadcast_capacity),
    ))
}

/// In-memory, seeded state with default settings.
pub fn create_default_state() -> Arc<AppState> {
    create_state(Store::in_memory(), &Config::default())
}
