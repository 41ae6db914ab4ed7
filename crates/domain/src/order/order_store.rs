//! The order collection inside the shared store.

use common::OrderId;
use store::Store;

use crate::database::PosDatabase;
use crate::error::{DomainError, NotFound};

use super::{Order, OrderStatus};

/// Owns order records: id assignment, lookup and in-place mutation.
///
/// Ids are assigned as `max(existing) + 1` while the store's write lock is
/// held, so concurrent submissions can never collide.
#[derive(Clone)]
pub struct OrderStore {
    store: Store<PosDatabase>,
}

impl OrderStore {
    pub fn new(store: Store<PosDatabase>) -> Self {
        Self { store }
    }

    /// Builds and appends a new order.
    ///
    /// `build` receives the database (for validation lookups) and the id the
    /// order will get. If it fails, nothing is stored.
    pub async fn create<F>(&self, build: F) -> Result<Order, DomainError>
    where
        F: FnOnce(&PosDatabase, OrderId) -> Result<Order, DomainError> + Send,
    {
        self.store
            .try_update(|db| {
                let id = OrderId::next_after(db.orders.iter().map(Order::id));
                let order = build(&*db, id)?;
                db.orders.push(order.clone());
                Ok(order)
            })
            .await
    }

    pub async fn get(&self, order_id: OrderId) -> Result<Order, DomainError> {
        self.store
            .read(|db| db.orders.iter().find(|o| o.id() == order_id).cloned())
            .await
            .ok_or_else(|| NotFound::Order { order_id }.into())
    }

    /// Orders in insertion order, optionally restricted to one status.
    pub async fn list(&self, status: Option<OrderStatus>) -> Vec<Order> {
        self.store
            .read(|db| {
                db.orders
                    .iter()
                    .filter(|o| status.is_none_or(|s| o.status() == s))
                    .cloned()
                    .collect()
            })
            .await
    }

    /// Applies `f` to one order and persists the result.
    ///
    /// Returns the updated order alongside whatever `f` produced.
    pub async fn update<T, F>(&self, order_id: OrderId, f: F) -> Result<(Order, T), DomainError>
    where
        F: FnOnce(&mut Order) -> Result<T, DomainError> + Send,
        T: Send,
    {
        self.store
            .try_update(|db| {
                let order = db
                    .orders
                    .iter_mut()
                    .find(|o| o.id() == order_id)
                    .ok_or(NotFound::Order { order_id })?;
                let out = f(order)?;
                Ok((order.clone(), out))
            })
            .await
    }
}
