use std::sync::{Arc, RwLock};

use transaction::{Result, Snapshot, Snapshotter, StoreError};

use super::OrderRepository;
use crate::booking::Order;

const STORE: &str = "orders";

/// In-memory order store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty order store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Poisoned { store: STORE }
}

impl OrderRepository for InMemoryOrderRepository {
    fn save(&self, order: &Order) -> Result<()> {
        self.orders.write().map_err(poisoned)?.push(order.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Order>> {
        Ok(self.orders.read().map_err(poisoned)?.clone())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.orders.read().map_err(poisoned)?.len())
    }
}

impl Snapshotter for InMemoryOrderRepository {
    type State = Vec<Order>;

    fn name(&self) -> &'static str {
        STORE
    }

    fn create_snapshot(&self) -> Result<Snapshot<Vec<Order>>> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(Snapshot::new(orders.clone()))
    }

    fn restore_snapshot(&self, snapshot: Snapshot<Vec<Order>>) -> Result<()> {
        *self.orders.write().map_err(poisoned)? = snapshot.into_state();
        Ok(())
    }
}
