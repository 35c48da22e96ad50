//! Cart persistence adapter.
//!
//! The only component that reads or writes the stored cart. Neither direction
//! ever fails from the caller's point of view: a bad read degrades to an empty
//! cart and a bad write only costs durability.

use std::sync::Arc;

use comanda::cart::{
    CartState,
    record::{CartRecord, RehydrateError},
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart";

#[derive(Debug, Error)]
pub(crate) enum PersistenceError {
    #[error("storage error")]
    Storage(#[from] StorageError),

    #[error("malformed cart record")]
    Json(#[from] serde_json::Error),

    #[error("inconsistent cart record")]
    Rehydrate(#[from] RehydrateError),
}

#[derive(Debug, Clone)]
pub struct CartPersistence {
    store: Arc<dyn KeyValueStore>,
}

impl CartPersistence {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads the stored cart, or an empty one when there is nothing usable.
    pub fn load(&self) -> CartState {
        match self.try_load() {
            Ok(state) => {
                debug!(lines = state.len(), total = %state.total(), "loaded cart");
                state
            }
            Err(error) => {
                warn!(%error, "discarding stored cart");
                CartState::default()
            }
        }
    }

    /// Writes the full cart. Failures are logged and swallowed.
    pub fn save(&self, state: &CartState) {
        if let Err(error) = self.try_save(state) {
            warn!(%error, lines = state.len(), "failed to store cart");
        }
    }

    pub(crate) fn try_load(&self) -> Result<CartState, PersistenceError> {
        let Some(raw) = self.store.get(CART_STORAGE_KEY)? else {
            return Ok(CartState::default());
        };

        let record: CartRecord = serde_json::from_str(&raw)?;

        Ok(CartState::try_from(record)?)
    }

    pub(crate) fn try_save(&self, state: &CartState) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(&CartRecord::from(state))?;

        self.store.set(CART_STORAGE_KEY, &json)?;

        Ok(())
    }
}
