//! Cart Record
//!
//! Persisted shape of a cart: `{ items: [{ menu_item, quantity, restaurant }],
//! restaurant, total }`. The stored `total` is advisory and is never read back.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{CartLine, CartState},
    menu::{MenuItem, MenuItemId},
    money::Price,
    restaurants::Restaurant,
};

/// Reasons a stored record can't be turned back into a cart.
#[derive(Debug, Error, PartialEq)]
pub enum RehydrateError {
    /// Two lines share a menu item.
    #[error("menu item {0} appears on more than one line")]
    DuplicateItem(MenuItemId),

    /// Lines belong to more than one restaurant.
    #[error("lines belong to more than one restaurant")]
    MixedRestaurants,

    /// Lines exist but no restaurant is recorded anywhere.
    #[error("cart has lines but no restaurant")]
    MissingRestaurant,
}

/// Serialized cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartRecord {
    /// Cart lines
    pub items: Vec<CartLineRecord>,

    /// Cart restaurant
    #[serde(default)]
    pub restaurant: Option<Restaurant>,

    /// Total at save time
    #[serde(default)]
    pub total: Price,
}

/// Serialized cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineRecord {
    /// Captured menu item
    pub menu_item: MenuItem,

    /// Stored quantity
    pub quantity: i64,

    /// Restaurant the line was added from
    #[serde(default)]
    pub restaurant: Option<Restaurant>,
}

impl From<&CartState> for CartRecord {
    fn from(state: &CartState) -> Self {
        Self {
            items: state
                .lines()
                .iter()
                .map(|line| CartLineRecord {
                    menu_item: line.menu_item.clone(),
                    quantity: i64::from(line.quantity),
                    restaurant: Some(line.restaurant.clone()),
                })
                .collect(),
            restaurant: state.restaurant().cloned(),
            total: state.total(),
        }
    }
}

impl TryFrom<CartRecord> for CartState {
    type Error = RehydrateError;

    /// Rebuilds a cart, re-establishing every invariant.
    ///
    /// Lines with a quantity below one are dropped. The restaurant falls back
    /// to the first line's when the top-level field is missing. The total is
    /// recomputed from the surviving lines.
    fn try_from(record: CartRecord) -> Result<Self, Self::Error> {
        let items: Vec<CartLineRecord> = record
            .items
            .into_iter()
            .filter(|line| line.quantity >= 1)
            .collect();

        let Some(restaurant) = record
            .restaurant
            .or_else(|| items.iter().find_map(|line| line.restaurant.clone()))
        else {
            return if items.is_empty() {
                Ok(CartState::default())
            } else {
                Err(RehydrateError::MissingRestaurant)
            };
        };

        let mut seen = FxHashSet::default();
        let mut lines = Vec::with_capacity(items.len());

        for line in items {
            if !seen.insert(line.menu_item.id.clone()) {
                return Err(RehydrateError::DuplicateItem(line.menu_item.id));
            }

            let line_restaurant = line.restaurant.unwrap_or_else(|| restaurant.clone());

            if line_restaurant.id != restaurant.id {
                return Err(RehydrateError::MixedRestaurants);
            }

            lines.push(CartLine {
                menu_item: line.menu_item,
                quantity: u32::try_from(line.quantity).unwrap_or(u32::MAX),
                restaurant: line_restaurant,
            });
        }

        Ok(CartState::from_parts(lines, Some(restaurant)))
    }
}
