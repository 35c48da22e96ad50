//! Cart
//!
//! Client-side shopping cart. A cart holds lines from at most one restaurant,
//! keeps at most one line per menu item, and always carries a total derived
//! from its lines. State only changes through [`reduce`].

use crate::{
    menu::{MenuItem, MenuItemId},
    money::Price,
    restaurants::Restaurant,
};

mod reducer;
pub mod record;

pub use reducer::{CartAction, reduce};

/// One line in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Menu item as captured when first added
    pub menu_item: MenuItem,

    /// Units, always at least one
    pub quantity: u32,

    /// Restaurant the item was added from
    pub restaurant: Restaurant,
}

impl CartLine {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Price {
        self.menu_item.price.times(self.quantity)
    }
}

/// The cart aggregate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    lines: Vec<CartLine>,
    restaurant: Option<Restaurant>,
    total: Price,
}

impl CartState {
    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The restaurant every line belongs to, if any.
    pub fn restaurant(&self) -> Option<&Restaurant> {
        self.restaurant.as_ref()
    }

    /// Sum of unit price times quantity over all lines.
    pub fn total(&self) -> Price {
        self.total
    }

    /// Finds the line for a menu item.
    pub fn line(&self, menu_item: &MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.menu_item.id == menu_item)
    }

    /// Total number of units, for badge display.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Builds a state from lines, deriving the total.
    ///
    /// Callers are responsible for the line invariants; this only enforces
    /// that an empty cart has no restaurant.
    pub(crate) fn from_parts(lines: Vec<CartLine>, restaurant: Option<Restaurant>) -> Self {
        let restaurant = if lines.is_empty() { None } else { restaurant };
        let total = compute_total(&lines);

        Self {
            lines,
            restaurant,
            total,
        }
    }
}

/// Recomputes a total from scratch.
pub fn compute_total(lines: &[CartLine]) -> Price {
    lines.iter().map(CartLine::line_total).sum()
}
