//! Checkout

use thiserror::Error;

use crate::{cart::CartState, money::Price};

/// Reasons a cart can't be checked out yet.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutRuleError {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// Subtotal hasn't reached the restaurant's minimum order.
    #[error("minimum order is {minimum}, {shortfall} short")]
    BelowMinimum {
        /// Restaurant minimum
        minimum: Price,
        /// Amount still missing
        shortfall: Price,
    },
}

/// Amounts shown before placing an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    /// Cart total
    pub subtotal: Price,

    /// Restaurant delivery fee
    pub delivery_fee: Price,

    /// Subtotal plus delivery
    pub total: Price,

    /// Restaurant minimum order
    pub minimum_order: Price,

    /// How much is missing to reach the minimum
    pub shortfall: Price,

    /// Units in the cart
    pub item_count: u64,
}

impl CheckoutSummary {
    /// Summarises a cart snapshot.
    pub fn from_cart(cart: &CartState) -> Self {
        let subtotal = cart.total();
        let (delivery_fee, minimum_order) = cart
            .restaurant()
            .map_or((Price::ZERO, Price::ZERO), |restaurant| {
                (restaurant.delivery_fee, restaurant.minimum_order)
            });

        let shortfall = if subtotal < minimum_order {
            minimum_order.saturating_sub(subtotal)
        } else {
            Price::ZERO
        };

        Self {
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
            minimum_order,
            shortfall,
            item_count: cart.item_count(),
        }
    }

    /// Checks the cart can be ordered.
    ///
    /// # Errors
    ///
    /// - [`CheckoutRuleError::EmptyCart`]: there are no items.
    /// - [`CheckoutRuleError::BelowMinimum`]: the subtotal is under the minimum order.
    pub fn validate(&self) -> Result<(), CheckoutRuleError> {
        if self.item_count == 0 {
            return Err(CheckoutRuleError::EmptyCart);
        }

        if self.shortfall > Price::ZERO {
            return Err(CheckoutRuleError::BelowMinimum {
                minimum: self.minimum_order,
                shortfall: self.shortfall,
            });
        }

        Ok(())
    }
}
