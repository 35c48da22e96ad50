//! Cart service errors.

use comanda::restaurants::RestaurantId;
use thiserror::Error;

use crate::session::SessionError;

/// A rejected cart mutation. The cart is unchanged whenever one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("cart already holds items from restaurant {current}, cannot add from {requested}")]
    DifferentRestaurant {
        current: RestaurantId,
        requested: RestaurantId,
    },

    #[error("not allowed to modify the cart")]
    Session(#[from] SessionError),
}
