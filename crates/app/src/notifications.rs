//! User-facing notifications.
//!
//! The cart façade and checkout decide *what* to tell the user; a [`Notifier`]
//! decides how it is shown.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use comanda::orders::{OrderId, OrderStatus};
use mockall::automock;
use tracing::{info, warn};

/// Whether a notification reports success or a rejected action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// Something the user should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// An item was added to the cart.
    ItemAdded { name: String },

    /// A line was explicitly removed from the cart.
    ItemRemoved,

    /// An add was refused because the cart holds another restaurant's items.
    SingleRestaurantOnly,

    /// An add was refused because nobody is signed in.
    SignInRequired,

    /// An add was refused because the signed in user is not a customer.
    CustomersOnly,

    /// An order was submitted successfully.
    OrderPlaced { order_id: OrderId },

    /// An order submission failed.
    OrderFailed { reason: String },

    /// A restaurant moved one of its orders along.
    OrderStatusChanged {
        order_id: OrderId,
        status: OrderStatus,
    },
}

impl Notification {
    pub fn level(&self) -> Level {
        match self {
            Notification::ItemAdded { .. }
            | Notification::ItemRemoved
            | Notification::OrderPlaced { .. }
            | Notification::OrderStatusChanged { .. } => Level::Success,
            Notification::SingleRestaurantOnly
            | Notification::SignInRequired
            | Notification::CustomersOnly
            | Notification::OrderFailed { .. } => Level::Error,
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Notification::ItemAdded { name } => write!(f, "{name} added to cart"),
            Notification::ItemRemoved => f.write_str("Item removed from cart"),
            Notification::SingleRestaurantOnly => {
                f.write_str("You can only order from one restaurant at a time")
            }
            Notification::SignInRequired => f.write_str("Sign in to add items to your cart"),
            Notification::CustomersOnly => f.write_str("Only customers can add items to a cart"),
            Notification::OrderPlaced { order_id } => write!(f, "Order {order_id} placed"),
            Notification::OrderFailed { reason } => write!(f, "Could not place order: {reason}"),
            Notification::OrderStatusChanged { order_id, status } => {
                write!(f, "Order {order_id} is now {status}")
            }
        }
    }
}

/// Surfaces notifications to the user.
#[automock]
pub trait Notifier: Debug + Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Renders notifications as log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.level() {
            Level::Success => info!(target: "comanda::notify", "{notification}"),
            Level::Error => warn!(target: "comanda::notify", "{notification}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_are_errors() {
        assert_eq!(Notification::SingleRestaurantOnly.level(), Level::Error);
        assert_eq!(Notification::CustomersOnly.level(), Level::Error);
        assert_eq!(
            Notification::ItemAdded {
                name: "Ceviche".to_string()
            }
            .level(),
            Level::Success
        );
    }

    #[test]
    fn item_added_names_the_item() {
        let notification = Notification::ItemAdded {
            name: "Ají de gallina".to_string(),
        };

        assert_eq!(notification.to_string(), "Ají de gallina added to cart");
    }

    #[test]
    fn status_change_names_order_and_status() {
        let notification = Notification::OrderStatusChanged {
            order_id: OrderId::from("12"),
            status: OrderStatus::Ready,
        };

        assert_eq!(notification.level(), Level::Success);
        assert_eq!(notification.to_string(), "Order 12 is now ready");
    }
}
