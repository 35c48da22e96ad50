//! Checkout
//!
//! Turns the cart into a submitted order. The cart is only cleared once the
//! server has accepted the order.

use std::sync::Arc;

use comanda::{
    checkout::{CheckoutRuleError, CheckoutSummary},
    orders::{CreateOrderRequest, Order, PaymentMethod},
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    api::{ApiError, MarketplaceApi},
    carts::CartService,
    notifications::{Notification, Notifier},
    session::{Session, SessionError},
};

/// Where and how the order should be delivered and paid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryDetails {
    pub address: String,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("a delivery address is required")]
    MissingAddress,

    #[error(transparent)]
    Rules(#[from] CheckoutRuleError),

    #[error("order was not accepted: {0}")]
    Api(#[from] ApiError),
}

#[derive(Debug)]
pub struct Checkout {
    api: Arc<dyn MarketplaceApi>,
    notifier: Arc<dyn Notifier>,
}

impl Checkout {
    pub fn new(api: Arc<dyn MarketplaceApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Submits the cart as an order and empties it on success.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Session`] when the caller isn't a signed in customer.
    /// - [`CheckoutError::MissingAddress`] when the address is blank.
    /// - [`CheckoutError::Rules`] when the cart is empty or under the minimum order.
    /// - [`CheckoutError::Api`] when the server rejects the order; the cart is kept.
    pub async fn place_order(
        &self,
        session: &Session,
        cart: &mut CartService,
        details: DeliveryDetails,
    ) -> Result<Order, CheckoutError> {
        session.require_customer()?;

        let address = details.address.trim();

        if address.is_empty() {
            return Err(CheckoutError::MissingAddress);
        }

        CheckoutSummary::from_cart(cart.state()).validate()?;

        let request = CreateOrderRequest::from_cart(
            cart.state(),
            address,
            details.payment_method,
            details.notes,
        )
        .ok_or(CheckoutRuleError::EmptyCart)?;

        match self.api.create_order(&request).await {
            Ok(order) => {
                info!(order_id = %order.id, restaurant_id = %request.restaurant_id, "order placed");

                cart.clear_cart();

                self.notifier.notify(&Notification::OrderPlaced {
                    order_id: order.id.clone(),
                });

                Ok(order)
            }
            Err(error) => {
                warn!(%error, "order submission failed");

                self.notifier.notify(&Notification::OrderFailed {
                    reason: error.to_string(),
                });

                Err(error.into())
            }
        }
    }
}
