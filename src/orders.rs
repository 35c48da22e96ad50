//! Orders

use jiff::Timestamp;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

use crate::{
    cart::CartState, ids::TypedId, menu::MenuItemId, money::Price, restaurants::RestaurantId,
};

/// Order Id
pub type OrderId = TypedId<Order>;

/// Fulfilment status reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Received, not yet accepted
    Pending,
    /// Accepted by the restaurant
    Confirmed,
    /// Being cooked
    Preparing,
    /// Waiting for pickup
    Ready,
    /// Handed to the customer
    Delivered,
    /// Cancelled by either party
    Cancelled,
}

impl OrderStatus {
    /// Whether a restaurant may move an order from this status to `next`.
    ///
    /// Orders only move forward: pending, confirmed, preparing, ready,
    /// delivered. Cancelling is allowed until the kitchen starts cooking.
    pub fn can_become(self, next: OrderStatus) -> bool {
        use OrderStatus::{Cancelled, Confirmed, Delivered, Pending, Preparing, Ready};

        matches!(
            (self, next),
            (Pending, Confirmed | Cancelled)
                | (Confirmed, Preparing | Cancelled)
                | (Preparing, Ready)
                | (Ready, Delivered)
        )
    }

    /// Delivered and cancelled orders never change again.
    pub fn is_final(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        })
    }
}

/// Payment status reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting payment
    Pending,
    /// Paid
    Paid,
    /// Payment failed
    Failed,
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Hosted checkout with the external payment provider
    #[default]
    #[serde(alias = "mercadopago")]
    MercadoPago,
    /// Cash on delivery
    Cash,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    /// Order id
    pub id: OrderId,

    /// Restaurant the order was placed with
    pub restaurant_id: RestaurantId,

    /// Fulfilment status
    pub status: OrderStatus,

    /// Payment status
    #[serde(default = "pending_payment")]
    pub payment_status: PaymentStatus,

    /// Total charged, including delivery
    #[serde(default)]
    pub total_amount: Price,

    /// Delivery address
    #[serde(default)]
    pub delivery_address: String,

    /// Payment method, when recognised
    #[serde(default, deserialize_with = "known_payment_method")]
    pub payment_method: Option<PaymentMethod>,

    /// Free-form notes for the restaurant
    #[serde(default)]
    pub notes: Option<String>,

    /// Creation time
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

fn pending_payment() -> PaymentStatus {
    PaymentStatus::Pending
}

/// Methods this client doesn't offer (`"card"`, `"yape"`, ...) read as
/// unknown instead of failing the whole order.
fn known_payment_method<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<PaymentMethod>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPaymentMethod {
        Known(PaymentMethod),
        Other(IgnoredAny),
    }

    Ok(match Option::<RawPaymentMethod>::deserialize(deserializer)? {
        Some(RawPaymentMethod::Known(method)) => Some(method),
        Some(RawPaymentMethod::Other(_)) | None => None,
    })
}

/// One `{ menu_item_id, quantity }` pair in an order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    /// Menu item being ordered
    pub menu_item_id: MenuItemId,

    /// Units ordered
    pub quantity: u32,
}

/// Order submission payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOrderRequest {
    /// Restaurant to order from
    pub restaurant_id: RestaurantId,

    /// Where to deliver
    pub delivery_address: String,

    /// How the customer pays
    pub payment_method: PaymentMethod,

    /// Free-form notes for the restaurant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Ordered items
    pub items: Vec<OrderLine>,
}

impl CreateOrderRequest {
    /// Builds a submission from a cart snapshot.
    ///
    /// Returns `None` when the cart is empty and there is nothing to order.
    pub fn from_cart(
        cart: &CartState,
        delivery_address: impl Into<String>,
        payment_method: PaymentMethod,
        notes: Option<String>,
    ) -> Option<Self> {
        let restaurant = cart.restaurant()?;

        let items = cart
            .lines()
            .iter()
            .map(|line| OrderLine {
                menu_item_id: line.menu_item.id.clone(),
                quantity: line.quantity,
            })
            .collect();

        Some(Self {
            restaurant_id: restaurant.id.clone(),
            delivery_address: delivery_address.into(),
            payment_method,
            notes: notes.filter(|notes| !notes.trim().is_empty()),
            items,
        })
    }
}
