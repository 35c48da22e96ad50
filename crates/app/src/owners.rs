//! Owner desk
//!
//! What a restaurant owner can do from the client: list their restaurants,
//! follow incoming orders, move them through the kitchen and switch menu
//! items on or off. Every call is gated on an owner session.

use std::sync::Arc;

use comanda::{
    menu::{MenuItem, MenuItemId},
    orders::{Order, OrderId, OrderStatus},
    restaurants::Restaurant,
};
use thiserror::Error;
use tracing::info;

use crate::{
    api::{ApiError, MarketplaceApi},
    notifications::{Notification, Notifier},
    session::{Session, SessionError},
};

#[derive(Debug, Error)]
pub enum OwnerError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("order {order} can't go from {from} to {to}")]
    InvalidTransition {
        order: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug)]
pub struct OwnerDesk {
    api: Arc<dyn MarketplaceApi>,
    notifier: Arc<dyn Notifier>,
}

impl OwnerDesk {
    pub fn new(api: Arc<dyn MarketplaceApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Restaurants the signed in owner manages.
    ///
    /// # Errors
    ///
    /// - [`OwnerError::Session`] when the caller isn't a signed in owner.
    /// - [`OwnerError::Api`] when the request fails.
    pub async fn restaurants(&self, session: &Session) -> Result<Vec<Restaurant>, OwnerError> {
        session.require_owner()?;

        Ok(self.api.my_restaurants().await?)
    }

    /// Orders placed with the owner's restaurants, newest first as served.
    ///
    /// # Errors
    ///
    /// - [`OwnerError::Session`] when the caller isn't a signed in owner.
    /// - [`OwnerError::Api`] when the request fails.
    pub async fn orders(&self, session: &Session) -> Result<Vec<Order>, OwnerError> {
        session.require_owner()?;

        Ok(self.api.restaurant_orders().await?)
    }

    /// Moves an order to `status` after checking the move is allowed from
    /// its current status.
    ///
    /// # Errors
    ///
    /// - [`OwnerError::Session`] when the caller isn't a signed in owner.
    /// - [`OwnerError::InvalidTransition`] when the order can't reach `status`
    ///   from where it is; nothing is sent.
    /// - [`OwnerError::Api`] when fetching or updating the order fails.
    pub async fn update_order_status(
        &self,
        session: &Session,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, OwnerError> {
        session.require_owner()?;

        let current = self.api.order(order_id).await?;

        if !current.status.can_become(status) {
            return Err(OwnerError::InvalidTransition {
                order: current.id,
                from: current.status,
                to: status,
            });
        }

        let order = self.api.update_order_status(order_id, status).await?;

        info!(order_id = %order.id, from = %current.status, to = %order.status, "order status changed");

        self.notifier.notify(&Notification::OrderStatusChanged {
            order_id: order.id.clone(),
            status: order.status,
        });

        Ok(order)
    }

    /// Flips a menu item between available and sold out.
    ///
    /// # Errors
    ///
    /// - [`OwnerError::Session`] when the caller isn't a signed in owner.
    /// - [`OwnerError::Api`] when the request fails.
    pub async fn toggle_availability(
        &self,
        session: &Session,
        menu_item_id: &MenuItemId,
    ) -> Result<MenuItem, OwnerError> {
        session.require_owner()?;

        let item = self.api.toggle_menu_item_availability(menu_item_id).await?;

        info!(menu_item_id = %item.id, available = item.is_available, "menu item toggled");

        Ok(item)
    }
}
