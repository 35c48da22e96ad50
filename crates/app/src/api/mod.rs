//! Marketplace API
//!
//! The remote service that owns restaurants, menus, users and orders. The
//! cart never talks to it; only catalog browsing, sign in and checkout do.

use std::fmt::Debug;

use async_trait::async_trait;
use comanda::{
    menu::{MenuItem, MenuItemId},
    orders::{CreateOrderRequest, Order, OrderId, OrderStatus},
    restaurants::{Restaurant, RestaurantId},
    users::{LoginResponse, RegisterRequest, User},
};
use mockall::automock;

mod errors;
mod http;

pub use errors::ApiError;
pub use http::HttpMarketplaceApi;

#[automock]
#[async_trait]
pub trait MarketplaceApi: Debug + Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Creates an account and signs it in.
    async fn register(&self, request: &RegisterRequest) -> Result<LoginResponse, ApiError>;

    /// Revokes the current token on the server.
    async fn logout(&self) -> Result<(), ApiError>;

    /// The user the current token belongs to.
    async fn current_user(&self) -> Result<User, ApiError>;

    /// All listed restaurants.
    async fn restaurants(&self) -> Result<Vec<Restaurant>, ApiError>;

    /// A single restaurant.
    async fn restaurant(&self, id: &RestaurantId) -> Result<Restaurant, ApiError>;

    /// A restaurant's menu.
    async fn menu_items(&self, restaurant_id: &RestaurantId) -> Result<Vec<MenuItem>, ApiError>;

    /// Submits an order.
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ApiError>;

    /// The signed in customer's orders.
    async fn orders(&self) -> Result<Vec<Order>, ApiError>;

    /// A single order.
    async fn order(&self, id: &OrderId) -> Result<Order, ApiError>;

    /// Restaurants owned by the signed in owner.
    async fn my_restaurants(&self) -> Result<Vec<Restaurant>, ApiError>;

    /// Orders placed with the signed in owner's restaurants.
    async fn restaurant_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// Moves an order to `status`.
    async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError>;

    /// Flips whether a menu item can be ordered.
    async fn toggle_menu_item_availability(&self, id: &MenuItemId) -> Result<MenuItem, ApiError>;
}
