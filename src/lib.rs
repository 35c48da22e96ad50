//! Comanda
//!
//! Comanda is the client core of a food-ordering marketplace: menu and
//! restaurant shapes as served by the remote API, a single-restaurant shopping
//! cart driven by a pure reducer, the cart's persisted record, and checkout
//! totals.

pub mod cart;
pub mod checkout;
pub mod ids;
pub mod menu;
pub mod money;
pub mod orders;
pub mod restaurants;
pub mod users;
