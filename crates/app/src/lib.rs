//! Comanda client application: storage, session, cart service, checkout,
//! account and owner services, and the marketplace API client.

pub mod accounts;
pub mod api;
pub mod carts;
pub mod checkout;
pub mod config;
pub mod context;
pub mod notifications;
pub mod observability;
pub mod owners;
pub mod session;
pub mod storage;
