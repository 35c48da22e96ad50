//! Carts

mod errors;
pub mod persistence;
pub mod service;

pub use errors::CartError;
pub use persistence::{CART_STORAGE_KEY, CartPersistence};
pub use service::CartService;
