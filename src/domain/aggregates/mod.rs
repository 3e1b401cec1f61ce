//! Aggregates module
pub mod product;
pub mod cart;
pub mod checkout;

pub use product::{Product, StockInfo, APPAREL_CATEGORIES};
pub use cart::{Cart, LineItem, LineKey};
pub use checkout::{CheckoutError, CheckoutItem, CheckoutRequest};
