//! Storefront Cart
//!
//! Shopping cart state for the storefront: line items keyed by product, size
//! and color, persisted to a durable slot after every change.
//!
//! ## Features
//! - Line merging by (product, size, color) identity
//! - Absolute quantity updates, with non-positive quantities removing a line
//! - Cart-wide discount and derived subtotal/total/item count
//! - Pluggable persistence (in-memory, JSON file)
//! - Apparel size and color validation, per-size stock lookup
//! - Checkout payload for the hosted payment backend

pub mod catalog;
pub mod config;
pub mod domain;
pub mod storage;
pub mod store;

pub use catalog::{Catalog, CatalogError};
pub use domain::aggregates::{
    Cart, CheckoutError, CheckoutItem, CheckoutRequest, LineItem, LineKey, Product, StockInfo,
};
pub use domain::events::CartEvent;
pub use domain::value_objects::{DiscountRate, Quantity, Size, SizeError};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::CartStore;

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Invalid selection for {product_id}: {reason}")]
    InvalidSelection { product_id: String, reason: String },

    #[error("Out of stock: {product_id} in size {size}")]
    OutOfStock { product_id: String, size: Size },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Checks a shopper's selection the way the product page does before adding
/// to the cart: the variant must be legal and, once both size and color are
/// chosen and per-size stock is known, in stock.
pub fn check_selection(product: &Product, size: Option<Size>, color: Option<&str>) -> Result<()> {
    if !product.is_valid_size_selection(size) {
        let reason = if product.requires_size() {
            "a size is required"
        } else {
            "this product has no sizes"
        };
        return Err(StorefrontError::InvalidSelection {
            product_id: product.id.clone(),
            reason: reason.into(),
        });
    }
    if !product.accepts_color(color) {
        return Err(StorefrontError::InvalidSelection {
            product_id: product.id.clone(),
            reason: format!("color `{}` is not offered", color.unwrap_or_default()),
        });
    }
    if let (Some(size), Some(_)) = (size, color) {
        if product.stock_for(size).is_some_and(|stock| !stock.available) {
            return Err(StorefrontError::OutOfStock { product_id: product.id.clone(), size });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn tee() -> Product {
        Product::new("18", "Classic Tee", Decimal::new(2799, 2), "Fashion")
            .with_colors(["Black"])
            .with_inventory([(Size::Medium, 3), (Size::Large, 0)])
    }

    #[test]
    fn test_check_selection() {
        let tee = tee();
        assert!(check_selection(&tee, Some(Size::Medium), Some("Black")).is_ok());
        assert!(matches!(
            check_selection(&tee, None, None),
            Err(StorefrontError::InvalidSelection { .. })
        ));
        assert!(matches!(
            check_selection(&tee, Some(Size::Medium), Some("Red")),
            Err(StorefrontError::InvalidSelection { .. })
        ));

        let mug = Product::new("5", "Mug", Decimal::new(1699, 2), "Home");
        assert!(check_selection(&mug, None, Some("Any")).is_ok());
        assert!(check_selection(&mug, Some(Size::Small), None).is_err());
    }

    #[test]
    fn test_stock_checked_once_size_and_color_chosen() {
        let tee = tee();
        assert!(matches!(
            check_selection(&tee, Some(Size::Large), Some("Black")),
            Err(StorefrontError::OutOfStock { size: Size::Large, .. })
        ));
        assert!(check_selection(&tee, Some(Size::Large), None).is_ok());
    }
}
