//! Cart events
use crate::domain::aggregates::{LineKey, Product};
use crate::domain::value_objects::Size;

/// A single mutation of the cart. The reducer in [`crate::domain::aggregates::Cart::apply`]
/// is the only place these take effect.
#[derive(Clone, Debug, PartialEq)]
pub enum CartEvent {
    LineAdded { product: Product, size: Option<Size>, color: Option<String> },
    LineRemoved { key: LineKey },
    /// Absolute quantity; `<= 0` removes the line.
    QuantitySet { key: LineKey, quantity: i64 },
    Cleared,
}

impl CartEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LineAdded { .. } => "line_added",
            Self::LineRemoved { .. } => "line_removed",
            Self::QuantitySet { .. } => "quantity_set",
            Self::Cleared => "cleared",
        }
    }

    pub fn product_id(&self) -> Option<&str> {
        match self {
            Self::LineAdded { product, .. } => Some(&product.id),
            Self::LineRemoved { key } | Self::QuantitySet { key, .. } => Some(&key.product_id),
            Self::Cleared => None,
        }
    }
}
