//! Checkout payload built from cart lines

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use crate::domain::aggregates::LineItem;
use crate::domain::value_objects::Size;

/// Body of the hosted checkout-session request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
    pub customer_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("product {product_id} needs a size before checkout")]
    MissingSize { product_id: String },
}

impl From<&LineItem> for CheckoutItem {
    fn from(line: &LineItem) -> Self {
        Self {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            price: line.product.price,
            quantity: line.quantity.value(),
            image: line.product.image.clone(),
            size: line.selected_size,
            color: line.selected_color.clone(),
        }
    }
}

impl CheckoutRequest {
    pub fn from_lines(
        lines: &[LineItem],
        email: impl Into<String>,
        phone: Option<String>,
    ) -> Result<Self, CheckoutError> {
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let unsized_line = lines
            .iter()
            .find(|l| l.product.requires_size() && l.selected_size.is_none());
        if let Some(line) = unsized_line {
            return Err(CheckoutError::MissingSize { product_id: line.product.id.clone() });
        }
        Ok(Self {
            items: lines.iter().map(CheckoutItem::from).collect(),
            customer_email: email.into(),
            customer_phone: phone.filter(|p| !p.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::{Cart, Product};

    #[test]
    fn test_checkout_payload() {
        let mut cart = Cart::new();
        let hoodie = Product::new("2", "Cozy Hoodie", Decimal::new(5499, 2), "Apparel");
        cart.add_line(&hoodie, Some(Size::Medium), Some("Black"));
        cart.add_line(&hoodie, Some(Size::Medium), Some("Black"));
        cart.add_line(&Product::new("5", "Mug", Decimal::new(1699, 2), "Home"), None, None);

        let request =
            CheckoutRequest::from_lines(cart.lines(), "fan@example.com", Some(String::new()))
                .unwrap();
        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[0].quantity, 2);
        assert_eq!(request.customer_phone, None);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["customerEmail"], "fan@example.com");
        assert_eq!(json["items"][0]["size"], "M");
        assert_eq!(json["items"][0]["price"], serde_json::json!(54.99));
        assert!(json["items"][1].get("size").is_none());
    }

    #[test]
    fn test_checkout_requires_apparel_sizes() {
        let mut cart = Cart::new();
        let tee = Product::new("18", "Classic Tee", Decimal::new(2799, 2), "Fashion");
        cart.add_line(&tee, None, Some("Black"));
        assert_eq!(
            CheckoutRequest::from_lines(cart.lines(), "fan@example.com", None),
            Err(CheckoutError::MissingSize { product_id: "18".into() })
        );
        assert_eq!(
            CheckoutRequest::from_lines(&[], "fan@example.com", None),
            Err(CheckoutError::EmptyCart)
        );
    }
}
