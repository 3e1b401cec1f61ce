//! Cart Aggregate

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::domain::aggregates::Product;
use crate::domain::events::CartEvent;
use crate::domain::value_objects::{Quantity, Size};

/// Identity of a cart line. An unset size or color is its own key value,
/// distinct from every set one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: String,
    pub size: Option<Size>,
    pub color: Option<String>,
}

impl LineKey {
    pub fn new(product_id: impl Into<String>, size: Option<Size>, color: Option<&str>) -> Self {
        Self { product_id: product_id.into(), size, color: color.map(str::to_string) }
    }
}

/// A product snapshot plus the shopper's selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
}

impl LineItem {
    pub fn product_id(&self) -> &str {
        &self.product.id
    }
    pub fn unit_price(&self) -> Decimal {
        self.product.price
    }
    pub fn line_total(&self) -> Decimal {
        self.product.price.saturating_mul(self.quantity.into())
    }

    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product.id.clone(),
            size: self.selected_size,
            color: self.selected_color.clone(),
        }
    }

    pub fn has_key(&self, key: &LineKey) -> bool {
        self.product.id == key.product_id
            && self.selected_size == key.size
            && self.selected_color == key.color
    }
}

/// Ordered cart lines; no two lines share a [`LineKey`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from stored lines, folding lines with the same key into
    /// the first occurrence.
    pub fn from_lines(lines: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            let key = line.key();
            if let Some(existing) = cart.lines.iter_mut().find(|l| l.has_key(&key)) {
                let merged = existing.quantity.value().saturating_add(line.quantity.value());
                existing.quantity = Quantity::new(merged).unwrap_or(existing.quantity);
            } else {
                cart.lines.push(line);
            }
        }
        cart
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }
    pub fn into_lines(self) -> Vec<LineItem> {
        self.lines
    }
    pub fn len(&self) -> usize {
        self.lines.len()
    }
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
    pub fn find(&self, key: &LineKey) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.has_key(key))
    }

    /// Applies one event. Returns whether the cart changed.
    pub fn apply(&mut self, event: &CartEvent) -> bool {
        match event {
            CartEvent::LineAdded { product, size, color } => {
                self.add_line(product, *size, color.as_deref())
            }
            CartEvent::LineRemoved { key } => self.remove_line(key),
            CartEvent::QuantitySet { key, quantity } => self.update_quantity(key, *quantity),
            CartEvent::Cleared => self.clear(),
        }
    }

    pub fn add_line(&mut self, product: &Product, size: Option<Size>, color: Option<&str>) -> bool {
        let key = LineKey::new(product.id.as_str(), size, color);
        if let Some(existing) = self.lines.iter_mut().find(|l| l.has_key(&key)) {
            existing.quantity = existing.quantity.increment();
        } else {
            self.lines.push(LineItem {
                product: product.clone(),
                quantity: Quantity::ONE,
                selected_size: size,
                selected_color: key.color,
            });
        }
        true
    }

    pub fn remove_line(&mut self, key: &LineKey) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| !l.has_key(key));
        self.lines.len() != before
    }

    /// Sets an absolute quantity; `<= 0` removes the line.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> bool {
        let Some(quantity) = Quantity::from_requested(quantity) else {
            return self.remove_line(key);
        };
        match self.lines.iter_mut().find(|l| l.has_key(key)) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.lines.is_empty();
        self.lines.clear();
        changed
    }

    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.line_total()))
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity.value())).sum()
    }
}
