//! Session cart store.
//!
//! [`CartStore`] owns the in-memory [`Cart`] for one shopper session and keeps a
//! [`CartStorage`] slot in step with it: the slot is read once when the store
//! opens and rewritten with the full line list after every mutation. Storage
//! failures never reach the caller; they are logged and the in-memory cart
//! stays authoritative.

use crate::domain::aggregates::{
    Cart, CheckoutError, CheckoutRequest, LineItem, LineKey, Product,
};
use rust_decimal::Decimal;
use crate::domain::events::CartEvent;
use crate::domain::value_objects::{DiscountRate, Size};
use crate::storage::{CartStorage, StorageError};

#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    cart: Cart,
    discount: DiscountRate,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Hydrates from `storage`. A missing, unreadable or malformed snapshot
    /// yields an empty cart.
    pub fn open(storage: S) -> Self {
        let cart = hydrate(&storage);
        tracing::debug!(lines = cart.len(), items = cart.item_count(), "cart store opened");
        Self { cart, discount: DiscountRate::NONE, storage }
    }

    pub fn add_line(&mut self, product: &Product, size: Option<Size>, color: Option<&str>) {
        self.dispatch(CartEvent::LineAdded {
            product: product.clone(),
            size,
            color: color.map(str::to_string),
        });
    }

    pub fn remove_line(&mut self, product_id: &str, size: Option<Size>, color: Option<&str>) {
        self.dispatch(CartEvent::LineRemoved { key: LineKey::new(product_id, size, color) });
    }

    pub fn update_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
        size: Option<Size>,
        color: Option<&str>,
    ) {
        let key = LineKey::new(product_id, size, color);
        self.dispatch(CartEvent::QuantitySet { key, quantity });
    }

    pub fn clear(&mut self) {
        self.dispatch(CartEvent::Cleared);
    }

    /// Cart-wide discount. Not validated and not persisted.
    pub fn set_discount(&mut self, rate: Decimal) {
        self.discount = DiscountRate::new(rate);
        tracing::debug!(rate = %rate, "cart discount set");
    }

    pub fn discount(&self) -> Decimal {
        self.discount.rate()
    }
    pub fn cart(&self) -> &Cart {
        &self.cart
    }
    pub fn lines(&self) -> &[LineItem] {
        self.cart.lines()
    }
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }
    pub fn discount_amount(&self) -> Decimal {
        self.discount.amount(self.subtotal())
    }
    pub fn total(&self) -> Decimal {
        self.discount.apply(self.subtotal())
    }
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    pub fn checkout(
        &self,
        email: impl Into<String>,
        phone: Option<String>,
    ) -> Result<CheckoutRequest, CheckoutError> {
        CheckoutRequest::from_lines(self.cart.lines(), email, phone)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn dispatch(&mut self, event: CartEvent) {
        let changed = self.cart.apply(&event);
        tracing::debug!(
            event = event.name(),
            product_id = ?event.product_id(),
            changed,
            lines = self.cart.len(),
            "cart mutated"
        );
        self.persist();
    }

    fn persist(&self) {
        let written = serde_json::to_string(self.cart.lines())
            .map_err(StorageError::from)
            .and_then(|snapshot| self.storage.save(&snapshot));
        if let Err(error) = written {
            tracing::warn!(%error, "failed to persist cart snapshot");
        }
    }
}

fn hydrate<S: CartStorage>(storage: &S) -> Cart {
    let snapshot = match storage.load() {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => return Cart::new(),
        Err(error) => {
            tracing::warn!(%error, "failed to read cart snapshot, starting empty");
            return Cart::new();
        }
    };
    match serde_json::from_str::<Vec<LineItem>>(&snapshot) {
        Ok(lines) => {
            let stored = lines.len();
            let cart = Cart::from_lines(lines);
            if cart.len() != stored {
                tracing::warn!(
                    stored,
                    kept = cart.len(),
                    "merged duplicate lines in cart snapshot"
                );
            }
            cart
        }
        Err(error) => {
            tracing::warn!(%error, "discarding malformed cart snapshot");
            Cart::new()
        }
    }
}
