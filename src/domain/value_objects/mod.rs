//! Value Objects for the storefront cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

/// Apparel size variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "S")]
    Small,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
    #[serde(rename = "XL")]
    ExtraLarge,
    #[serde(rename = "XXL")]
    DoubleExtraLarge,
}

impl Size {
    /// Every size in display order.
    pub const ALL: [Size; 5] = [
        Size::Small,
        Size::Medium,
        Size::Large,
        Size::ExtraLarge,
        Size::DoubleExtraLarge,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
            Self::ExtraLarge => "XL",
            Self::DoubleExtraLarge => "XXL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Size::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SizeError::Unknown(wanted.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    #[error("unknown size `{0}` (expected one of S, M, L, XL, XXL)")]
    Unknown(String),
}

/// Quantity of a cart line. Never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    pub const ONE: Quantity = Quantity(NonZeroU32::MIN);

    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Interprets a caller-supplied quantity. Anything `<= 0` means "no line";
    /// values past `u32::MAX` are clamped.
    pub fn from_requested(value: i64) -> Option<Self> {
        if value <= 0 {
            return None;
        }
        Self::new(u32::try_from(value).unwrap_or(u32::MAX))
    }

    pub fn value(self) -> u32 {
        self.0.get()
    }
    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl From<Quantity> for Decimal {
    fn from(q: Quantity) -> Self {
        Decimal::from(q.value())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cart-wide discount, applied multiplicatively to the subtotal.
///
/// Any value is accepted; keeping it within `[0, 1)` is up to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountRate(Decimal);

impl DiscountRate {
    pub const NONE: DiscountRate = DiscountRate(Decimal::ZERO);
    /// First-time customer discount (10%).
    pub const FIRST_TIME: DiscountRate = DiscountRate(Decimal::from_parts(10, 0, 0, false, 2));

    pub fn new(rate: Decimal) -> Self {
        Self(rate)
    }
    pub fn rate(self) -> Decimal {
        self.0
    }
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Amount taken off `subtotal`.
    pub fn amount(self, subtotal: Decimal) -> Decimal {
        subtotal.saturating_mul(self.0)
    }

    /// `subtotal × (1 − rate)`.
    pub fn apply(self, subtotal: Decimal) -> Decimal {
        subtotal.saturating_mul(Decimal::ONE.saturating_sub(self.0))
    }
}

impl From<Decimal> for DiscountRate {
    fn from(rate: Decimal) -> Self {
        Self(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_parse() {
        assert_eq!("xl".parse::<Size>().unwrap(), Size::ExtraLarge);
        assert_eq!(" M ".parse::<Size>().unwrap(), Size::Medium);
        assert!("XS".parse::<Size>().is_err());
    }

    #[test]
    fn test_size_wire_names() {
        assert_eq!(serde_json::to_string(&Size::DoubleExtraLarge).unwrap(), "\"XXL\"");
        assert_eq!(serde_json::from_str::<Size>("\"S\"").unwrap(), Size::Small);
        assert!(serde_json::from_str::<Size>("\"s\"").is_err());
    }

    #[test]
    fn test_quantity_from_requested() {
        assert_eq!(Quantity::from_requested(0), None);
        assert_eq!(Quantity::from_requested(-5), None);
        assert_eq!(Quantity::from_requested(3).map(Quantity::value), Some(3));
        assert_eq!(Quantity::from_requested(i64::MAX).map(Quantity::value), Some(u32::MAX));
        assert_eq!(Quantity::new(u32::MAX).unwrap().increment().value(), u32::MAX);
    }

    #[test]
    fn test_quantity_rejects_zero_on_read() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("4").unwrap().value(), 4);
    }

    #[test]
    fn test_discount_apply() {
        let subtotal = Decimal::new(10998, 2);
        assert_eq!(DiscountRate::FIRST_TIME.rate(), Decimal::new(1, 1));
        assert_eq!(DiscountRate::FIRST_TIME.apply(subtotal), Decimal::new(98982, 3));
        assert_eq!(DiscountRate::FIRST_TIME.amount(subtotal), Decimal::new(10998, 3));
        assert_eq!(DiscountRate::NONE.apply(subtotal), subtotal);
    }
}
