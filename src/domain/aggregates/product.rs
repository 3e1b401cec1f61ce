//! Product Aggregate

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};
use crate::domain::value_objects::Size;

/// Categories whose products must be bought with a size selected.
pub const APPAREL_CATEGORIES: [&str; 2] = ["Apparel", "Fashion"];

/// Catalog entry, copied by value into each cart line.
///
/// Keys the model does not name are kept in `extra` so a stored line
/// round-trips without losing display data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(custom = "non_negative")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_images: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_tips: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_chart: Option<Vec<SizeChartRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_by_size: Option<BTreeMap<String, u32>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of a garment's size guide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeChartRow {
    pub size: String,
    pub chest: String,
    pub length: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Locally known stock for one size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StockInfo {
    pub available: bool,
    pub stock: u32,
}

fn non_negative(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("negative_price"));
    }
    Ok(())
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn with_colors<I, C>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.colors = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_inventory<I>(mut self, inventory: I) -> Self
    where
        I: IntoIterator<Item = (Size, u32)>,
    {
        let inventory = inventory.into_iter().map(|(size, count)| (size.to_string(), count));
        self.inventory_by_size = Some(inventory.collect());
        self
    }

    pub fn is_apparel(&self) -> bool {
        APPAREL_CATEGORIES.contains(&self.category.as_str())
    }

    pub fn requires_size(&self) -> bool {
        self.is_apparel()
    }

    /// Apparel needs a size; everything else must not carry one.
    pub fn is_valid_size_selection(&self, size: Option<Size>) -> bool {
        self.requires_size() == size.is_some()
    }

    pub fn accepts_color(&self, color: Option<&str>) -> bool {
        match (color, &self.colors) {
            (None, _) | (Some(_), None) => true,
            (Some(color), Some(colors)) => colors.iter().any(|c| c == color),
        }
    }

    pub fn is_valid_selection(&self, size: Option<Size>, color: Option<&str>) -> bool {
        self.is_valid_size_selection(size) && self.accepts_color(color)
    }

    /// Per-size stock, when the product carries its own inventory map.
    /// `None` means stock is tracked elsewhere.
    pub fn stock_for(&self, size: Size) -> Option<StockInfo> {
        let inventory = self.inventory_by_size.as_ref()?;
        let stock = inventory.get(size.as_str()).copied().unwrap_or(0);
        Some(StockInfo { available: stock > 0, stock })
    }
}
