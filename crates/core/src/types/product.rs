//! Catalog product summary.
//!
//! One denormalized shape serves both panels: the storefront reads the
//! display fields (title, image, prices, badge) while the console pipeline
//! reads the merchandising fields (status, stock, flags, priorities).
//! Optional fields default rather than fail on deserialization because list
//! payloads from older catalog revisions may omit them.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::price::Price;
use super::status::{CategoryStatus, ProductStatus};

/// A catalog product as it appears in list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable product reference.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Current unit price.
    #[serde(default)]
    pub price: Price,
    /// Pre-discount price, when the product is on sale.
    #[serde(default)]
    pub original_price: Option<Price>,
    /// Primary image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Owning category, when assigned.
    #[serde(default)]
    pub category: Option<CategoryId>,
    /// Promotional badge text (e.g., "New", "Sale").
    #[serde(default)]
    pub badge: Option<String>,
    /// Publication status.
    #[serde(default)]
    pub status: ProductStatus,
    /// Units on hand; `None` means the backend did not report stock.
    #[serde(default)]
    pub stock: Option<i64>,
    /// Member-exclusive product.
    #[serde(default)]
    pub exclusive: bool,
    /// Featured on the storefront home page.
    #[serde(default)]
    pub featured: bool,
    /// Manual ordering rank for the trending view.
    #[serde(default)]
    pub trending_sort: Option<i64>,
    /// General manual ordering rank.
    #[serde(default)]
    pub display_priority: Option<i64>,
}

impl Product {
    /// Units on hand, treating unreported stock as zero.
    #[must_use]
    pub fn stock_or_zero(&self) -> i64 {
        self.stock.unwrap_or(0)
    }

    /// Whether the product can currently be sold.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock_or_zero() > 0
    }
}

/// A catalog category as it appears in list and search responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable category reference.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Visibility status.
    #[serde(default)]
    pub status: CategoryStatus,
    /// Banner image URL.
    #[serde(default)]
    pub image: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_payload_deserializes() {
        let product: Product =
            serde_json::from_str(r#"{"id":"prod_1","title":"Linen Tote"}"#).unwrap();
        assert_eq!(product.id, ProductId::new("prod_1"));
        assert_eq!(product.status, ProductStatus::Published);
        assert!(product.stock.is_none());
        assert!(!product.exclusive);
    }

    #[test]
    fn test_stock_defaults_to_zero() {
        let product: Product =
            serde_json::from_str(r#"{"id":"prod_1","title":"Linen Tote"}"#).unwrap();
        assert_eq!(product.stock_or_zero(), 0);
        assert!(!product.in_stock());
    }
}
