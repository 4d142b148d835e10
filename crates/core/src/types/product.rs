//! Product records as the backend stores them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id::ProductId;
use super::price::price_from_json;

/// A product owned by the logged-in user.
///
/// Every field except the identifier is optional on the wire; the backend is
/// not strict about what it returns, and the dashboard has to render whatever
/// comes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProductRecord")]
pub struct Product {
    /// Server-assigned identifier.
    #[serde(rename = "product_id")]
    pub id: ProductId,
    /// Display name.
    #[serde(rename = "product_name")]
    pub name: Option<String>,
    /// Unit price, non-negative.
    #[serde(rename = "product_prize")]
    pub price: Option<f64>,
    /// Free-form description.
    #[serde(rename = "product_description")]
    pub description: Option<String>,
    /// Color label.
    #[serde(rename = "product_color")]
    pub color: Option<String>,
}

/// Wire shape of a listed product.
///
/// Reads accept both spellings of the price key because the backend stores
/// whatever the create and update endpoints were sent.
#[derive(Deserialize)]
struct ProductRecord {
    product_id: ProductId,
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    product_prize: Option<Value>,
    #[serde(default)]
    product_price: Option<Value>,
    #[serde(default)]
    product_description: Option<String>,
    #[serde(default)]
    product_color: Option<String>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        let price = record
            .product_prize
            .as_ref()
            .and_then(price_from_json)
            .or_else(|| record.product_price.as_ref().and_then(price_from_json));

        Self {
            id: record.product_id,
            name: record.product_name,
            price,
            description: record.product_description,
            color: record.product_color,
        }
    }
}

impl Product {
    /// Create a product from validated fields.
    #[must_use]
    pub fn from_fields(id: ProductId, fields: &ProductFields) -> Self {
        Self {
            id,
            name: Some(fields.name.clone()),
            price: Some(fields.price),
            description: Some(fields.description.clone()),
            color: Some(fields.color.clone()),
        }
    }

    /// Name used for sorting; missing names sort as empty.
    #[must_use]
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Price used for sorting; missing prices sort as zero.
    #[must_use]
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Name for display, `N/A` when absent or blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        non_blank(self.name.as_deref()).unwrap_or("N/A")
    }

    /// Price for display with two decimals (e.g. `$19.99`).
    #[must_use]
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price_or_zero())
    }

    /// Description for display.
    #[must_use]
    pub fn display_description(&self) -> &str {
        non_blank(self.description.as_deref()).unwrap_or("No description")
    }

    /// Color for display.
    #[must_use]
    pub fn display_color(&self) -> &str {
        non_blank(self.color.as_deref()).unwrap_or("N/A")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Validated product fields, ready to send to the backend.
///
/// Produced by form validation: the name is trimmed and non-empty, the price
/// is finite and non-negative, description and color are trimmed (possibly
/// empty).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Description, empty when not provided.
    pub description: String,
    /// Color, empty when not provided.
    pub color: String,
}
