//! Product domain entity and catalog input types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::category::Category;
use crate::config::FREE_SHIPPING_MIN_PRICE;

/// Product domain entity
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    /// Product display name
    #[schema(example = "Mouse X")]
    pub name: String,
    pub description: String,
    /// Unit price
    #[schema(value_type = String, example = "149.90")]
    pub price: Decimal,
    /// Units in stock
    #[schema(example = 10)]
    pub stock: i32,
    /// Owning category
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Derived from price; not a stored column
    pub free_shipping: bool,
}

impl Product {
    /// Whether a price qualifies for the storefront's free-shipping offer
    pub fn qualifies_free_shipping(price: Decimal) -> bool {
        price >= Decimal::from(FREE_SHIPPING_MIN_PRICE)
    }
}

/// A product together with its owning category.
///
/// Product reads always carry the joined category; this pairing is the
/// unit the catalog query engine returns.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    pub category: Category,
}

/// Fields required to create a product
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Uuid,
}

/// Partial field merge applied by a product update
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub category_id: Option<Uuid>,
}
