//! Category domain entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::product::Product;

/// Category domain entity
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    /// Category display name
    #[schema(example = "Periféricos")]
    pub name: String,
    /// Free-text description; empty when none was supplied at creation
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category together with its products.
///
/// Category reads always carry the owned products; callers never have
/// to ask for them separately.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryWithProducts {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<Product>,
}
