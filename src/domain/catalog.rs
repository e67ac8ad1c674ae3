//! Client-side catalog narrowing.
//!
//! The storefront sends its filter selections as a loose key/value map;
//! this module narrows an already-fetched product set accordingly.
//! Filters combine with logical AND, keys outside the known set are
//! ignored, and an empty map leaves the input untouched.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::product::ProductWithCategory;

/// Case-insensitive substring match on the product name
pub const FILTER_SEARCH: &str = "search";

/// Inclusive price ceiling; applied only when the value is a positive number
pub const FILTER_MAX_PRICE: &str = "max_price";

/// When true, keeps only products that ship for free
pub const FILTER_FREE_SHIPPING: &str = "free_shipping";

/// Narrow `products` by the recognized entries of `filters`.
pub fn apply_client_filters(
    products: Vec<ProductWithCategory>,
    filters: &HashMap<String, String>,
) -> Vec<ProductWithCategory> {
    let mut result = products;

    for (key, value) in filters {
        result = match key.as_str() {
            FILTER_SEARCH => {
                let needle = value.to_lowercase();
                result
                    .into_iter()
                    .filter(|item| item.product.name.to_lowercase().contains(&needle))
                    .collect()
            }
            FILTER_MAX_PRICE => match value.parse::<Decimal>() {
                Ok(ceiling) if ceiling > Decimal::ZERO => result
                    .into_iter()
                    .filter(|item| item.product.price <= ceiling)
                    .collect(),
                // Non-numeric or non-positive ceilings leave the set alone
                _ => result,
            },
            FILTER_FREE_SHIPPING => {
                if value.parse::<bool>().unwrap_or(false) {
                    result
                        .into_iter()
                        .filter(|item| item.product.free_shipping)
                        .collect()
                } else {
                    result
                }
            }
            // Unrecognized filter keys are ignored, not errors
            _ => result,
        };
    }

    result
}
