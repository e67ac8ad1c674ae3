//! Client-side catalog filter tests.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use storefront_api::domain::{apply_client_filters, Category, Product, ProductWithCategory};

fn category(name: &str) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: String::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn product(name: &str, price: &str) -> ProductWithCategory {
    let price: Decimal = price.parse().unwrap();
    let category = category("Gamer");
    ProductWithCategory {
        product: Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            price,
            stock: 5,
            category_id: category.id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            free_shipping: Product::qualifies_free_shipping(price),
        },
        category,
    }
}

fn filters(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn names(items: &[ProductWithCategory]) -> Vec<&str> {
    items.iter().map(|item| item.product.name.as_str()).collect()
}

#[test]
fn zero_filters_is_identity() {
    let products = vec![product("Mouse X", "150"), product("Teclado Y", "300")];

    let result = apply_client_filters(products.clone(), &HashMap::new());

    assert_eq!(result.len(), products.len());
    assert_eq!(names(&result), names(&products));
}

#[test]
fn search_is_case_insensitive() {
    let products = vec![product("Mouse X", "150"), product("Teclado Y", "300")];

    let result = apply_client_filters(products, &filters(&[("search", "MOUSE")]));

    assert_eq!(names(&result), vec!["Mouse X"]);
}

#[test]
fn empty_search_matches_everything() {
    let products = vec![product("Mouse X", "150"), product("Teclado Y", "300")];

    let result = apply_client_filters(products, &filters(&[("search", "")]));

    assert_eq!(result.len(), 2);
}

#[test]
fn max_price_is_an_inclusive_ceiling() {
    let products = vec![product("Mouse X", "150"), product("Teclado Y", "300")];

    let at_price = apply_client_filters(products.clone(), &filters(&[("max_price", "150")]));
    assert_eq!(names(&at_price), vec!["Mouse X"]);

    let below_price = apply_client_filters(products, &filters(&[("max_price", "149.99")]));
    assert!(below_price.is_empty());
}

#[test]
fn max_price_applies_only_when_positive() {
    let products = vec![product("Mouse X", "150"), product("Teclado Y", "300")];

    for ceiling in ["0", "-5", "not-a-number"] {
        let result = apply_client_filters(products.clone(), &filters(&[("max_price", ceiling)]));
        assert_eq!(result.len(), 2, "ceiling {:?} should be ignored", ceiling);
    }
}

#[test]
fn free_shipping_keeps_only_qualifying_products() {
    // Threshold is 250: the 300 keyboard qualifies, the 150 mouse does not
    let products = vec![product("Mouse X", "150"), product("Teclado Y", "300")];

    let result = apply_client_filters(products, &filters(&[("free_shipping", "true")]));

    assert_eq!(names(&result), vec!["Teclado Y"]);
}

#[test]
fn free_shipping_false_leaves_the_set_alone() {
    let products = vec![product("Mouse X", "150"), product("Teclado Y", "300")];

    let result = apply_client_filters(products, &filters(&[("free_shipping", "false")]));

    assert_eq!(result.len(), 2);
}

#[test]
fn free_shipping_threshold_is_inclusive() {
    assert!(Product::qualifies_free_shipping("250".parse().unwrap()));
    assert!(!Product::qualifies_free_shipping("249.99".parse().unwrap()));
}

#[test]
fn unrecognized_keys_are_ignored() {
    let products = vec![product("Mouse X", "150"), product("Teclado Y", "300")];

    let result = apply_client_filters(
        products,
        &filters(&[("sort", "price"), ("page", "3"), ("category_name", "gamer")]),
    );

    assert_eq!(result.len(), 2);
}

#[test]
fn filters_combine_with_logical_and() {
    let products = vec![
        product("Mouse X", "150"),
        product("Mouse Pro", "400"),
        product("Teclado Y", "300"),
    ];

    let result = apply_client_filters(
        products,
        &filters(&[("search", "mouse"), ("free_shipping", "true")]),
    );

    // Only the product matching both the search and the shipping filter survives
    assert_eq!(names(&result), vec!["Mouse Pro"]);
}
