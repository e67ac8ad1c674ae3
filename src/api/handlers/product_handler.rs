//! Product handlers.
//!
//! Catalog reads are public; mutations sit behind the authentication
//! and admin gates layered in `routes.rs`. The list endpoint accepts
//! the storefront's loose filter map as query parameters and narrows
//! the fetched set with it.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, require_admin_middleware};
use crate::api::AppState;
use crate::domain::{apply_client_filters, NewProduct, ProductChanges, ProductWithCategory};
use crate::errors::AppResult;
use crate::types::Created;

/// Query key selecting the server-side category-name match
const QUERY_CATEGORY_NAME: &str = "category_name";

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("price").with_message("Price must be non-negative".into()));
    }
    Ok(())
}

/// Product creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    /// Product display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Mouse X")]
    pub name: String,
    /// Product description
    #[schema(example = "Mouse óptico com 6 botões")]
    pub description: String,
    /// Unit price, non-negative
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "149.90")]
    pub price: Decimal,
    /// Units in stock, non-negative
    #[validate(range(min = 0, message = "Stock must be non-negative"))]
    #[schema(example = 10)]
    pub stock: i32,
    /// Owning category id
    pub category_id: Uuid,
}

/// Product update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New price, non-negative
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    /// New stock count, non-negative
    #[validate(range(min = 0, message = "Stock must be non-negative"))]
    pub stock: Option<i32>,
    /// New owning category id
    pub category_id: Option<Uuid>,
}

/// Create product routes
pub fn product_routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_product))
        .route("/:id", put(update_product).delete(delete_product))
        .route_layer(axum::middleware::from_fn(require_admin_middleware))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/", get(list_products))
        .route("/category/:id", get(list_by_category))
        .route("/:id", get(get_product))
        .merge(admin)
}

/// Create a new product (admin only)
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductWithCategory),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Store error, e.g. unknown category id")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<Created<ProductWithCategory>> {
    let product = state
        .product_service
        .create_product(NewProduct {
            name: payload.name,
            description: payload.description,
            price: payload.price,
            stock: payload.stock,
            category_id: payload.category_id,
        })
        .await?;

    Ok(Created(product))
}

/// List products with their categories.
///
/// `category_name` narrows server-side with a case-insensitive
/// substring match; `search`, `max_price` and `free_shipping` narrow
/// the fetched set client-filter style. Unknown parameters are ignored.
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(
        ("category_name" = Option<String>, Query, description = "Case-insensitive substring match on the category name"),
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on the product name"),
        ("max_price" = Option<String>, Query, description = "Inclusive price ceiling, applied when positive"),
        ("free_shipping" = Option<bool>, Query, description = "When true, only free-shipping products")
    ),
    responses(
        (status = 200, description = "List of products", body = Vec<ProductWithCategory>)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<ProductWithCategory>>> {
    let products = match params.get(QUERY_CATEGORY_NAME) {
        Some(fragment) => state.product_service.list_by_category_name(fragment).await?,
        None => state.product_service.list_products().await?,
    };

    Ok(Json(apply_client_filters(products, &params)))
}

/// List products belonging to a category
#[utoipa::path(
    get,
    path = "/products/category/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Products in the category", body = Vec<ProductWithCategory>)
    )
)]
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<ProductWithCategory>>> {
    let products = state.product_service.list_by_category(id).await?;

    Ok(Json(products))
}

/// Get product by ID with its category
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product with its category", body = ProductWithCategory),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProductWithCategory>> {
    let product = state.product_service.get_product(id).await?;

    Ok(Json(product))
}

/// Update product (admin only)
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductWithCategory),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<Json<ProductWithCategory>> {
    let product = state
        .product_service
        .update_product(
            id,
            ProductChanges {
                name: payload.name,
                description: payload.description,
                price: payload.price,
                stock: payload.stock,
                category_id: payload.category_id,
            },
        )
        .await?;

    Ok(Json(product))
}

/// Delete product (admin only)
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted, returns the deleted record", body = ProductWithCategory),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProductWithCategory>> {
    let product = state.product_service.remove_product(id).await?;

    Ok(Json(product))
}
