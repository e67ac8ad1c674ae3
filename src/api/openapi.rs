//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, category_handler, product_handler, user_handler};
use crate::domain::{Category, CategoryWithProducts, Product, ProductWithCategory, UserResponse, UserRole};
use crate::services::TokenResponse;

/// OpenAPI documentation for the Storefront API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "E-commerce storefront API: catalog querying with role-gated administration",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // User endpoints
        user_handler::get_current_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        // Category endpoints
        category_handler::create_category,
        category_handler::list_categories,
        category_handler::get_category,
        category_handler::update_category,
        category_handler::delete_category,
        // Product endpoints
        product_handler::create_product,
        product_handler::list_products,
        product_handler::list_by_category,
        product_handler::get_product,
        product_handler::update_product,
        product_handler::delete_product,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            Category,
            CategoryWithProducts,
            Product,
            ProductWithCategory,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            // Handler request types
            user_handler::UpdateUserRequest,
            category_handler::CreateCategoryRequest,
            category_handler::UpdateCategoryRequest,
            product_handler::CreateProductRequest,
            product_handler::UpdateProductRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Users", description = "User administration"),
        (name = "Categories", description = "Category catalog and administration"),
        (name = "Products", description = "Product catalog and administration")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
