//! Product service - product administration and catalog querying.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{NewProduct, ProductChanges, ProductWithCategory};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::ProductRepository;

/// Product service trait for dependency injection.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Create a product
    async fn create_product(&self, input: NewProduct) -> AppResult<ProductWithCategory>;

    /// Get product by ID with its category
    async fn get_product(&self, id: Uuid) -> AppResult<ProductWithCategory>;

    /// List all products, each with its category
    async fn list_products(&self) -> AppResult<Vec<ProductWithCategory>>;

    /// List products belonging to the given category
    async fn list_by_category(&self, category_id: Uuid) -> AppResult<Vec<ProductWithCategory>>;

    /// List products whose category name contains `fragment`, ignoring case
    async fn list_by_category_name(&self, fragment: &str)
        -> AppResult<Vec<ProductWithCategory>>;

    /// Update product fields
    async fn update_product(
        &self,
        id: Uuid,
        changes: ProductChanges,
    ) -> AppResult<ProductWithCategory>;

    /// Delete product, returning the deleted record
    async fn remove_product(&self, id: Uuid) -> AppResult<ProductWithCategory>;
}

/// Concrete implementation of ProductService
pub struct ProductManager {
    products: Arc<dyn ProductRepository>,
}

impl ProductManager {
    /// Create new product service instance
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }
}

// Field constraints are checked here, before the store is touched;
// the handlers' request validation reports friendlier messages first.
fn check_price(price: Decimal) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::validation("Price must be non-negative"));
    }
    Ok(())
}

fn check_stock(stock: i32) -> AppResult<()> {
    if stock < 0 {
        return Err(AppError::validation("Stock must be non-negative"));
    }
    Ok(())
}

#[async_trait]
impl ProductService for ProductManager {
    async fn create_product(&self, input: NewProduct) -> AppResult<ProductWithCategory> {
        check_price(input.price)?;
        check_stock(input.stock)?;

        self.products.create(input).await
    }

    async fn get_product(&self, id: Uuid) -> AppResult<ProductWithCategory> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_not_found("Product")
    }

    async fn list_products(&self) -> AppResult<Vec<ProductWithCategory>> {
        self.products.list().await
    }

    async fn list_by_category(&self, category_id: Uuid) -> AppResult<Vec<ProductWithCategory>> {
        self.products.list_by_category(category_id).await
    }

    async fn list_by_category_name(
        &self,
        fragment: &str,
    ) -> AppResult<Vec<ProductWithCategory>> {
        self.products.list_by_category_name(fragment).await
    }

    async fn update_product(
        &self,
        id: Uuid,
        changes: ProductChanges,
    ) -> AppResult<ProductWithCategory> {
        if let Some(price) = changes.price {
            check_price(price)?;
        }
        if let Some(stock) = changes.stock {
            check_stock(stock)?;
        }

        self.products.update(id, changes).await
    }

    async fn remove_product(&self, id: Uuid) -> AppResult<ProductWithCategory> {
        self.products.delete(id).await
    }
}
