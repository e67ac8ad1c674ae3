//! Category service - category administration use cases.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Category, CategoryWithProducts};
use crate::errors::{AppResult, OptionExt};
use crate::infra::CategoryRepository;

/// Category service trait for dependency injection.
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// Create a category; an omitted description is persisted as ""
    async fn create_category(
        &self,
        name: String,
        description: Option<String>,
    ) -> AppResult<Category>;

    /// Get category by ID with its products
    async fn get_category(&self, id: Uuid) -> AppResult<CategoryWithProducts>;

    /// List all categories, each with its products
    async fn list_categories(&self) -> AppResult<Vec<CategoryWithProducts>>;

    /// Update category fields
    async fn update_category(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<Category>;

    /// Delete category, returning the deleted record
    async fn remove_category(&self, id: Uuid) -> AppResult<Category>;
}

/// Concrete implementation of CategoryService
pub struct CategoryManager {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryManager {
    /// Create new category service instance
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl CategoryService for CategoryManager {
    async fn create_category(
        &self,
        name: String,
        description: Option<String>,
    ) -> AppResult<Category> {
        // The empty-string default is part of the create contract, not
        // left to call-site coalescing
        let description = description.unwrap_or_default();
        self.categories.create(name, description).await
    }

    async fn get_category(&self, id: Uuid) -> AppResult<CategoryWithProducts> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_not_found("Category")
    }

    async fn list_categories(&self) -> AppResult<Vec<CategoryWithProducts>> {
        self.categories.list().await
    }

    async fn update_category(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<Category> {
        self.categories.update(id, name, description).await
    }

    async fn remove_category(&self, id: Uuid) -> AppResult<Category> {
        self.categories.delete(id).await
    }
}
