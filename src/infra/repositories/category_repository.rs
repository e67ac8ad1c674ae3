//! Category repository implementation.
//!
//! Every category read carries the owned products, per the catalog's
//! fixed eager-load contract.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use super::entities::{category, product};
use crate::domain::{Category, CategoryWithProducts, Product};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Category repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find category by ID with its products
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CategoryWithProducts>>;

    /// List all categories, each with its products
    async fn list(&self) -> AppResult<Vec<CategoryWithProducts>>;

    /// Create a new category
    async fn create(&self, name: String, description: String) -> AppResult<Category>;

    /// Update category fields; fails with NotFound before any write when the id is absent
    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<Category>;

    /// Delete category by ID, returning the deleted row.
    ///
    /// Referential policy belongs to the store: the FK on products is
    /// RESTRICT, so deleting a category that still owns products
    /// surfaces as a database error rather than being re-checked here.
    async fn delete(&self, id: Uuid) -> AppResult<Category>;
}

/// Concrete implementation of CategoryRepository over SeaORM
pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for CategoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CategoryWithProducts>> {
        let mut pairs = category::Entity::find_by_id(id)
            .find_with_related(product::Entity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(pairs.pop().map(into_with_products))
    }

    async fn list(&self) -> AppResult<Vec<CategoryWithProducts>> {
        let pairs = category::Entity::find()
            .find_with_related(product::Entity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(pairs.into_iter().map(into_with_products).collect())
    }

    async fn create(&self, name: String, description: String) -> AppResult<Category> {
        let now = chrono::Utc::now();
        let active_model = category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            description: Set(description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Category::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<Category> {
        // Existence check first so a missing id fails before any write
        let found = category::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound("Category"))?;

        let mut active: category::ActiveModel = found.into();

        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(description) = description {
            active.description = Set(description);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Category::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Category> {
        let found = category::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound("Category"))?;
        let deleted = Category::from(found);

        category::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(deleted)
    }
}

fn into_with_products(
    (model, products): (category::Model, Vec<product::Model>),
) -> CategoryWithProducts {
    CategoryWithProducts {
        category: Category::from(model),
        products: products.into_iter().map(Product::from).collect(),
    }
}
