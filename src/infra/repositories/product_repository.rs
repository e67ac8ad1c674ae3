//! Product repository implementation.
//!
//! The catalog query engine lives here: listing, FK filtering, and the
//! case-insensitive category-name match. Every read joins the owning
//! category, per the catalog's fixed eager-load contract.

use async_trait::async_trait;
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::{category, product};
use crate::domain::{Category, NewProduct, Product, ProductChanges, ProductWithCategory};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find product by ID with its category
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProductWithCategory>>;

    /// List all products, each with its category, in store order
    async fn list(&self) -> AppResult<Vec<ProductWithCategory>>;

    /// List products belonging to the given category
    async fn list_by_category(&self, category_id: Uuid) -> AppResult<Vec<ProductWithCategory>>;

    /// List products whose category name contains `fragment`, ignoring
    /// letter case. An empty fragment matches every product.
    async fn list_by_category_name(&self, fragment: &str) -> AppResult<Vec<ProductWithCategory>>;

    /// Create a new product.
    ///
    /// A dangling category id is caught by the store's FK constraint and
    /// surfaces as a database error; it is not re-validated here.
    async fn create(&self, input: NewProduct) -> AppResult<ProductWithCategory>;

    /// Update product fields; fails with NotFound before any write when the id is absent
    async fn update(&self, id: Uuid, changes: ProductChanges) -> AppResult<ProductWithCategory>;

    /// Delete product by ID, returning the deleted row with its category
    async fn delete(&self, id: Uuid) -> AppResult<ProductWithCategory>;
}

/// Concrete implementation of ProductRepository over SeaORM
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_category(&self, category_id: Uuid) -> AppResult<Category> {
        let category = category::Entity::find_by_id(category_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| {
                AppError::internal(format!("category {} missing for product row", category_id))
            })?;

        Ok(Category::from(category))
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProductWithCategory>> {
        let result = product::Entity::find_by_id(id)
            .find_also_related(category::Entity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(into_with_category).transpose()
    }

    async fn list(&self) -> AppResult<Vec<ProductWithCategory>> {
        let rows = product::Entity::find()
            .find_also_related(category::Entity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        rows.into_iter().map(into_with_category).collect()
    }

    async fn list_by_category(&self, category_id: Uuid) -> AppResult<Vec<ProductWithCategory>> {
        let rows = product::Entity::find()
            .filter(product::Column::CategoryId.eq(category_id))
            .find_also_related(category::Entity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        rows.into_iter().map(into_with_category).collect()
    }

    async fn list_by_category_name(&self, fragment: &str) -> AppResult<Vec<ProductWithCategory>> {
        // ILIKE '%%' is universally true, so the empty fragment matches all
        let pattern = format!("%{}%", fragment);

        let rows = product::Entity::find()
            .find_also_related(category::Entity)
            .filter(Expr::col((category::Entity, category::Column::Name)).ilike(pattern))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        rows.into_iter().map(into_with_category).collect()
    }

    async fn create(&self, input: NewProduct) -> AppResult<ProductWithCategory> {
        let now = chrono::Utc::now();
        let active_model = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            stock: Set(input.stock),
            category_id: Set(input.category_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        let category = self.load_category(model.category_id).await?;

        Ok(ProductWithCategory {
            product: Product::from(model),
            category,
        })
    }

    async fn update(&self, id: Uuid, changes: ProductChanges) -> AppResult<ProductWithCategory> {
        // Existence check first so a missing id fails before any write
        let found = product::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound("Product"))?;

        let mut active: product::ActiveModel = found.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(stock) = changes.stock {
            active.stock = Set(stock);
        }
        if let Some(category_id) = changes.category_id {
            active.category_id = Set(category_id);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        let category = self.load_category(model.category_id).await?;

        Ok(ProductWithCategory {
            product: Product::from(model),
            category,
        })
    }

    async fn delete(&self, id: Uuid) -> AppResult<ProductWithCategory> {
        let found = product::Entity::find_by_id(id)
            .find_also_related(category::Entity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound("Product"))?;
        let deleted = into_with_category(found)?;

        product::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(deleted)
    }
}

fn into_with_category(
    (model, category): (product::Model, Option<category::Model>),
) -> AppResult<ProductWithCategory> {
    // The FK guarantees a category row; its absence is data corruption
    let category = category.ok_or_else(|| {
        AppError::internal(format!("product {} has no category row", model.id))
    })?;

    Ok(ProductWithCategory {
        product: Product::from(model),
        category: Category::from(category),
    })
}
