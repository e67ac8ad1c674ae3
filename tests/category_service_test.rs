//! Category service tests against an in-memory repository.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use storefront_api::domain::{Category, CategoryWithProducts};
use storefront_api::errors::{AppError, AppResult};
use storefront_api::infra::CategoryRepository;
use storefront_api::services::{CategoryManager, CategoryService};

/// In-memory stand-in honoring the store contract: existence check
/// first, NotFound before any write.
#[derive(Default)]
struct InMemoryCategories {
    rows: Mutex<HashMap<Uuid, Category>>,
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CategoryWithProducts>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.get(&id).cloned().map(|category| CategoryWithProducts {
            category,
            products: vec![],
        }))
    }

    async fn list(&self) -> AppResult<Vec<CategoryWithProducts>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .cloned()
            .map(|category| CategoryWithProducts {
                category,
                products: vec![],
            })
            .collect())
    }

    async fn create(&self, name: String, description: String) -> AppResult<Category> {
        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name,
            description,
            created_at: now,
            updated_at: now,
        };
        self.rows
            .lock()
            .unwrap()
            .insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<Category> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.get_mut(&id).ok_or(AppError::NotFound("Category"))?;
        if let Some(name) = name {
            row.name = name;
        }
        if let Some(description) = description {
            row.description = description;
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<Category> {
        self.rows
            .lock()
            .unwrap()
            .remove(&id)
            .ok_or(AppError::NotFound("Category"))
    }
}

fn service() -> CategoryManager {
    CategoryManager::new(Arc::new(InMemoryCategories::default()))
}

#[tokio::test]
async fn create_defaults_description_to_empty_string() {
    let service = service();

    let category = service
        .create_category("Periféricos".to_string(), None)
        .await
        .unwrap();

    assert_eq!(category.description, "");
}

#[tokio::test]
async fn create_keeps_supplied_description() {
    let service = service();

    let category = service
        .create_category(
            "Periféricos".to_string(),
            Some("Mouses e teclados".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(category.description, "Mouses e teclados");
}

#[tokio::test]
async fn get_missing_category_is_not_found() {
    let service = service();

    let err = service.get_category(Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound("Category")));
    assert_eq!(err.to_string(), "Category not found");
}

#[tokio::test]
async fn get_is_idempotent() {
    let service = service();
    let created = service
        .create_category("Gamer".to_string(), None)
        .await
        .unwrap();

    let first = service.get_category(created.id).await.unwrap();
    let second = service.get_category(created.id).await.unwrap();

    assert_eq!(first.category, second.category);
    assert_eq!(first.products.len(), second.products.len());
}

#[tokio::test]
async fn update_missing_category_fails_without_partial_write() {
    let repo = Arc::new(InMemoryCategories::default());
    let service = CategoryManager::new(repo.clone());

    let err = service
        .update_category(Uuid::new_v4(), Some("Renamed".to_string()), None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound("Category")));
    assert!(repo.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn update_applies_partial_field_merge() {
    let service = service();
    let created = service
        .create_category("Gamer".to_string(), Some("old".to_string()))
        .await
        .unwrap();

    let updated = service
        .update_category(created.id, None, Some("new".to_string()))
        .await
        .unwrap();

    // Untouched fields survive the merge
    assert_eq!(updated.name, "Gamer");
    assert_eq!(updated.description, "new");
}

#[tokio::test]
async fn remove_returns_deleted_record_then_not_found() {
    let service = service();
    let created = service
        .create_category("Gamer".to_string(), None)
        .await
        .unwrap();

    let deleted = service.remove_category(created.id).await.unwrap();
    assert_eq!(deleted.id, created.id);

    let err = service.remove_category(created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("Category")));
}
