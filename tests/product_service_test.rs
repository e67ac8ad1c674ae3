//! Product service and catalog query engine tests against an
//! in-memory repository that honors the store contract, including the
//! case-insensitive category-name match.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::DbErr;
use uuid::Uuid;

use storefront_api::domain::{
    Category, NewProduct, Product, ProductChanges, ProductWithCategory,
};
use storefront_api::errors::{AppError, AppResult};
use storefront_api::infra::ProductRepository;
use storefront_api::services::{ProductManager, ProductService};

struct InMemoryProducts {
    categories: Vec<Category>,
    rows: Mutex<Vec<ProductWithCategory>>,
    writes: AtomicUsize,
}

impl InMemoryProducts {
    fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            rows: Mutex::new(Vec::new()),
            writes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProductWithCategory>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|item| item.product.id == id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<ProductWithCategory>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn list_by_category(&self, category_id: Uuid) -> AppResult<Vec<ProductWithCategory>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|item| item.product.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn list_by_category_name(&self, fragment: &str) -> AppResult<Vec<ProductWithCategory>> {
        // Same semantics as ILIKE '%fragment%'
        let needle = fragment.to_lowercase();
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|item| item.category.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn create(&self, input: NewProduct) -> AppResult<ProductWithCategory> {
        let category = self
            .categories
            .iter()
            .find(|category| category.id == input.category_id)
            .cloned()
            // The real store rejects a dangling FK at insert time
            .ok_or_else(|| {
                AppError::Database(DbErr::Custom(
                    "violates foreign key constraint \"fk_products_category_id\"".to_string(),
                ))
            })?;

        let now = Utc::now();
        let item = ProductWithCategory {
            product: Product {
                id: Uuid::new_v4(),
                name: input.name,
                description: input.description,
                price: input.price,
                stock: input.stock,
                category_id: category.id,
                created_at: now,
                updated_at: now,
                free_shipping: Product::qualifies_free_shipping(input.price),
            },
            category,
        };
        self.rows.lock().unwrap().push(item.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(item)
    }

    async fn update(&self, id: Uuid, changes: ProductChanges) -> AppResult<ProductWithCategory> {
        let mut rows = self.rows.lock().unwrap();
        let item = rows
            .iter_mut()
            .find(|item| item.product.id == id)
            .ok_or(AppError::NotFound("Product"))?;

        if let Some(name) = changes.name {
            item.product.name = name;
        }
        if let Some(description) = changes.description {
            item.product.description = description;
        }
        if let Some(price) = changes.price {
            item.product.price = price;
            item.product.free_shipping = Product::qualifies_free_shipping(price);
        }
        if let Some(stock) = changes.stock {
            item.product.stock = stock;
        }
        item.product.updated_at = Utc::now();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(item.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<ProductWithCategory> {
        let mut rows = self.rows.lock().unwrap();
        let position = rows
            .iter()
            .position(|item| item.product.id == id)
            .ok_or(AppError::NotFound("Product"))?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(rows.remove(position))
    }
}

fn category(name: &str) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: String::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn new_product(name: &str, price: &str, category_id: Uuid) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: String::new(),
        price: price.parse().unwrap(),
        stock: 10,
        category_id,
    }
}

/// Repo seeded with a gamer and a peripherals category plus one product each
async fn seeded() -> (Arc<InMemoryProducts>, ProductManager, Category, Category) {
    let gamer = category("Gamer");
    let peripherals = category("Periféricos");
    let repo = Arc::new(InMemoryProducts::new(vec![gamer.clone(), peripherals.clone()]));
    let service = ProductManager::new(repo.clone());

    service
        .create_product(new_product("Cadeira Z", "899.90", gamer.id))
        .await
        .unwrap();
    service
        .create_product(new_product("Mouse X", "150", peripherals.id))
        .await
        .unwrap();

    (repo, service, gamer, peripherals)
}

fn names(items: &[ProductWithCategory]) -> Vec<&str> {
    items.iter().map(|item| item.product.name.as_str()).collect()
}

#[tokio::test]
async fn list_by_category_returns_exactly_the_members() {
    let (_, service, gamer, peripherals) = seeded().await;

    let gamer_products = service.list_by_category(gamer.id).await.unwrap();
    assert_eq!(names(&gamer_products), vec!["Cadeira Z"]);
    assert_eq!(gamer_products[0].category.id, gamer.id);

    let peripheral_products = service.list_by_category(peripherals.id).await.unwrap();
    assert_eq!(names(&peripheral_products), vec!["Mouse X"]);
}

#[tokio::test]
async fn list_by_unknown_category_is_empty_not_an_error() {
    let (_, service, _, _) = seeded().await;

    let result = service.list_by_category(Uuid::new_v4()).await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn category_name_match_ignores_letter_case() {
    let (_, service, _, _) = seeded().await;

    let lower = service.list_by_category_name("gamer").await.unwrap();
    let upper = service.list_by_category_name("GAMER").await.unwrap();
    let mixed = service.list_by_category_name("Gamer").await.unwrap();

    assert_eq!(names(&lower), vec!["Cadeira Z"]);
    assert_eq!(names(&lower), names(&upper));
    assert_eq!(names(&lower), names(&mixed));
}

#[tokio::test]
async fn empty_fragment_matches_every_product() {
    let (_, service, _, _) = seeded().await;

    let result = service.list_by_category_name("").await.unwrap();

    assert_eq!(result.len(), 2);
}

#[tokio::test]
async fn mixed_case_accented_fragment_finds_category_with_product_attached() {
    let (_, service, _, peripherals) = seeded().await;

    let result = service.list_by_category_name("periFÉRICOS").await.unwrap();

    assert_eq!(names(&result), vec!["Mouse X"]);
    assert_eq!(result[0].category.id, peripherals.id);
    assert_eq!(result[0].category.name, "Periféricos");
}

#[tokio::test]
async fn create_with_unknown_category_surfaces_store_failure_and_persists_nothing() {
    let (repo, service, _, _) = seeded().await;
    let before = repo.rows.lock().unwrap().len();

    let err = service
        .create_product(new_product("Orphan", "10", Uuid::new_v4()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Database(_)));
    assert_eq!(repo.rows.lock().unwrap().len(), before);
}

#[tokio::test]
async fn negative_price_is_rejected_before_the_store() {
    let gamer = category("Gamer");
    let repo = Arc::new(InMemoryProducts::new(vec![gamer.clone()]));
    let service = ProductManager::new(repo.clone());

    let mut input = new_product("Mouse X", "150", gamer.id);
    input.price = Decimal::from(-1);
    let err = service.create_product(input).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(repo.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn negative_stock_is_rejected_before_the_store() {
    let gamer = category("Gamer");
    let repo = Arc::new(InMemoryProducts::new(vec![gamer.clone()]));
    let service = ProductManager::new(repo.clone());

    let mut input = new_product("Mouse X", "150", gamer.id);
    input.stock = -3;
    let err = service.create_product(input).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(repo.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn update_missing_product_fails_without_partial_write() {
    let (repo, service, _, _) = seeded().await;
    let writes_before = repo.writes.load(Ordering::SeqCst);

    let err = service
        .update_product(
            Uuid::new_v4(),
            ProductChanges {
                name: Some("Renamed".to_string()),
                ..ProductChanges::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound("Product")));
    assert_eq!(err.to_string(), "Product not found");
    assert_eq!(repo.writes.load(Ordering::SeqCst), writes_before);
}

#[tokio::test]
async fn get_is_idempotent_and_carries_the_category() {
    let (_, service, _, peripherals) = seeded().await;
    let id = service.list_by_category(peripherals.id).await.unwrap()[0]
        .product
        .id;

    let first = service.get_product(id).await.unwrap();
    let second = service.get_product(id).await.unwrap();

    assert_eq!(first.product, second.product);
    assert_eq!(first.category.name, "Periféricos");
}

#[tokio::test]
async fn remove_returns_deleted_record_then_not_found() {
    let (_, service, gamer, _) = seeded().await;
    let id = service.list_by_category(gamer.id).await.unwrap()[0].product.id;

    let deleted = service.remove_product(id).await.unwrap();
    assert_eq!(deleted.product.id, id);

    let err = service.remove_product(id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("Product")));
}
