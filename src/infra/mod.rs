//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and schema migrations
//! - Repositories over the three catalog aggregates

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{
    CategoryRepository, CategoryStore, ProductRepository, ProductStore, UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockCategoryRepository, MockProductRepository, MockUserRepository};
