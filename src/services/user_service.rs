//! User service - user administration use cases.
//!
//! Every projection leaving this service goes through `UserResponse`
//! at the API boundary; credential fields never travel further.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{User, UserRole};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// List users with exactly the given role
    async fn list_users_by_role(&self, role: UserRole) -> AppResult<Vec<User>>;

    /// Update user details
    async fn update_user(
        &self,
        id: Uuid,
        name: Option<String>,
        role: Option<UserRole>,
    ) -> AppResult<User>;

    /// Delete user, returning the deleted record
    async fn delete_user(&self, id: Uuid) -> AppResult<User>;
}

/// Concrete implementation of UserService
pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or_not_found("User")
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }

    async fn list_users_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        self.users.list_by_role(role).await
    }

    async fn update_user(
        &self,
        id: Uuid,
        name: Option<String>,
        role: Option<UserRole>,
    ) -> AppResult<User> {
        self.users.update(id, name, role).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<User> {
        self.users.delete(id).await
    }
}
