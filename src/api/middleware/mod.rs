//! API middleware.

mod auth;

pub use auth::{auth_middleware, authorize, require_admin_middleware, CurrentUser};
