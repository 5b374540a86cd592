// Service exports
pub mod auth;
pub mod cache;
pub mod images;
pub mod postgres;

pub use auth::{AuthError, AuthService, Claims};
pub use cache::{CacheError, CacheKey, CatalogCache};
pub use images::{ImageError, ImageStore};
pub use postgres::{PostgresStore, StoreError};
