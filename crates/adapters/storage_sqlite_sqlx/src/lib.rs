//! # munihub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `munihub-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `munihub-app` (for port traits) and `munihub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod codec;
pub mod error;
pub mod pool;
pub mod repositories;

pub mod assignment_repo;
pub mod cemetery_repo;
pub mod deceased_repo;
pub mod facility_repo;
pub mod permit_repo;
pub mod plot_repo;
pub mod reservation_repo;
pub mod service_request_repo;

#[cfg(test)]
mod fixtures;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use repositories::SqliteRepositories;
