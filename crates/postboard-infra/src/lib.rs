//! # Postboard Infrastructure
//!
//! Concrete implementations of the ports defined in `postboard-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - SQLite and PostgreSQL
//! - `minimal` - No database drivers, in-memory store only
//! - `sqlite` - SQLite support via SeaORM
//! - `postgres` - PostgreSQL support via SeaORM

pub mod database;

pub use database::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "database")]
pub use database::SqlPostRepository;
