//! Post storage: SeaORM-backed repository and an in-memory fallback.

mod connections;
mod memory;

#[cfg(feature = "database")]
pub mod entity;
#[cfg(feature = "database")]
mod schema;
#[cfg(feature = "database")]
mod sql_repo;

pub use connections::DatabaseConfig;
pub use memory::InMemoryPostRepository;

#[cfg(feature = "database")]
pub use connections::connect;
#[cfg(feature = "database")]
pub use schema::create_schema;
#[cfg(feature = "database")]
pub use sql_repo::SqlPostRepository;

#[cfg(test)]
mod tests;
