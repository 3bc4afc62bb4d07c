//! Domain-level error types.

use thiserror::Error;

/// Domain errors - what a caller of the post service can observe.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] RepoError),
}

impl DomainError {
    /// Not-found error for a post id.
    pub fn post_not_found(id: i32) -> Self {
        Self::NotFound {
            entity_type: "Post",
            id,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
