//! Application state - shared across all handlers.

use std::sync::Arc;

use postboard_core::PostService;
use postboard_core::ports::PostRepository;
use postboard_infra::database::{DatabaseConfig, InMemoryPostRepository};

#[cfg(any(feature = "sqlite", feature = "postgres"))]
use postboard_infra::database::{SqlPostRepository, connect};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    /// Storage backend name, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// State over an explicit repository.
    pub fn with_repository(repo: Arc<dyn PostRepository>, storage: &'static str) -> Self {
        Self {
            posts: PostService::new(repo),
            storage,
        }
    }

    /// State over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()), "memory")
    }

    /// Build the application state, falling back to memory if the database
    /// is not configured or cannot be reached.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory();
        };

        #[cfg(any(feature = "sqlite", feature = "postgres"))]
        let state = match connect(config).await {
            Ok(db) => {
                let storage = backend_name(&config.url);
                Self::with_repository(Arc::new(SqlPostRepository::new(db)), storage)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::in_memory()
            }
        };

        #[cfg(not(any(feature = "sqlite", feature = "postgres")))]
        let state = {
            tracing::warn!(
                url = %config.url,
                "Built without database drivers - using in-memory repository"
            );
            Self::in_memory()
        };

        tracing::info!(storage = state.storage, "Application state initialized");
        state
    }
}

#[cfg(any(feature = "sqlite", feature = "postgres"))]
fn backend_name(url: &str) -> &'static str {
    if url.starts_with("sqlite:") {
        "sqlite"
    } else {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn missing_database_config_uses_memory() {
        let state = AppState::new(None).await;
        assert_eq!(state.storage, "memory");
    }

    #[cfg(feature = "sqlite")]
    #[actix_rt::test]
    async fn sqlite_config_uses_sql_repository() {
        let mut config = DatabaseConfig::new("sqlite::memory:");
        config.create_schema = true;

        let state = AppState::new(Some(&config)).await;
        assert_eq!(state.storage, "sqlite");
        assert!(state.posts.list(&Default::default()).await.unwrap().items.is_empty());
    }
}
