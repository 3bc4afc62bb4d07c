#[cfg(feature = "database")]
use std::time::Duration;

#[cfg(feature = "database")]
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr};

/// Configuration for the posts database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Create the `posts` table at startup if it is missing.
    pub create_schema: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            create_schema: false,
        }
    }

    /// Whether the URL names a private in-memory SQLite database.
    ///
    /// Every connection to such a URL opens its own empty database, so the
    /// pool must hold exactly one.
    pub fn is_sqlite_memory(&self) -> bool {
        self.url.starts_with("sqlite:") && self.url.contains(":memory:")
    }

    /// Pool bounds after backend-specific adjustments.
    pub fn pool_bounds(&self) -> (u32, u32) {
        if self.is_sqlite_memory() {
            (1, 1)
        } else {
            let max = self.max_connections.max(1);
            (self.min_connections.min(max), max)
        }
    }
}

/// Open a connection pool for the configured database.
#[cfg(feature = "database")]
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    let (min_connections, max_connections) = config.pool_bounds();

    let mut opts = ConnectOptions::new(&config.url);
    opts.max_connections(max_connections)
        .min_connections(min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(true);
    if !config.is_sqlite_memory() {
        // An idle in-memory connection must never be reaped: its data goes with it.
        opts.idle_timeout(Duration::from_secs(300));
    }

    let db = Database::connect(opts).await?;
    tracing::info!(
        backend = ?db.get_database_backend(),
        pool = max_connections,
        "Database connected"
    );

    if config.create_schema {
        super::schema::create_schema(&db).await?;
    }

    Ok(db)
}
