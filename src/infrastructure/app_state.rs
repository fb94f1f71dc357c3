use std::sync::Arc;

use sqlx::SqlitePool;

use crate::infrastructure::auth::{JwtService, ServiceTokenValidator};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::database::{self, repositories::SqlitePartyRepository};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// JWT service for player tokens
    pub jwt_service: Arc<JwtService>,

    /// Shared-secret check for internal callers
    pub service_tokens: Arc<ServiceTokenValidator>,

    /// Party repository
    pub party_repo: Arc<SqlitePartyRepository>,
}

impl AppState {
    /// Connect, migrate and wire services from `config`
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        tracing::info!("Connecting to database: {}", config.database_url);

        let db = database::connect(&config.database_url).await?;
        database::migrate(&db).await?;

        Ok(Self::from_pool(db, config))
    }

    /// Wire services around an already-migrated pool
    pub fn from_pool(db: SqlitePool, config: &AppConfig) -> Self {
        let jwt_service = Arc::new(JwtService::new(&config.jwt_secret));
        let service_tokens = Arc::new(ServiceTokenValidator::new(&config.service_token));
        let party_repo = Arc::new(SqlitePartyRepository::new(db.clone()));

        Self {
            db,
            jwt_service,
            service_tokens,
            party_repo,
        }
    }
}
