//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;
use crate::gemini::GeminiClient;
use crate::services::LeadFeed;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    gemini: GeminiClient,
    lead_feed: LeadFeed,
    shutdown: CancellationToken,
}

impl AppState {
    /// Build the application state.
    ///
    /// The shutdown token is threaded into long-running operations (the
    /// video poll) so they stop when the server drains.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool, shutdown: CancellationToken) -> Self {
        let gemini = GeminiClient::new(config.gemini());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                gemini,
                lead_feed: LeadFeed::new(),
                shutdown,
            }),
        }
    }

    /// Server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Gemini API client.
    #[must_use]
    pub fn gemini(&self) -> &GeminiClient {
        &self.inner.gemini
    }

    /// Live lead feed.
    #[must_use]
    pub fn lead_feed(&self) -> &LeadFeed {
        &self.inner.lead_feed
    }

    /// Server-wide shutdown token.
    #[must_use]
    pub fn shutdown(&self) -> &CancellationToken {
        &self.inner.shutdown
    }
}
