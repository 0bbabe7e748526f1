//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use bloodbank::outbound::persistence::DbPool;
use bloodbank::outbound::security::TokenSigningKey;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) signing_key: TokenSigningKey,
    pub(crate) token_ttl: chrono::Duration,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_inventory: bool,
}

impl ServerConfig {
    /// In-memory storage and inventory seeding until told otherwise.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        signing_key: TokenSigningKey,
        token_ttl: chrono::Duration,
    ) -> Self {
        Self {
            bind_addr,
            signing_key,
            token_ttl,
            db_pool: None,
            seed_inventory: true,
        }
    }

    /// Attach a database connection pool; the Diesel adapters replace the
    /// in-memory ones.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_seed_inventory(mut self, seed_inventory: bool) -> Self {
        self.seed_inventory = seed_inventory;
        self
    }
}
