//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use quora_backend::domain::{SessionPolicy, SignupDetails};
use quora_backend::outbound::memory::InMemoryStore;
use quora_backend::outbound::persistence::DbPool;

/// Backing store for every repository port.
pub(crate) enum Storage {
    Memory(Arc<InMemoryStore>),
    Postgres(DbPool),
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: Storage,
    pub(crate) session_policy: SessionPolicy,
    pub(crate) admin: Option<SignupDetails>,
}

impl ServerConfig {
    /// Construct a configuration backed by the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            storage: Storage::Memory(Arc::new(InMemoryStore::new())),
            session_policy: SessionPolicy::default(),
            admin: None,
        }
    }

    /// Attach a database connection pool for the Diesel repositories.
    ///
    /// Without a pool every repository port is served by one shared
    /// in-memory store, and state is lost on restart.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.storage = Storage::Postgres(pool);
        self
    }

    /// Serve from an existing in-memory store.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Lets tests seed accounts before start-up")
    )]
    #[must_use]
    pub fn with_memory_store(mut self, store: Arc<InMemoryStore>) -> Self {
        self.storage = Storage::Memory(store);
        self
    }

    /// Override the session lifetime rules.
    #[must_use]
    pub fn with_session_policy(mut self, policy: SessionPolicy) -> Self {
        self.session_policy = policy;
        self
    }

    /// Create this administrator, if missing, before serving requests.
    #[must_use]
    pub fn with_admin(mut self, admin: Option<SignupDetails>) -> Self {
        self.admin = admin;
        self
    }

    /// Whether state survives a restart.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self.storage, Storage::Postgres(_))
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
