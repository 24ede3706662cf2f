//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` connection pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Ownership and session rules live in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: Diesel and pool failures map onto each port's
//!   `connection`/`query` error variants.
//!
//! # Example
//!
//! ```ignore
//! use quora_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/quora")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_answer_repository;
mod diesel_error_mapping;
mod diesel_question_repository;
mod diesel_session_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_answer_repository::DieselAnswerRepository;
pub use diesel_question_repository::DieselQuestionRepository;
pub use diesel_session_repository::DieselSessionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{
    DEFAULT_CHECKOUT_TIMEOUT, DEFAULT_MAX_CONNECTIONS, DEFAULT_MIN_IDLE, DbPool, PoolConfig,
    PoolError,
};
