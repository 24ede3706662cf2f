//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: process-local repositories for tests and database-less runs
//! - **crypto**: password hashing and access token minting
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod crypto;
pub mod memory;
pub mod persistence;
