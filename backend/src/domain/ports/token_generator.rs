//! Port for minting opaque access tokens.

use crate::domain::AccessToken;

/// Source of unguessable session tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> AccessToken;
}
