//! Port for one-way salted password digests.

use crate::domain::PasswordDigest;

use super::define_port_error;

define_port_error! {
    /// Errors raised while computing a digest.
    pub enum PasswordHashError {
        /// The hashing primitive rejected its inputs.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Computes and verifies password digests.
///
/// Implementations must be deterministic for a given `(plaintext, salt)` and
/// compare digests in constant time.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Digest `plaintext` under a fresh random salt.
    fn digest(&self, plaintext: &str) -> Result<PasswordDigest, PasswordHashError>;

    /// Recompute the digest of `plaintext` under the stored salt and compare.
    /// Malformed stored values verify as `false`.
    fn verify(&self, plaintext: &str, stored: &PasswordDigest) -> bool;
}
