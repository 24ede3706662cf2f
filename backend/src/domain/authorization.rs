//! Ownership and role checks for content mutations.
//!
//! Pure functions: no I/O, no clock. Services resolve the actor and the
//! resource owner first, then ask [`Policy::evaluate`] for a decision.

use super::error::{Error, ReasonCode};
use super::user::{Role, User, UserId};

/// Rule applied to a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Only the owner may act. Used for edits.
    OwnerOnly,
    /// The owner or any administrator may act. Used for deletes.
    OwnerOrAdmin,
}

/// Outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Forbidden,
}

impl Policy {
    /// Decide whether `actor` may act on a resource owned by `owner`.
    ///
    /// # Examples
    /// ```
    /// use quora_backend::domain::{Decision, Policy, Role, UserId};
    ///
    /// let owner = UserId::random();
    /// let admin = UserId::random();
    /// assert_eq!(
    ///     Policy::OwnerOnly.evaluate(&admin, Role::Admin, &owner),
    ///     Decision::Forbidden
    /// );
    /// assert_eq!(
    ///     Policy::OwnerOrAdmin.evaluate(&admin, Role::Admin, &owner),
    ///     Decision::Allowed
    /// );
    /// ```
    pub fn evaluate(self, actor: &UserId, role: Role, owner: &UserId) -> Decision {
        if actor == owner {
            return Decision::Allowed;
        }
        match (self, role) {
            (Self::OwnerOrAdmin, Role::Admin) => Decision::Allowed,
            (Self::OwnerOrAdmin, Role::NonAdmin) | (Self::OwnerOnly, _) => Decision::Forbidden,
        }
    }

    /// Evaluate for `actor` and turn a denial into an ATHR-003 error.
    pub fn authorize(self, actor: &User, owner: &UserId, denial: &str) -> Result<(), Error> {
        match self.evaluate(actor.id(), actor.role(), owner) {
            Decision::Allowed => Ok(()),
            Decision::Forbidden => {
                tracing::info!(
                    actor = %actor.id(),
                    owner = %owner,
                    policy = ?self,
                    "authorization denied"
                );
                Err(Error::rejected(ReasonCode::NotPermitted, denial))
            }
        }
    }
}
