//! Driving port for user profile reads.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the profile of `user_id` to any holder of an active session.
    async fn fetch_profile(&self, token: &AccessToken, user_id: &UserId) -> Result<User, Error>;
}
