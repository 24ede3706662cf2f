//! Public profile reads.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::{Error, ReasonCode};
use super::ports::{UserProfileQuery, UserRepository};
use super::session::AccessToken;
use super::session_authority::SessionAuthority;
use super::user::{User, UserId};

/// Implements [`UserProfileQuery`].
#[derive(Clone)]
pub struct ProfileService {
    sessions: Arc<SessionAuthority>,
    users: Arc<dyn UserRepository>,
}

impl ProfileService {
    pub fn new(sessions: Arc<SessionAuthority>, users: Arc<dyn UserRepository>) -> Self {
        Self { sessions, users }
    }
}

#[async_trait]
impl UserProfileQuery for ProfileService {
    async fn fetch_profile(&self, token: &AccessToken, user_id: &UserId) -> Result<User, Error> {
        self.sessions.require_active(token).await?;
        self.users.find_by_id(user_id).await?.ok_or_else(|| {
            Error::rejected(
                ReasonCode::UserNotFound,
                "User with entered uuid does not exist",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{AccountCommand, MockUserRepository, UserPersistenceError};
    use crate::domain::ErrorCode;
    use crate::test_support::{TestContext, signup_details};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn any_active_session_can_read_any_profile() {
        let ctx = TestContext::new();
        let alice = ctx.signup("alice").await;
        let bob_token = ctx.signin("bob_reader").await;

        let profile = ctx
            .profiles
            .fetch_profile(&bob_token, alice.id())
            .await
            .expect("profile readable");
        assert_eq!(profile.username().as_ref(), "alice");
        assert_eq!(profile.profile().first_name, "Alice");
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_user_fails_with_usr_001() {
        let ctx = TestContext::new();
        let token = ctx.signin("carol").await;
        let err = ctx
            .profiles
            .fetch_profile(&token, &UserId::random())
            .await
            .expect_err("unknown user");
        assert_eq!(err.reason(), Some(ReasonCode::UserNotFound));
    }

    #[rstest]
    #[tokio::test]
    async fn session_check_precedes_profile_lookup() {
        let ctx = TestContext::new();
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(0);
        let service = ProfileService::new(ctx.authority.clone(), Arc::new(users));

        let token = AccessToken::new("never-issued").expect("token");
        let err = service
            .fetch_profile(&token, &UserId::random())
            .await
            .expect_err("no session");
        assert_eq!(err.reason(), Some(ReasonCode::NoActiveSession));
    }

    #[rstest]
    #[tokio::test]
    async fn store_outage_surfaces_as_service_unavailable() {
        let ctx = TestContext::new();
        let token = ctx.signin("dave").await;
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Err(UserPersistenceError::connection("refused")));
        let service = ProfileService::new(ctx.authority.clone(), Arc::new(users));

        let err = service
            .fetch_profile(&token, &UserId::random())
            .await
            .expect_err("outage");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn signup_details_helper_builds_valid_profiles() {
        let ctx = TestContext::new();
        let user = ctx
            .accounts
            .signup(&signup_details("erin", "pw"))
            .await
            .expect("signup");
        assert_eq!(user.profile().last_name, "Tester");
    }
}
