//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`). Only
//! compiled for tests or with the `test-support` feature.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{AccountCommand, PasswordHashError, PasswordHasher, TokenGenerator};
use crate::domain::{
    AccessToken, AccountService, AnswerService, PasswordDigest, ProfileService, QuestionService,
    SessionAuthority, SessionPolicy, SignupDetails, User, UserId, UserProfile, Username,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;

/// Password used by [`TestContext`] accounts.
pub const TEST_PASSWORD: &str = "password";

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Default for MutableClock {
    fn default() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
            .single()
            .unwrap_or_else(|| panic!("fixed start time must be valid"));
        Self::new(start)
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Predictable tokens: `token-1`, `token-2`, ...
#[derive(Debug, Default)]
pub struct SequentialTokenGenerator(AtomicU64);

impl TokenGenerator for SequentialTokenGenerator {
    fn generate(&self) -> AccessToken {
        let next = self.0.fetch_add(1, Ordering::Relaxed) + 1;
        AccessToken::from_generated(format!("token-{next}"))
    }
}

/// Reversible digest so tests skip the cost of Argon2. Never use outside tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextHasher;

impl PasswordHasher for PlaintextHasher {
    fn digest(&self, plaintext: &str) -> Result<PasswordDigest, PasswordHashError> {
        Ok(PasswordDigest::new("00", hex::encode(plaintext)))
    }

    fn verify(&self, plaintext: &str, stored: &PasswordDigest) -> bool {
        hex::encode(plaintext) == stored.hash()
    }
}

/// Signup details for `username` with a derived email and profile.
///
/// The first name is the capitalised username; the last name is `Tester`.
pub fn signup_details(username: &str, password: &str) -> SignupDetails {
    let mut chars = username.chars();
    let first_name: String = chars
        .next()
        .map(|c| c.to_uppercase().chain(chars).collect())
        .unwrap_or_default();
    let profile = UserProfile::new(first_name, "Tester")
        .unwrap_or_else(|err| panic!("test profile must be valid: {err}"));
    SignupDetails::try_new(
        username,
        &format!("{username}@example.com"),
        password,
        profile,
    )
    .unwrap_or_else(|err| panic!("test signup details must be valid: {err}"))
}

/// Fully wired services over an [`InMemoryStore`] and a [`MutableClock`].
pub struct TestContext {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<MutableClock>,
    pub authority: Arc<SessionAuthority>,
    pub accounts: AccountService,
    pub profiles: ProfileService,
    pub questions: QuestionService,
    pub answers: AnswerService,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_policy(SessionPolicy::default())
    }

    pub fn with_policy(policy: SessionPolicy) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(MutableClock::default());
        let authority = Arc::new(SessionAuthority::new(
            store.clone(),
            store.clone(),
            Arc::new(SequentialTokenGenerator::default()),
            clock.clone(),
            policy,
        ));
        Self {
            accounts: AccountService::new(
                store.clone(),
                Arc::new(PlaintextHasher),
                authority.clone(),
            ),
            profiles: ProfileService::new(authority.clone(), store.clone()),
            questions: QuestionService::new(
                authority.clone(),
                store.clone(),
                store.clone(),
                clock.clone(),
            ),
            answers: AnswerService::new(
                authority.clone(),
                store.clone(),
                store.clone(),
                clock.clone(),
            ),
            store,
            clock,
            authority,
        }
    }

    /// Register a non-admin account using [`TEST_PASSWORD`].
    pub async fn signup(&self, username: &str) -> User {
        self.accounts
            .signup(&signup_details(username, TEST_PASSWORD))
            .await
            .unwrap_or_else(|err| panic!("signup of {username} failed: {err}"))
    }

    /// Sign in `username`, registering it first when needed.
    pub async fn signin(&self, username: &str) -> AccessToken {
        if !self.exists(username).await {
            self.signup(username).await;
        }
        self.signin_existing(username).await
    }

    /// Create an administrator and sign it in.
    pub async fn admin(&self, username: &str) -> AccessToken {
        self.accounts
            .ensure_admin(&signup_details(username, TEST_PASSWORD))
            .await
            .unwrap_or_else(|err| panic!("admin bootstrap failed: {err}"));
        self.signin_existing(username).await
    }

    /// HTTP state backed by these services.
    pub fn http_state(&self) -> HttpState {
        HttpState::new(
            Arc::new(self.accounts.clone()),
            Arc::new(self.profiles.clone()),
            Arc::new(self.questions.clone()),
            Arc::new(self.questions.clone()),
            Arc::new(self.answers.clone()),
            Arc::new(self.answers.clone()),
        )
    }

    /// Id of an already registered account.
    pub async fn user_id(&self, username: &str) -> UserId {
        self.find(username)
            .await
            .map(|user| *user.id())
            .unwrap_or_else(|| panic!("{username} is not registered"))
    }

    async fn exists(&self, username: &str) -> bool {
        self.find(username).await.is_some()
    }

    async fn find(&self, username: &str) -> Option<User> {
        let username = Username::new(username)
            .unwrap_or_else(|err| panic!("test username must be valid: {err}"));
        crate::domain::ports::UserRepository::find_by_username(self.store.as_ref(), &username)
            .await
            .unwrap_or_else(|err| panic!("lookup failed: {err}"))
    }

    async fn signin_existing(&self, username: &str) -> AccessToken {
        let credentials = crate::domain::LoginCredentials::try_from_parts(username, TEST_PASSWORD)
            .unwrap_or_else(|err| panic!("test credentials must be valid: {err}"));
        self.accounts
            .signin(&credentials)
            .await
            .unwrap_or_else(|err| panic!("signin of {username} failed: {err}"))
            .session
            .token()
            .clone()
    }
}
