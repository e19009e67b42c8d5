//! A fully wired in-memory platform.

use std::sync::Arc;

use eventide_auth::{AccountService, AuthenticationFlow, RegisterRequest, RegistrationService, TokenIssuer};
use eventide_core::{Account, AccountView, Actor, CategoryId, Role, ServiceResult, seeded_categories};
use eventide_crypto::SigningSecret;
use eventide_events::{DirectoryLookup, EventService, IdentityLookup, Paging};
use eventide_storage::{
    AccountDirectory, InMemoryAccountDirectory, InMemoryCategoryCatalog, InMemoryEventStore,
};

use crate::fixtures::{TEST_PASSWORD, test_account, test_credential};

/// Signing key shared by every test platform.
pub const TEST_SIGNING_KEY: &str = "eventide-test-signing-key-0123456789abcdef";

/// Issuer name used by test platforms.
pub const TEST_ISSUER: &str = "AccountService";

/// Install a test-friendly subscriber once. Later calls are no-ops.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory stores plus every service wired over them.
///
/// Owner lookups go straight to the account directory unless another
/// [`IdentityLookup`] is supplied.
pub struct TestPlatform {
    /// Account store.
    pub directory: Arc<InMemoryAccountDirectory>,
    /// Event store.
    pub event_store: Arc<InMemoryEventStore>,
    /// Category catalog, seeded with the default categories.
    pub categories: Arc<InMemoryCategoryCatalog>,
    /// Token issuer signing with [`TEST_SIGNING_KEY`].
    pub issuer: TokenIssuer,
    /// Name + password login.
    pub login: AuthenticationFlow,
    /// Account registration with low-cost credentials.
    pub registration: RegistrationService,
    /// Role changes and account lookup.
    pub accounts: AccountService,
    /// Event lifecycle.
    pub events: EventService,
}

impl TestPlatform {
    /// A platform whose owner lookups read the account directory.
    #[must_use]
    pub fn new() -> Self {
        let directory = InMemoryAccountDirectory::new().shared();
        let lookup = Arc::new(DirectoryLookup::new(directory.clone()));
        Self::build(directory, lookup)
    }

    /// A platform using `lookup` to confirm event owners.
    #[must_use]
    pub fn with_lookup(lookup: Arc<dyn IdentityLookup>) -> Self {
        Self::build(InMemoryAccountDirectory::new().shared(), lookup)
    }

    /// Apply `paging` to event searches.
    #[must_use]
    pub fn with_paging(mut self, paging: Paging) -> Self {
        self.events = self.events.with_paging(paging);
        self
    }

    fn build(directory: Arc<InMemoryAccountDirectory>, lookup: Arc<dyn IdentityLookup>) -> Self {
        let event_store = InMemoryEventStore::new().shared();
        let categories = InMemoryCategoryCatalog::seeded().shared();
        let issuer = TokenIssuer::new(SigningSecret::new(TEST_SIGNING_KEY.as_bytes()), TEST_ISSUER);

        Self {
            login: AuthenticationFlow::new(directory.clone(), issuer.clone()),
            registration: RegistrationService::new(directory.clone())
                .with_credential(test_credential()),
            accounts: AccountService::new(directory.clone()),
            events: EventService::new(event_store.clone(), categories.clone(), lookup),
            directory,
            event_store,
            categories,
            issuer,
        }
    }

    /// Id of the first seeded category.
    #[must_use]
    pub fn first_category(&self) -> CategoryId {
        seeded_categories()
            .first()
            .map(|c| c.id)
            .unwrap_or_default()
    }

    /// Log in as `name` with [`TEST_PASSWORD`] and verify the token.
    ///
    /// # Errors
    ///
    /// Returns the login or verification failure.
    pub async fn login(&self, name: &str) -> ServiceResult<Actor> {
        let token = self.login.authenticate(name, TEST_PASSWORD).await?;
        self.issuer.verifier().verify(&token.token)
    }

    /// Register `name` with [`TEST_PASSWORD`], then log in.
    ///
    /// # Errors
    ///
    /// Returns the registration or login failure.
    pub async fn register_and_login(&self, name: &str) -> ServiceResult<(AccountView, Actor)> {
        let view = self
            .registration
            .register(RegisterRequest::new(
                name,
                TEST_PASSWORD,
                format!("{name}@example.com"),
            ))
            .await?;
        let actor = self.login(name).await?;
        Ok((view, actor))
    }

    /// Store an account with `role` directly, then log in.
    ///
    /// # Errors
    ///
    /// Returns the storage or login failure.
    pub async fn add_account(&self, name: &str, role: Role) -> ServiceResult<(Account, Actor)> {
        let account = self.directory.save(test_account(name, role)).await?;
        let actor = self.login(name).await?;
        Ok((account, actor))
    }
}

impl Default for TestPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TestPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestPlatform").finish_non_exhaustive()
    }
}
