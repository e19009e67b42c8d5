//! Account registration.

use std::sync::Arc;

use eventide_core::{Account, AccountView, ServiceError, ServiceResult, mask_email};
use eventide_crypto::PasswordCredential;
use eventide_storage::{AccountDirectory, StorageError};
use serde::{Deserialize, Serialize};

/// Registration input. Absent fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    /// Desired login name.
    pub name: String,
    /// Plaintext password.
    pub password: String,
    /// Contact e-mail address.
    pub email: String,
}

impl RegisterRequest {
    /// Build a request.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            email: email.into(),
        }
    }

    /// Every missing-field violation, in field order.
    #[must_use]
    pub fn violations(&self) -> Vec<String> {
        [
            (&self.name, "Username is Null or Empty"),
            (&self.password, "Password is Null or Empty"),
            (&self.email, "Email is Null or Empty"),
        ]
        .into_iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, message)| message.to_owned())
        .collect()
    }
}

/// Creates accounts with freshly derived credentials.
pub struct RegistrationService {
    directory: Arc<dyn AccountDirectory>,
    credential: PasswordCredential,
}

impl RegistrationService {
    /// Create a registration service using the default credential strength.
    #[must_use]
    pub fn new(directory: Arc<dyn AccountDirectory>) -> Self {
        Self {
            directory,
            credential: PasswordCredential::new(),
        }
    }

    /// Use a different credential encoder.
    #[must_use]
    pub fn with_credential(mut self, credential: PasswordCredential) -> Self {
        self.credential = credential;
        self
    }

    /// Register a new `User` account.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] listing every blank field, or
    /// `"Username already exists"` for a taken name, and
    /// [`ServiceError::Unexpected`] if storage fails.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AccountView> {
        let violations = request.violations();
        if !violations.is_empty() {
            tracing::warn!(errors = ?violations, "registration rejected");
            return Err(ServiceError::Validation { errors: violations });
        }

        if self.directory.find_by_name(&request.name).await?.is_some() {
            tracing::warn!(user_name = %request.name, "registration rejected: name taken");
            return Err(ServiceError::validation(["Username already exists"]));
        }

        tracing::info!(
            user_name = %request.name,
            email = %mask_email(&request.email),
            "registering account"
        );

        let credential = self.credential;
        let password = request.password;
        let encoded = tokio::task::spawn_blocking(move || credential.encode(&password))
            .await
            .map_err(|e| ServiceError::Unexpected(format!("credential derivation panicked: {e}")))?;

        let account = Account::register(request.name, encoded.to_string(), request.email);
        let saved = match self.directory.save(account).await {
            Ok(saved) => saved,
            Err(StorageError::Conflict(detail)) => {
                tracing::warn!(%detail, "registration lost a race for the name");
                return Err(ServiceError::validation(["Username already exists"]));
            },
            Err(e) => {
                tracing::error!(error = %e, "failed to save account");
                return Err(e.into());
            },
        };

        tracing::info!(user_id = %saved.id, "account registered");
        Ok(saved.view())
    }
}

impl std::fmt::Debug for RegistrationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationService")
            .field("credential", &self.credential)
            .finish_non_exhaustive()
    }
}
