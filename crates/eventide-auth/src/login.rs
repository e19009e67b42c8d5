//! Name + password authentication.

use std::sync::Arc;

use eventide_core::{ServiceError, ServiceResult};
use eventide_crypto::PasswordCredential;
use eventide_storage::AccountDirectory;

use crate::token::{IssuedToken, TokenIssuer};

/// Message returned for every failed login.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Checks a name and password, then issues a bearer token.
///
/// An unknown name and a wrong password fail identically. The directory
/// lookup itself is not timing-equalized; only the credential comparison is
/// constant-time.
pub struct AuthenticationFlow {
    directory: Arc<dyn AccountDirectory>,
    issuer: TokenIssuer,
}

impl AuthenticationFlow {
    /// Create a flow over an account directory and token issuer.
    #[must_use]
    pub fn new(directory: Arc<dyn AccountDirectory>, issuer: TokenIssuer) -> Self {
        Self { directory, issuer }
    }

    /// The issuer used for successful logins.
    #[must_use]
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Authenticate and return a signed token for the stored identity.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthorized`] if the name is unknown or the
    /// password does not match, and [`ServiceError::Unexpected`] if the
    /// directory fails or the stored credential is malformed.
    pub async fn authenticate(&self, name: &str, secret: &str) -> ServiceResult<IssuedToken> {
        let Some(account) = self.directory.find_by_name(name).await? else {
            tracing::warn!(user_name = %name, "login failed");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        };

        let secret = secret.to_owned();
        let stored = account.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || {
            PasswordCredential::verify_encoded(&secret, &stored)
        })
        .await
        .map_err(|e| ServiceError::Unexpected(format!("credential check panicked: {e}")))?
        .map_err(|e| {
            tracing::error!(user_id = %account.id, error = %e, "stored credential is unreadable");
            ServiceError::Unexpected(format!("stored credential for {} is malformed: {e}", account.id))
        })?;

        if !verified {
            tracing::warn!(user_name = %name, "login failed");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        }

        let token = self.issuer.issue(account.id, &account.name, account.role)?;
        tracing::info!(user_id = %account.id, role = %account.role, "login succeeded");
        Ok(token)
    }
}

impl std::fmt::Debug for AuthenticationFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationFlow")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}
