//! Owner confirmation against the account service.

use std::sync::Arc;

use eventide_config::EventsSection;
use eventide_core::UserId;
use eventide_storage::AccountDirectory;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::error::{LookupError, LookupResult};

/// Confirms that an account exists.
///
/// A single attempt is made per call; failures are never retried.
#[async_trait::async_trait]
pub trait IdentityLookup: Send + Sync {
    /// Succeed iff the account `id` exists.
    ///
    /// `bearer_token` is the caller's raw token, forwarded to remote services.
    async fn get_user_by_id(&self, id: UserId, bearer_token: Option<&str>) -> LookupResult<()>;
}

/// Lookup against an in-process account directory.
pub struct DirectoryLookup {
    directory: Arc<dyn AccountDirectory>,
}

impl DirectoryLookup {
    /// Create a lookup over `directory`.
    #[must_use]
    pub fn new(directory: Arc<dyn AccountDirectory>) -> Self {
        Self { directory }
    }
}

impl std::fmt::Debug for DirectoryLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryLookup").finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl IdentityLookup for DirectoryLookup {
    async fn get_user_by_id(&self, id: UserId, _bearer_token: Option<&str>) -> LookupResult<()> {
        match self.directory.find_by_id(id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(LookupError::NotFound(id)),
            Err(e) => Err(LookupError::Internal(e.to_string())),
        }
    }
}

/// Lookup over HTTP: `GET {base}/api/v1/account/{id}`.
///
/// Any non-2xx status or transport failure is a lookup failure.
#[derive(Debug, Clone)]
pub struct HttpIdentityLookup {
    client: Client,
    base_url: String,
}

impl HttpIdentityLookup {
    /// Create a lookup against the account service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Internal`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> LookupResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| LookupError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a lookup against `events.account_api_url`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Internal`] if the HTTP client cannot be built.
    pub fn from_config(section: &EventsSection) -> LookupResult<Self> {
        Self::new(section.account_api_url.as_str())
    }

    /// Create a lookup using a preconfigured client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Endpoint queried for `id`.
    #[must_use]
    pub fn account_url(&self, id: UserId) -> String {
        format!("{}/api/v1/account/{id}", self.base_url)
    }
}

#[async_trait::async_trait]
impl IdentityLookup for HttpIdentityLookup {
    async fn get_user_by_id(&self, id: UserId, bearer_token: Option<&str>) -> LookupResult<()> {
        let url = self.account_url(id);
        tracing::debug!(%url, "confirming account");

        let mut request = self.client.get(&url);
        if let Some(token) = bearer_token {
            let mut value = HeaderValue::try_from(format!("Bearer {token}"))
                .map_err(|e| LookupError::Internal(format!("invalid bearer token characters: {e}")))?;
            value.set_sensitive(true);
            request = request.header(AUTHORIZATION, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(user_id = %id, status = %status, "account service rejected lookup");
            return Err(LookupError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
