//! HS256 bearer tokens.
//!
//! A token asserts `{sub, name, role, iss, iat, exp}`. The expiry is fixed at
//! issuance and cannot be renewed. Verification checks the signature against
//! the shared key, requires the configured issuer, and applies no clock-skew
//! leeway.

use chrono::{DateTime, Duration, Utc};
use eventide_core::{Actor, Role, ServiceError, ServiceResult, UserId};
use eventide_crypto::SigningSecret;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 120;

/// Message carried by every verification failure.
pub const INVALID_TOKEN: &str = "Invalid token";

/// Claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject account id.
    pub sub: String,
    /// Subject login name.
    pub name: String,
    /// Subject role.
    pub role: Role,
    /// Issuer name.
    pub iss: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// A freshly signed token and its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact serialized token.
    pub token: String,
    /// Issuance instant (whole seconds).
    pub issued_at: DateTime<Utc>,
    /// Expiry instant (whole seconds).
    pub expires_at: DateTime<Utc>,
}

/// Signs bearer tokens with a shared HMAC key.
///
/// Configuration is fixed at construction.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: SigningSecret,
    encoding_key: EncodingKey,
    issuer: String,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer with the default two-hour lifetime.
    #[must_use]
    pub fn new(secret: SigningSecret, issuer: impl Into<String>) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        Self {
            secret,
            encoding_key,
            issuer: issuer.into(),
            ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        }
    }

    /// Override the token lifetime.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Issuer name written into every token.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Token lifetime.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// A verifier sharing this issuer's key and issuer name.
    #[must_use]
    pub fn verifier(&self) -> TokenVerifier {
        TokenVerifier::new(&self.secret, self.issuer.clone())
    }

    /// Sign a token for the subject, valid from now for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unexpected`] if signing fails.
    pub fn issue(&self, subject: UserId, name: &str, role: Role) -> ServiceResult<IssuedToken> {
        self.issue_at(subject, name, role, Utc::now())
    }

    /// Sign a token as if issued at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unexpected`] if the expiry overflows or
    /// signing fails.
    pub fn issue_at(
        &self,
        subject: UserId,
        name: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> ServiceResult<IssuedToken> {
        let iat = now.timestamp();
        let exp = iat
            .checked_add(self.ttl.num_seconds())
            .ok_or_else(|| ServiceError::Unexpected("token expiry overflow".to_owned()))?;

        let claims = Claims {
            sub: subject.to_string(),
            name: name.to_owned(),
            role,
            iss: self.issuer.clone(),
            iat,
            exp,
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::Unexpected(format!("failed to sign token: {e}")))?;

        let issued_at = DateTime::from_timestamp(iat, 0)
            .ok_or_else(|| ServiceError::Unexpected("issued-at out of range".to_owned()))?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| ServiceError::Unexpected("expiry out of range".to_owned()))?;

        tracing::debug!(user_id = %subject, %role, %expires_at, "issued bearer token");

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
        })
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// Checks bearer tokens and decodes the caller identity.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for tokens signed with `secret` by `issuer`.
    #[must_use]
    pub fn new(secret: &SigningSecret, issuer: impl Into<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_issuer(&[issuer.into()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Decode and check the token's claims.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthorized`] if the signature is invalid,
    /// the issuer differs, or the token has expired.
    pub fn claims(&self, token: &str) -> ServiceResult<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::warn!(error = %e, "rejected bearer token");
                ServiceError::Unauthorized(INVALID_TOKEN.to_owned())
            })
    }

    /// Verify the token and return the acting identity.
    ///
    /// A subject that is not a valid id yields an actor without `user_id`,
    /// which never matches an owner.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthorized`] for any invalid token.
    pub fn verify(&self, token: &str) -> ServiceResult<Actor> {
        let claims = self.claims(token)?;
        let user_id = claims.sub.parse::<UserId>().ok();
        Ok(Actor::new(user_id, claims.name, claims.role).with_bearer_token(token))
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("issuer", &self.validation.iss)
            .finish_non_exhaustive()
    }
}
