//! Shared HMAC key material for bearer tokens.

use zeroize::Zeroizing;

use crate::error::{CryptoError, CryptoResult};

/// Symmetric signing key shared by the token issuer and every verifier.
///
/// The bytes are zeroized on drop and never printed.
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Zeroizing<Vec<u8>>,
}

impl SigningSecret {
    /// Minimum accepted length in bytes (256 bits, one HMAC-SHA256 block output).
    pub const MIN_LEN: usize = 32;

    /// Wrap raw key bytes without a strength check.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes.into()),
        }
    }

    /// Wrap a textual key, rejecting keys shorter than [`Self::MIN_LEN`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::WeakSecret`] if the key is too short.
    pub fn from_text(text: &str) -> CryptoResult<Self> {
        let secret = Self::new(text.as_bytes());
        secret.check_strength()?;
        Ok(secret)
    }

    /// Verify the key is at least [`Self::MIN_LEN`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::WeakSecret`] if the key is too short.
    pub fn check_strength(&self) -> CryptoResult<()> {
        if self.bytes.len() < Self::MIN_LEN {
            return Err(CryptoError::WeakSecret {
                min: Self::MIN_LEN,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    /// Key bytes (careful - sensitive!).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the key is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningSecret")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
