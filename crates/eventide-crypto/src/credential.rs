//! Salted, iterated password credentials.
//!
//! A credential is stored as three standard-base64/decimal segments joined
//! by `.`: `salt.key.iterations`. The separator never appears in the base64
//! alphabet, so the encoding is unambiguous.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::{CryptoError, CryptoResult};

/// Salt length in bytes for newly encoded credentials.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes for newly encoded credentials.
pub const KEY_LEN: usize = 32;

/// Iteration count for newly encoded credentials.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Largest iteration count accepted when parsing or encoding.
pub const MAX_ITERATIONS: u32 = 10_000_000;

const SEPARATOR: char = '.';

/// A parsed `salt.key.iterations` credential.
///
/// Never contains the plaintext secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedCredential {
    salt: Vec<u8>,
    key: Vec<u8>,
    iterations: u32,
}

impl EncodedCredential {
    /// Salt bytes.
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Iteration count used to derive the key.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Length of the stored derived key.
    #[must_use]
    pub fn key_len(&self) -> usize {
        self.key.len()
    }
}

impl fmt::Display for EncodedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            STANDARD.encode(&self.salt),
            STANDARD.encode(&self.key),
            self.iterations
        )
    }
}

impl fmt::Debug for EncodedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedCredential")
            .field("salt_len", &self.salt.len())
            .field("key_len", &self.key.len())
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

impl FromStr for EncodedCredential {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(SEPARATOR);
        let (Some(salt), Some(key), Some(iterations), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CryptoError::MalformedCredential(
                "expected three '.'-separated segments".to_owned(),
            ));
        };

        let salt = decode_segment("salt", salt)?;
        let key = decode_segment("key", key)?;
        let iterations: u32 = iterations.parse().map_err(|_| {
            CryptoError::MalformedCredential(format!("iteration count is not a number: {iterations}"))
        })?;
        check_iterations(iterations)?;

        Ok(Self {
            salt,
            key,
            iterations,
        })
    }
}

impl TryFrom<String> for EncodedCredential {
    type Error = CryptoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EncodedCredential> for String {
    fn from(value: EncodedCredential) -> Self {
        value.to_string()
    }
}

fn decode_segment(name: &str, segment: &str) -> CryptoResult<Vec<u8>> {
    let bytes = STANDARD
        .decode(segment)
        .map_err(|e| CryptoError::MalformedCredential(format!("{name} is not base64: {e}")))?;
    if bytes.is_empty() {
        return Err(CryptoError::MalformedCredential(format!("{name} is empty")));
    }
    Ok(bytes)
}

fn check_iterations(iterations: u32) -> CryptoResult<()> {
    if iterations == 0 || iterations > MAX_ITERATIONS {
        return Err(CryptoError::InvalidIterations {
            actual: iterations,
            max: MAX_ITERATIONS,
        });
    }
    Ok(())
}

/// PBKDF2-HMAC-SHA256 credential encoder and verifier.
///
/// Both operations are CPU-bound for the full iteration count. Async callers
/// should run them on a blocking worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCredential {
    iterations: u32,
}

impl Default for PasswordCredential {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordCredential {
    /// Encoder using [`DEFAULT_ITERATIONS`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }

    /// Encoder using a custom iteration count.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidIterations`] if the count is zero or
    /// above [`MAX_ITERATIONS`].
    pub fn with_iterations(iterations: u32) -> CryptoResult<Self> {
        check_iterations(iterations)?;
        Ok(Self { iterations })
    }

    /// Iteration count used for new encodings.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Derive a fresh credential for `secret` under a random salt.
    #[must_use]
    pub fn encode(&self, secret: &str) -> EncodedCredential {
        let mut salt = vec![0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        pbkdf2::pbkdf2_hmac::<Sha256>(secret.as_bytes(), &salt, self.iterations, &mut *key);

        EncodedCredential {
            salt,
            key: key.to_vec(),
            iterations: self.iterations,
        }
    }

    /// Check `secret` against a stored credential.
    ///
    /// Re-derives with the stored salt and iteration count, then compares in
    /// constant time. A mismatch is `false`, never an error.
    #[must_use]
    pub fn verify(secret: &str, encoded: &EncodedCredential) -> bool {
        let mut derived = Zeroizing::new(vec![0u8; encoded.key.len()]);
        pbkdf2::pbkdf2_hmac::<Sha256>(
            secret.as_bytes(),
            &encoded.salt,
            encoded.iterations,
            &mut derived,
        );
        bool::from(derived.as_slice().ct_eq(&encoded.key))
    }

    /// Parse a stored credential string and verify `secret` against it.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedCredential`] or
    /// [`CryptoError::InvalidIterations`] if `encoded` cannot be parsed.
    pub fn verify_encoded(secret: &str, encoded: &str) -> CryptoResult<bool> {
        let credential: EncodedCredential = encoded.parse()?;
        Ok(Self::verify(secret, &credential))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN_HASH: &str =
        "UtRa5nECyqzKQt94ssKiAg==.GiUL5v6TjEcWXvFDRla2LaPLdgjnskef6jW4RpMikW8=.100000";

    fn fast() -> PasswordCredential {
        PasswordCredential::with_iterations(1_000).unwrap()
    }

    #[test]
    fn test_encode_then_verify() {
        let encoded = fast().encode("pw1");
        assert!(PasswordCredential::verify("pw1", &encoded));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let encoded = fast().encode("pw1");
        assert!(!PasswordCredential::verify("pw2", &encoded));
        assert!(!PasswordCredential::verify("", &encoded));
    }

    #[test]
    fn test_encodings_differ_by_salt() {
        let credential = fast();
        let a = credential.encode("same");
        let b = credential.encode("same");
        assert_ne!(a, b);
        assert_ne!(a.salt(), b.salt());
        assert!(PasswordCredential::verify("same", &a));
        assert!(PasswordCredential::verify("same", &b));
    }

    #[test]
    fn test_default_parameters() {
        let encoded = PasswordCredential::new().encode("pw");
        assert_eq!(encoded.salt().len(), SALT_LEN);
        assert_eq!(encoded.key_len(), KEY_LEN);
        assert_eq!(encoded.iterations(), DEFAULT_ITERATIONS);
        assert!(encoded.to_string().ends_with(".100000"));
    }

    #[test]
    fn test_parse_stored_format() {
        let parsed: EncodedCredential = ADMIN_HASH.parse().unwrap();
        assert_eq!(parsed.salt().len(), 16);
        assert_eq!(parsed.key_len(), 32);
        assert_eq!(parsed.iterations(), 100_000);
        assert_eq!(parsed.to_string(), ADMIN_HASH);
    }

    #[test]
    fn test_verify_uses_stored_iterations() {
        let encoded = PasswordCredential::with_iterations(2_000)
            .unwrap()
            .encode("pw");
        let text = encoded.to_string();
        assert!(PasswordCredential::verify_encoded("pw", &text).unwrap());
        assert!(!PasswordCredential::verify_encoded("nope", &text).unwrap());
    }

    #[test]
    fn test_malformed_encodings() {
        for bad in [
            "",
            "onlyone",
            "a.b",
            "AAAA.AAAA.1.extra",
            "!!!.AAAA.1000",
            "AAAA.!!!.1000",
            "AAAA.AAAA.many",
            ".AAAA.1000",
        ] {
            let err = bad.parse::<EncodedCredential>().unwrap_err();
            assert!(
                matches!(err, CryptoError::MalformedCredential(_)),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_iteration_bounds() {
        assert!(matches!(
            "AAAA.AAAA.0".parse::<EncodedCredential>(),
            Err(CryptoError::InvalidIterations { actual: 0, .. })
        ));
        assert!(PasswordCredential::with_iterations(0).is_err());
        assert!(PasswordCredential::with_iterations(MAX_ITERATIONS + 1).is_err());
        assert!(PasswordCredential::verify_encoded("pw", "AAAA.AAAA.4294967295").is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let encoded = fast().encode("pw");
        let debug = format!("{encoded:?}");
        assert!(!debug.contains(&STANDARD.encode(&encoded.key)));
    }

    #[test]
    fn test_serde_as_string() {
        let encoded = fast().encode("pw");
        let json = serde_json::to_string(&encoded).unwrap();
        assert_eq!(json, format!("\"{encoded}\""));
        let back: EncodedCredential = serde_json::from_str(&json).unwrap();
        assert_eq!(back, encoded);
        assert!(serde_json::from_str::<EncodedCredential>("\"nope\"").is_err());
    }
}
