//! Prelude module - commonly used types for convenient import.
//!
//! Use `use eventide_crypto::prelude::*;` to import all essential types.

pub use crate::{CryptoError, CryptoResult};
pub use crate::{EncodedCredential, PasswordCredential, SigningSecret};
