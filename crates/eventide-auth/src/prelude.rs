//! Prelude module - commonly used types for convenient import.
//!
//! Use `use eventide_auth::prelude::*;` to import all essential types.

// Tokens
pub use crate::{Claims, IssuedToken, TokenIssuer, TokenVerifier};

// Services
pub use crate::{AccountService, AuthenticationFlow, RegisterRequest, RegistrationService};

// Authorization
pub use crate::{AccessPolicy, Decision, OwnerScope};
