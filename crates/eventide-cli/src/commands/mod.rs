//! CLI command implementations.

pub(crate) mod config;
pub(crate) mod password;
pub(crate) mod token;
