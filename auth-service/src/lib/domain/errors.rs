use auth::KeyError;
use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

use crate::principal::errors::CredentialStoreError;
use crate::principal::errors::UsernameError;

/// Top-level error for credential and token operations.
///
/// `InvalidCredentials` is the only variant a client should ever see in
/// detail; everything else is an infrastructure failure.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Credential store error: {0}")]
    Store(#[from] CredentialStoreError),

    #[error("Signing key error: {0}")]
    Key(#[from] KeyError),

    #[error("Token lifetime must be between 1 and {max} seconds, got {seconds}")]
    InvalidTokenLifetime { seconds: i64, max: i64 },

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),
}
