use async_trait::async_trait;
use auth::Claims;

use crate::domain::errors::AuthError;
use crate::domain::token::models::IssuedToken;

/// Operations exposed to inbound adapters.
#[async_trait]
pub trait LoginServicePort: Send + Sync + 'static {
    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `username` - Raw username
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Issued token with its validity window
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password (never distinguished)
    /// * `Store` / `Password` / `Token` - Infrastructure failure
    async fn authenticate_and_issue_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedToken, AuthError>;

    /// Check a token was issued to `username` and is still live.
    ///
    /// Never errors; any problem yields false.
    fn validate_token(&self, username: &str, token: &str) -> bool;

    /// Verify a bearer token and return its claims.
    ///
    /// # Errors
    /// * `Token` - Malformed, bad signature, or expired
    fn verify_token(&self, token: &str) -> Result<Claims, AuthError>;
}
