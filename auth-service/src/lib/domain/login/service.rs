use async_trait::async_trait;
use auth::Claims;

use crate::domain::errors::AuthError;
use crate::domain::login::ports::LoginServicePort;
use crate::domain::token::models::IssuedToken;
use crate::domain::token::service::TokenService;
use crate::principal::models::AuthenticationOutcome;
use crate::principal::ports::CredentialStore;
use crate::principal::service::AuthenticationService;

/// Composes credential verification with token issuance.
pub struct LoginService<CS>
where
    CS: CredentialStore,
{
    authentication: AuthenticationService<CS>,
    tokens: TokenService,
}

impl<CS> LoginService<CS>
where
    CS: CredentialStore,
{
    pub fn new(authentication: AuthenticationService<CS>, tokens: TokenService) -> Self {
        Self {
            authentication,
            tokens,
        }
    }
}

#[async_trait]
impl<CS> LoginServicePort for LoginService<CS>
where
    CS: CredentialStore,
{
    async fn authenticate_and_issue_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedToken, AuthError> {
        match self.authentication.authenticate(username, password).await? {
            AuthenticationOutcome::Authenticated(principal) => Ok(self.tokens.issue(&principal)?),
            AuthenticationOutcome::Rejected(_) => Err(AuthError::InvalidCredentials),
        }
    }

    fn validate_token(&self, username: &str, token: &str) -> bool {
        self.tokens.validate(username, token)
    }

    fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(self.tokens.verify(token)?)
    }
}
