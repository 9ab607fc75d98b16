use std::sync::Arc;

use auth::PasswordError;
use auth::PasswordHasher;

use crate::domain::errors::AuthError;
use crate::principal::models::AuthenticationOutcome;
use crate::principal::models::RejectionReason;
use crate::principal::models::Username;
use crate::principal::ports::CredentialStore;

/// Turns a username/password pair into an authentication outcome.
///
/// Unknown usernames, malformed usernames and wrong passwords all yield the
/// same `Rejected(InvalidCredentials)`. An unknown username still pays for
/// one hash verification against a throwaway hash so the response time does
/// not reveal whether the account exists.
pub struct AuthenticationService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    password_hasher: Arc<PasswordHasher>,
    dummy_hash: String,
}

impl<CS> AuthenticationService<CS>
where
    CS: CredentialStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential lookup implementation
    /// * `password_hasher` - Hasher used to verify stored hashes
    ///
    /// # Errors
    /// * `Password` - The timing-equalization hash could not be produced
    pub fn new(store: Arc<CS>, password_hasher: Arc<PasswordHasher>) -> Result<Self, AuthError> {
        let dummy_hash = password_hasher.hash("not-a-real-password")?;

        Ok(Self {
            store,
            password_hasher,
            dummy_hash,
        })
    }

    /// Verify credentials.
    ///
    /// # Arguments
    /// * `username` - Raw username as presented by the caller
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// `Authenticated` with the stored principal, or `Rejected(InvalidCredentials)`
    ///
    /// # Errors
    /// * `Store` - Credential store failed
    /// * `Password` - Stored hash is unreadable
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticationOutcome, AuthError> {
        let rejected = AuthenticationOutcome::Rejected(RejectionReason::InvalidCredentials);

        let principal = match Username::new(username) {
            Ok(username) => self.store.find_by_username(&username).await?,
            Err(_) => None,
        };

        let Some(principal) = principal else {
            let _ = self.verify_password(password, &self.dummy_hash).await?;
            tracing::debug!("Authentication rejected");
            return Ok(rejected);
        };

        if self
            .verify_password(password, &principal.password_hash)
            .await?
        {
            tracing::debug!(username = %principal.username, "Authentication succeeded");
            Ok(AuthenticationOutcome::Authenticated(principal))
        } else {
            tracing::debug!("Authentication rejected");
            Ok(rejected)
        }
    }

    /// Argon2 is CPU-bound; run it on the blocking pool.
    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.password_hasher);
        let password = password.to_owned();
        let hash = hash.to_owned();

        let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| PasswordError::VerificationFailed(e.to_string()))??;

        Ok(verified)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::atomic::Ordering;

    use auth::PasswordParams;

    use super::*;
    use crate::principal::errors::CredentialStoreError;
    use crate::principal::models::Principal;
    use crate::principal::models::Role;
    use crate::principal::ports::mock::MockTestCredentialStore;

    fn hasher() -> Arc<PasswordHasher> {
        Arc::new(
            PasswordHasher::with_params(PasswordParams {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap(),
        )
    }

    fn admin(hasher: &PasswordHasher) -> Principal {
        Principal::new(
            Username::new("admin").unwrap(),
            hasher.hash("Admin1").unwrap(),
            Role::admin(),
        )
    }

    fn service_with(
        store: MockTestCredentialStore,
        hasher: Arc<PasswordHasher>,
    ) -> AuthenticationService<MockTestCredentialStore> {
        AuthenticationService::new(Arc::new(store), hasher).unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let hasher = hasher();
        let stored = admin(&hasher);
        let returned = stored.clone();

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_username()
            .withf(|u| u.as_str() == "admin")
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = service_with(store, hasher);

        let outcome = service.authenticate("admin", "Admin1").await.unwrap();
        assert_eq!(outcome, AuthenticationOutcome::Authenticated(stored));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let hasher = hasher();
        let stored = admin(&hasher);

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_username()
            .times(2)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = service_with(store, hasher);

        for password in ["admin1", ""] {
            let outcome = service.authenticate("admin", password).await.unwrap();
            assert_eq!(
                outcome,
                AuthenticationOutcome::Rejected(RejectionReason::InvalidCredentials)
            );
        }
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user_is_indistinguishable() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = service_with(store, hasher());

        let outcome = service.authenticate("nobody", "Admin1").await.unwrap();
        assert_eq!(
            outcome,
            AuthenticationOutcome::Rejected(RejectionReason::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_authenticate_invalid_username_skips_store() {
        let mut store = MockTestCredentialStore::new();
        store.expect_find_by_username().times(0);

        let service = service_with(store, hasher());

        for username in ["", "a", "bad name!"] {
            let outcome = service.authenticate(username, "whatever").await.unwrap();
            assert_eq!(
                outcome,
                AuthenticationOutcome::Rejected(RejectionReason::InvalidCredentials)
            );
        }
    }

    #[tokio::test]
    async fn test_authenticate_store_failure_propagates() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Err(CredentialStoreError::Unavailable("connection refused".into())));

        let service = service_with(store, hasher());

        let result = service.authenticate("admin", "Admin1").await;
        assert!(matches!(
            result,
            Err(AuthError::Store(CredentialStoreError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_corrupt_hash_propagates() {
        let mut store = MockTestCredentialStore::new();
        store.expect_find_by_username().times(1).returning(|_| {
            Ok(Some(Principal::new(
                Username::new("admin").unwrap(),
                "plaintext-by-mistake".to_string(),
                Role::admin(),
            )))
        });

        let service = service_with(store, hasher());

        let result = service.authenticate("admin", "Admin1").await;
        assert!(matches!(result, Err(AuthError::Password(_))));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_verification_leaves_runtime_free() {
        let hasher = hasher();
        let stored = admin(&hasher);

        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = service_with(store, hasher);

        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        tokio::spawn(async move { flag.store(true, Ordering::SeqCst) });

        let outcome = service.authenticate("admin", "Admin1").await.unwrap();

        assert!(matches!(outcome, AuthenticationOutcome::Authenticated(_)));
        assert!(ran.load(Ordering::SeqCst), "runtime was blocked during hashing");
    }
}
