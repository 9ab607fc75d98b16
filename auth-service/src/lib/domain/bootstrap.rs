use std::fmt;
use std::sync::Arc;

use auth::PasswordError;
use auth::PasswordHasher;

use crate::domain::errors::AuthError;
use crate::principal::models::Principal;
use crate::principal::models::Role;
use crate::principal::models::Username;
use crate::principal::ports::CredentialStore;

/// Credentials of the administrative principal created on first boot.
#[derive(Clone)]
pub struct AdminAccount {
    pub username: Username,
    pub password: String,
}

impl AdminAccount {
    /// # Errors
    /// * `InvalidUsername` - Configured admin username fails validation
    pub fn new(username: &str, password: impl Into<String>) -> Result<Self, AuthError> {
        Ok(Self {
            username: Username::new(username)?,
            password: password.into(),
        })
    }
}

impl fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminAccount")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created,
    AlreadyPresent,
}

/// One-shot creation of the default administrative principal.
///
/// Idempotent, and safe when several processes boot at once: the final
/// write goes through the store's atomic `insert_if_absent`, so a lost race
/// is reported as `AlreadyPresent`.
pub struct BootstrapSeeder<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    password_hasher: Arc<PasswordHasher>,
    admin: AdminAccount,
}

impl<CS> BootstrapSeeder<CS>
where
    CS: CredentialStore,
{
    pub fn new(
        store: Arc<CS>,
        password_hasher: Arc<PasswordHasher>,
        admin: AdminAccount,
    ) -> Self {
        Self {
            store,
            password_hasher,
            admin,
        }
    }

    /// Create the admin principal unless it already exists.
    ///
    /// # Errors
    /// * `Store` - Credential store failed
    /// * `Password` - Default password could not be hashed
    pub async fn ensure_admin_exists(&self) -> Result<SeedOutcome, AuthError> {
        if self
            .store
            .find_by_username(&self.admin.username)
            .await?
            .is_some()
        {
            tracing::debug!(username = %self.admin.username, "Admin principal already present");
            return Ok(SeedOutcome::AlreadyPresent);
        }

        let hasher = Arc::clone(&self.password_hasher);
        let password = self.admin.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))??;
        let admin = Principal::new(self.admin.username.clone(), password_hash, Role::admin());

        if self.store.insert_if_absent(admin).await? {
            tracing::info!(username = %self.admin.username, "Default admin created");
            Ok(SeedOutcome::Created)
        } else {
            tracing::debug!(
                username = %self.admin.username,
                "Admin principal created concurrently by another process"
            );
            Ok(SeedOutcome::AlreadyPresent)
        }
    }
}
