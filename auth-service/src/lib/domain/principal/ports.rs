use async_trait::async_trait;

use crate::principal::errors::CredentialStoreError;
use crate::principal::models::Principal;
use crate::principal::models::Username;

/// Persistence operations the core needs for principals.
///
/// Implementations own their consistency; the core only reads and performs
/// one atomic conditional insert.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve principal by username.
    ///
    /// # Arguments
    /// * `username` - Username to search for
    ///
    /// # Returns
    /// Optional principal (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Store could not be reached
    /// * `Corrupt` - Stored record does not form a valid principal
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Principal>, CredentialStoreError>;

    /// Persist principal unless one with the same username already exists.
    ///
    /// Must be atomic: two concurrent calls for the same username create
    /// exactly one record.
    ///
    /// # Arguments
    /// * `principal` - Principal to store
    ///
    /// # Returns
    /// True if the principal was inserted, false if the username was taken
    ///
    /// # Errors
    /// * `Unavailable` - Store could not be reached
    async fn insert_if_absent(&self, principal: Principal) -> Result<bool, CredentialStoreError>;
}
