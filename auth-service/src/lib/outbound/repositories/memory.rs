use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::principal::errors::CredentialStoreError;
use crate::principal::models::Principal;
use crate::principal::models::Username;
use crate::principal::ports::CredentialStore;

/// Process-local credential store.
///
/// Used when no database is configured and by the test suites. Contents are
/// lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    principals: RwLock<HashMap<String, Principal>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.principals.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.principals.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Principal>, CredentialStoreError> {
        Ok(self.principals.read().await.get(username.as_str()).cloned())
    }

    async fn insert_if_absent(&self, principal: Principal) -> Result<bool, CredentialStoreError> {
        let mut principals = self.principals.write().await;

        if principals.contains_key(principal.username.as_str()) {
            return Ok(false);
        }

        principals.insert(principal.username.as_str().to_string(), principal);
        Ok(true)
    }
}
