use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::principal::errors::CredentialStoreError;
use crate::principal::models::Principal;
use crate::principal::models::Role;
use crate::principal::models::Username;
use crate::principal::ports::CredentialStore;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn principal_from_row(row: PgRow) -> Result<Principal, CredentialStoreError> {
        let corrupt = |e: sqlx::Error| CredentialStoreError::Corrupt(e.to_string());

        let username: String = row.try_get("username").map_err(corrupt)?;
        let password_hash: String = row.try_get("password_hash").map_err(corrupt)?;
        let role: String = row.try_get("role").map_err(corrupt)?;

        Ok(Principal {
            username: Username::new(username)
                .map_err(|e| CredentialStoreError::Corrupt(e.to_string()))?,
            password_hash,
            role: Role::new(role).map_err(|e| CredentialStoreError::Corrupt(e.to_string()))?,
        })
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Principal>, CredentialStoreError> {
        let row = sqlx::query(
            r#"
            SELECT username, password_hash, role
            FROM principals
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialStoreError::Unavailable(e.to_string()))?;

        row.map(Self::principal_from_row).transpose()
    }

    async fn insert_if_absent(&self, principal: Principal) -> Result<bool, CredentialStoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO principals (username, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(principal.username.as_str())
        .bind(&principal.password_hash)
        .bind(principal.role.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| CredentialStoreError::Unavailable(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}
