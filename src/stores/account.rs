//! PostgreSQL adapter for the account store.
//!
//! ERROR HANDLING
//! ==============
//! The `accounts.username` unique constraint is the real uniqueness
//! guarantee; the service-level pre-check only orders validation. A unique
//! violation on insert is therefore mapped to `StoreError::Duplicate` so the
//! losing side of a concurrent registration sees the same rejection as a
//! failed pre-check.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{Account, AccountStore, NewAccount, StoreError};

#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn account_from_row((id, username, password): (i32, String, String)) -> Account {
    Account { id, username, password }
}

pub(crate) fn map_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db) = err {
        if db.is_unique_violation() {
            return StoreError::Duplicate(db.constraint().unwrap_or("unique").to_owned());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_username_and_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, (i32, String, String)>(
            "SELECT id, username, password FROM accounts WHERE username = $1 AND password = $2",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(account_from_row))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, (i32, String, String)>(
            "SELECT id, username, password FROM accounts WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(account_from_row))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, (i32, String, String)>(
            "SELECT id, username, password FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(account_from_row))
    }

    async fn insert(&self, candidate: NewAccount) -> Result<Account, StoreError> {
        let id: i32 =
            sqlx::query_scalar("INSERT INTO accounts (username, password) VALUES ($1, $2) RETURNING id")
                .bind(&candidate.username)
                .bind(&candidate.password)
                .fetch_one(&self.pool)
                .await
                .map_err(map_insert_error)?;

        Ok(Account { id, username: candidate.username, password: candidate.password })
    }
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
