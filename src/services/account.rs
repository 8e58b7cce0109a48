//! Account service — registration and login rules.
//!
//! DESIGN
//! ======
//! Validation order on registration is fixed: blank username, then short
//! password, then the uniqueness lookup. The cheap shape checks reject before
//! any store call happens, so an unreachable database never masks a
//! validation outcome. The uniqueness pre-check itself is advisory — the
//! `accounts.username` unique constraint is what actually holds under
//! concurrent registration, and a duplicate-key insert failure is folded
//! into the same rejection as a failed pre-check.

use std::sync::Arc;

use crate::stores::{Account, AccountStore, NewAccount, StoreError};

pub const MIN_PASSWORD_LEN: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("username must not be blank")]
    BlankUsername,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
    #[error("username already taken")]
    UsernameTaken,
    #[error("invalid credentials")]
    BadCredentials,
    #[error("storage failure: {0}")]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
}

impl AccountService {
    #[must_use]
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    /// Register a new account and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// `BlankUsername`, `PasswordTooShort`, or `UsernameTaken` when a rule
    /// fails (nothing is persisted); `Store` when the storage medium fails.
    pub async fn register(&self, candidate: NewAccount) -> Result<Account, AccountError> {
        if candidate.username.trim().is_empty() {
            return Err(AccountError::BlankUsername);
        }
        if candidate.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AccountError::PasswordTooShort);
        }
        if self.accounts.find_by_username(&candidate.username).await?.is_some() {
            return Err(AccountError::UsernameTaken);
        }

        match self.accounts.insert(candidate).await {
            Ok(account) => Ok(account),
            // Two registrations raced past the pre-check; the constraint
            // rejected the second insert.
            Err(StoreError::Duplicate(_)) => Err(AccountError::UsernameTaken),
            Err(err) => Err(err.into()),
        }
    }

    /// Authenticate by exact username/password match.
    ///
    /// # Errors
    ///
    /// `BadCredentials` for any mismatch; `Store` when the storage medium
    /// fails. No lockout or rate limiting exists here.
    pub async fn login(&self, username: &str, password: &str) -> Result<Account, AccountError> {
        self.accounts
            .find_by_username_and_password(username, password)
            .await?
            .ok_or(AccountError::BadCredentials)
    }
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
