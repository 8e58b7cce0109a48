//! In-memory store fakes for tests.
//!
//! Rows live in a `Vec` behind a mutex with monotonically assigned ids, so
//! tests see the same id sequence a fresh database would hand out. Each fake
//! honors the full port contract, including the username unique constraint.
//! `poison()` makes every subsequent operation fail, for exercising
//! storage-failure propagation.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::{Account, AccountStore, Message, MessageStore, NewAccount, NewMessage, StoreError};

struct Table<T> {
    rows: Vec<T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new(), last_id: 0 }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

fn poisoned_error() -> StoreError {
    StoreError::Database(sqlx::Error::PoolClosed)
}

// =============================================================================
// ACCOUNTS
// =============================================================================

#[derive(Default)]
pub struct MemAccountStore {
    inner: Mutex<Table<Account>>,
    fail: AtomicBool,
}

impl MemAccountStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation return a storage failure.
    pub fn poison(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) { Err(poisoned_error()) } else { Ok(()) }
    }
}

#[async_trait]
impl AccountStore for MemAccountStore {
    async fn find_by_username_and_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>, StoreError> {
        self.check()?;
        let table = self.inner.lock().expect("account table lock");
        Ok(table
            .rows
            .iter()
            .find(|a| a.username == username && a.password == password)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        self.check()?;
        let table = self.inner.lock().expect("account table lock");
        Ok(table.rows.iter().find(|a| a.username == username).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, StoreError> {
        self.check()?;
        let table = self.inner.lock().expect("account table lock");
        Ok(table.rows.iter().find(|a| a.id == id).cloned())
    }

    async fn insert(&self, candidate: NewAccount) -> Result<Account, StoreError> {
        self.check()?;
        let mut table = self.inner.lock().expect("account table lock");
        if table.rows.iter().any(|a| a.username == candidate.username) {
            return Err(StoreError::Duplicate("accounts_username_key".to_owned()));
        }
        let account = Account {
            id: table.next_id(),
            username: candidate.username,
            password: candidate.password,
        };
        table.rows.push(account.clone());
        Ok(account)
    }
}

// =============================================================================
// MESSAGES
// =============================================================================

#[derive(Default)]
pub struct MemMessageStore {
    inner: Mutex<Table<Message>>,
    fail: AtomicBool,
}

impl MemMessageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation return a storage failure.
    pub fn poison(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) { Err(poisoned_error()) } else { Ok(()) }
    }
}

#[async_trait]
impl MessageStore for MemMessageStore {
    async fn insert(&self, candidate: NewMessage) -> Result<Message, StoreError> {
        self.check()?;
        let mut table = self.inner.lock().expect("message table lock");
        let message = Message {
            id: table.next_id(),
            author_id: candidate.author_id,
            text: candidate.text,
            posted_at_epoch: candidate.posted_at_epoch,
        };
        table.rows.push(message.clone());
        Ok(message)
    }

    async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        self.check()?;
        let table = self.inner.lock().expect("message table lock");
        Ok(table.rows.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Message>, StoreError> {
        self.check()?;
        let table = self.inner.lock().expect("message table lock");
        Ok(table.rows.iter().find(|m| m.id == id).cloned())
    }

    async fn delete_by_id(&self, id: i32) -> Result<Option<Message>, StoreError> {
        self.check()?;
        let mut table = self.inner.lock().expect("message table lock");
        let index = table.rows.iter().position(|m| m.id == id);
        Ok(index.map(|i| table.rows.remove(i)))
    }

    async fn update_text(&self, id: i32, new_text: &str) -> Result<Option<Message>, StoreError> {
        self.check()?;
        let mut table = self.inner.lock().expect("message table lock");
        let Some(message) = table.rows.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        message.text = new_text.to_owned();
        Ok(Some(message.clone()))
    }

    async fn list_by_author(&self, author_id: i32) -> Result<Vec<Message>, StoreError> {
        self.check()?;
        let table = self.inner.lock().expect("message table lock");
        Ok(table
            .rows
            .iter()
            .filter(|m| m.author_id == author_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
