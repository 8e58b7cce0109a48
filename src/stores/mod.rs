//! Durable storage ports for accounts and messages.
//!
//! ARCHITECTURE
//! ============
//! Each entity gets an async trait port and a PostgreSQL adapter. Services
//! depend only on the traits, which are injected at construction; tests swap
//! in the in-memory fakes from [`memory`]. Stores hold no business rules —
//! they expose CRUD primitives and report storage trouble distinctly from
//! "no matching row."

pub mod account;
#[cfg(test)]
pub mod memory;
pub mod message;
#[cfg(all(test, feature = "live-db-tests"))]
pub(crate) mod test_support;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// =============================================================================
// RECORDS
// =============================================================================

/// A registered account. The id is assigned by the store on insert and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i32,
    pub username: String,
    /// Stored and compared verbatim; hashing is out of scope.
    pub password: String,
}

/// Candidate account, pre-insert. Same shape as [`Account`] minus the id.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
}

/// A short text post. `author_id` pointed at an existing account when the
/// message was created; nothing re-checks it afterwards, so out-of-band
/// account removal can leave it dangling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i32,
    pub author_id: i32,
    pub text: String,
    /// Caller-supplied milliseconds since epoch, stored as given.
    pub posted_at_epoch: i64,
}

/// Candidate message, pre-insert.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub author_id: i32,
    pub text: String,
    pub posted_at_epoch: i64,
}

// =============================================================================
// ERRORS
// =============================================================================

/// Storage-layer failure. `Duplicate` is the one write rejection services
/// care about: it is how a lost registration race surfaces when the unique
/// constraint on `accounts.username` turns away the second insert.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    Duplicate(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// =============================================================================
// PORTS
// =============================================================================

/// Account persistence port.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Exact match on both fields; `None` if no row matches.
    async fn find_by_username_and_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>, StoreError>;

    /// Lookup used for the uniqueness pre-check during registration.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Lookup used to confirm message authorship.
    async fn find_by_id(&self, id: i32) -> Result<Option<Account>, StoreError>;

    /// Persist a candidate and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// `StoreError::Duplicate` if the username is already taken at commit
    /// time, `StoreError::Database` for any other storage trouble.
    async fn insert(&self, candidate: NewAccount) -> Result<Account, StoreError>;
}

/// Message persistence port.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a candidate and return it with its assigned id.
    async fn insert(&self, candidate: NewMessage) -> Result<Message, StoreError>;

    /// Every stored message, ordered by id.
    async fn list_all(&self) -> Result<Vec<Message>, StoreError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Message>, StoreError>;

    /// Remove the row and return its pre-deletion value. A missing id is a
    /// no-op returning `None`, never an error.
    async fn delete_by_id(&self, id: i32) -> Result<Option<Message>, StoreError>;

    /// Overwrite `text` and return the post-update row, or `None` if the id
    /// does not exist.
    async fn update_text(&self, id: i32, new_text: &str) -> Result<Option<Message>, StoreError>;

    /// All messages by one author, ordered by id; empty if none.
    async fn list_by_author(&self, author_id: i32) -> Result<Vec<Message>, StoreError>;
}
