//! Message service — text validation and author-existence checks.
//!
//! DESIGN
//! ======
//! Creation requires a valid text AND an author id that resolves to a stored
//! account; either failure rejects the whole operation with no insert. The
//! read and delete paths are unconditional passthroughs where absence is a
//! normal outcome: deleting an id twice is a no-op the second time, and an
//! unknown author lists as an empty sequence. Update folds "no such message"
//! into the same rejection surface as invalid text at the transport
//! boundary, while keeping the two apart in the error type.

use std::sync::Arc;

use crate::stores::{AccountStore, Message, MessageStore, NewMessage, StoreError};

pub const MAX_TEXT_LEN: usize = 255;

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("message text must be 1-{MAX_TEXT_LEN} characters")]
    InvalidText,
    #[error("unknown author: {0}")]
    UnknownAuthor(i32),
    #[error("message not found: {0}")]
    NotFound(i32),
    #[error("storage failure: {0}")]
    Store(#[from] StoreError),
}

/// Text is valid when it has at least one non-whitespace character and at
/// most `MAX_TEXT_LEN` characters, counted as Unicode scalar values to match
/// the `VARCHAR(255)` column.
fn text_is_valid(text: &str) -> bool {
    !text.trim().is_empty() && text.chars().count() <= MAX_TEXT_LEN
}

#[derive(Clone)]
pub struct MessageService {
    messages: Arc<dyn MessageStore>,
    accounts: Arc<dyn AccountStore>,
}

impl MessageService {
    #[must_use]
    pub fn new(messages: Arc<dyn MessageStore>, accounts: Arc<dyn AccountStore>) -> Self {
        Self { messages, accounts }
    }

    /// Validate and persist a new message.
    ///
    /// # Errors
    ///
    /// `InvalidText` or `UnknownAuthor` when validation fails (no insert
    /// happens); `Store` when the storage medium fails.
    pub async fn create_message(&self, candidate: NewMessage) -> Result<Message, MessageError> {
        if !text_is_valid(&candidate.text) {
            return Err(MessageError::InvalidText);
        }
        if self.accounts.find_by_id(candidate.author_id).await?.is_none() {
            return Err(MessageError::UnknownAuthor(candidate.author_id));
        }
        Ok(self.messages.insert(candidate).await?)
    }

    /// Every stored message.
    ///
    /// # Errors
    ///
    /// `Store` when the storage medium fails.
    pub async fn get_all_messages(&self) -> Result<Vec<Message>, MessageError> {
        Ok(self.messages.list_all().await?)
    }

    /// Lookup by id; `None` means not found and is not an error.
    ///
    /// # Errors
    ///
    /// `Store` when the storage medium fails.
    pub async fn get_message_by_id(&self, id: i32) -> Result<Option<Message>, MessageError> {
        Ok(self.messages.find_by_id(id).await?)
    }

    /// Delete by id, returning the removed message. Deleting an absent id
    /// returns `None` and mutates nothing.
    ///
    /// # Errors
    ///
    /// `Store` when the storage medium fails.
    pub async fn delete_message_by_id(&self, id: i32) -> Result<Option<Message>, MessageError> {
        Ok(self.messages.delete_by_id(id).await?)
    }

    /// Replace the text of an existing message.
    ///
    /// # Errors
    ///
    /// `InvalidText` before any store call; `NotFound` when the id does not
    /// exist; `Store` when the storage medium fails.
    pub async fn update_message(&self, id: i32, new_text: &str) -> Result<Message, MessageError> {
        if !text_is_valid(new_text) {
            return Err(MessageError::InvalidText);
        }
        self.messages
            .update_text(id, new_text)
            .await?
            .ok_or(MessageError::NotFound(id))
    }

    /// All messages by one account. No check that the account exists: an
    /// unknown id yields an empty sequence, indistinguishable from an
    /// account with no messages.
    ///
    /// # Errors
    ///
    /// `Store` when the storage medium fails.
    pub async fn get_messages_by_account_id(&self, account_id: i32) -> Result<Vec<Message>, MessageError> {
        Ok(self.messages.list_by_author(account_id).await?)
    }
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
