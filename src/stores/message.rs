//! PostgreSQL adapter for the message store.
//!
//! Mutations use `RETURNING` so delete hands back the pre-deletion row and
//! update the post-update row in a single round trip, with "no such id"
//! falling out naturally as an absent row. List queries order by id so the
//! sequence is stable for one underlying state.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{Message, MessageStore, NewMessage, StoreError};

type MessageRow = (i32, i32, String, i64);

#[derive(Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn message_from_row((id, author_id, text, posted_at_epoch): MessageRow) -> Message {
    Message { id, author_id, text, posted_at_epoch }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn insert(&self, candidate: NewMessage) -> Result<Message, StoreError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO messages (author_id, text, posted_at_epoch) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(candidate.author_id)
        .bind(&candidate.text)
        .bind(candidate.posted_at_epoch)
        .fetch_one(&self.pool)
        .await?;

        Ok(Message {
            id,
            author_id: candidate.author_id,
            text: candidate.text,
            posted_at_epoch: candidate.posted_at_epoch,
        })
    }

    async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            "SELECT id, author_id, text, posted_at_epoch FROM messages ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(message_from_row).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Message>, StoreError> {
        let row = sqlx::query_as::<_, MessageRow>(
            "SELECT id, author_id, text, posted_at_epoch FROM messages WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(message_from_row))
    }

    async fn delete_by_id(&self, id: i32) -> Result<Option<Message>, StoreError> {
        let row = sqlx::query_as::<_, MessageRow>(
            "DELETE FROM messages WHERE id = $1 RETURNING id, author_id, text, posted_at_epoch",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(message_from_row))
    }

    async fn update_text(&self, id: i32, new_text: &str) -> Result<Option<Message>, StoreError> {
        let row = sqlx::query_as::<_, MessageRow>(
            "UPDATE messages SET text = $2 WHERE id = $1 RETURNING id, author_id, text, posted_at_epoch",
        )
        .bind(id)
        .bind(new_text)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(message_from_row))
    }

    async fn list_by_author(&self, author_id: i32) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            "SELECT id, author_id, text, posted_at_epoch FROM messages WHERE author_id = $1 ORDER BY id",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(message_from_row).collect())
    }
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
