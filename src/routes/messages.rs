//! Message routes — create, list, fetch, edit, delete.
//!
//! Absent lookups and already-deleted ids answer 200 with an empty body;
//! only rejected input (and a missing update target) answers 400.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::services::MessageError;
use crate::state::AppState;
use crate::stores::{Message, NewMessage};

pub(crate) fn message_error_to_status(err: MessageError) -> StatusCode {
    match err {
        MessageError::InvalidText | MessageError::UnknownAuthor(_) | MessageError::NotFound(_) => {
            StatusCode::BAD_REQUEST
        }
        MessageError::Store(e) => {
            tracing::error!(error = %e, "message storage failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_or_empty(found: Option<Message>) -> Response {
    match found {
        Some(message) => Json(message).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

#[derive(Deserialize)]
pub struct UpdateMessageBody {
    pub text: String,
}

/// `POST /messages` — create a message. 400 if the text is invalid or the
/// author does not exist.
pub async fn create_message(
    State(state): State<AppState>,
    Json(body): Json<NewMessage>,
) -> Result<Json<Message>, StatusCode> {
    let message = state
        .messages
        .create_message(body)
        .await
        .map_err(message_error_to_status)?;
    Ok(Json(message))
}

/// `GET /messages` — list every message.
pub async fn list_messages(State(state): State<AppState>) -> Result<Json<Vec<Message>>, StatusCode> {
    let messages = state
        .messages
        .get_all_messages()
        .await
        .map_err(message_error_to_status)?;
    Ok(Json(messages))
}

/// `GET /messages/{id}` — fetch one message; empty body if absent.
pub async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, StatusCode> {
    let found = state
        .messages
        .get_message_by_id(id)
        .await
        .map_err(message_error_to_status)?;
    Ok(message_or_empty(found))
}

/// `DELETE /messages/{id}` — delete a message, returning it; empty body if
/// it was already absent (idempotent).
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, StatusCode> {
    let deleted = state
        .messages
        .delete_message_by_id(id)
        .await
        .map_err(message_error_to_status)?;
    Ok(message_or_empty(deleted))
}

/// `PATCH /messages/{id}` — replace the text. 400 if the text is invalid or
/// no message has that id.
pub async fn update_message(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateMessageBody>,
) -> Result<Json<Message>, StatusCode> {
    let updated = state
        .messages
        .update_message(id, &body.text)
        .await
        .map_err(message_error_to_status)?;
    Ok(Json(updated))
}

/// `GET /accounts/{id}/messages` — list one account's messages. An unknown
/// account id yields an empty array.
pub async fn list_account_messages(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Message>>, StatusCode> {
    let messages = state
        .messages
        .get_messages_by_account_id(id)
        .await
        .map_err(message_error_to_status)?;
    Ok(Json(messages))
}

#[cfg(test)]
#[path = "messages_test.rs"]
mod tests;
