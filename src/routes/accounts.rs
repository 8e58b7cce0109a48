//! Account routes — registration and login.

use axum::extract::{Json, State};
use axum::http::StatusCode;

use crate::services::AccountError;
use crate::state::AppState;
use crate::stores::{Account, NewAccount};

pub(crate) fn account_error_to_status(err: AccountError) -> StatusCode {
    match err {
        AccountError::BlankUsername | AccountError::PasswordTooShort | AccountError::UsernameTaken => {
            StatusCode::BAD_REQUEST
        }
        AccountError::BadCredentials => StatusCode::UNAUTHORIZED,
        AccountError::Store(e) => {
            tracing::error!(error = %e, "account storage failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// `POST /register` — create an account. 400 if the username is blank, the
/// password is shorter than 4 characters, or the username is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<NewAccount>,
) -> Result<Json<Account>, StatusCode> {
    let account = state
        .accounts
        .register(body)
        .await
        .map_err(account_error_to_status)?;
    Ok(Json(account))
}

/// `POST /login` — authenticate. 401 on any credential mismatch.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<NewAccount>,
) -> Result<Json<Account>, StatusCode> {
    let account = state
        .accounts
        .login(&body.username, &body.password)
        .await
        .map_err(account_error_to_status)?;
    Ok(Json(account))
}

#[cfg(test)]
#[path = "accounts_test.rs"]
mod tests;
