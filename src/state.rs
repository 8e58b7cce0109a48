//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the two domain services, each wired to its store collaborators at
//! construction. Handing the state different `AccountStore`/`MessageStore`
//! implementations is the seam the tests use to run without a database.

use std::sync::Arc;

use crate::services::{AccountService, MessageService};
use crate::stores::{AccountStore, MessageStore};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — the services only hold Arcs.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub messages: MessageService,
}

impl AppState {
    #[must_use]
    pub fn new(account_store: Arc<dyn AccountStore>, message_store: Arc<dyn MessageStore>) -> Self {
        Self {
            accounts: AccountService::new(Arc::clone(&account_store)),
            messages: MessageService::new(message_store, account_store),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
