//! Business logic for accounts and messages.
//!
//! ARCHITECTURE
//! ============
//! Services own every validation rule (uniqueness, bounds, existence checks,
//! idempotent deletion) so route handlers stay focused on protocol
//! translation. Each service receives its store collaborators at
//! construction, which is what lets the tests run against in-memory fakes.

pub mod account;
pub mod message;

pub use account::{AccountError, AccountService};
pub use message::{MessageError, MessageService};
