//! Roster Core
//!
//! Domain types, the storage trait, and error handling shared by the Roster
//! storage layer and HTTP server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `NewUser`, `UserDraft`, `UserId`
//! - **Core Traits**: `UserStore`, the seam between request handlers and persistence
//! - **Error Handling**: Unified `RosterError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use roster_core::types::UserDraft;
//!
//! let draft = UserDraft {
//!     name: Some("Alice".to_string()),
//!     email: Some("alice@example.com".to_string()),
//! };
//!
//! let new_user = draft.validate().unwrap();
//! assert_eq!(new_user.name, "Alice");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{Result, RosterError};
pub use storage::UserStore;
pub use types::{NewUser, User, UserDraft, UserId};
