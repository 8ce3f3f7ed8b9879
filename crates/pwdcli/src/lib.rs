//! pwdcli - Local credential store
//!
//! Keeps website/username/email/password entries in a single JSON file
//! (`~/.passwords.json`) and supports listing, adding, deleting by index
//! and keyword search.
//!
//! Entries have no identifier of their own. An entry's position in the file
//! is its only handle, and deleting an entry shifts everything after it down
//! by one.
//!
//! Passwords are stored in clear text. The file is created `0644`.
//!
//! Commands:
//! - list: Show every entry with its index
//! - add: Append an entry
//! - delete <INDEX>: Remove the entry at an index
//! - search <KEYWORD>: Case-insensitive match against all fields
//! - path: Show where the store lives

pub mod error;
pub mod query;
pub mod record;
pub mod store;

pub use error::{Result, StoreError};
pub use query::{Match, QueryEngine};
pub use record::Record;
pub use store::RecordStore;
