//! pwdcli core - Shared functionality for the pwdcli tool
//!
//! Resolves where the credential store lives and sets up logging.

pub mod logging;
pub mod paths;

pub use paths::{Paths, STORE_FILE_NAME};
