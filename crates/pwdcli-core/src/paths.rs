//! Standard paths used by pwdcli

use std::path::{Path, PathBuf};

/// File name of the credential store, relative to the home directory
pub const STORE_FILE_NAME: &str = ".passwords.json";

/// Standard pwdcli paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Home directory of the invoking user
    pub home: PathBuf,
    /// Credential store (~/.passwords.json)
    pub store: PathBuf,
}

impl Paths {
    /// Resolve paths for the invoking user.
    ///
    /// Returns `None` when the home directory cannot be determined; nothing
    /// else in pwdcli can work without it.
    pub fn new() -> Option<Self> {
        dirs::home_dir().map(|home| Self::from_home(&home))
    }

    /// Build paths rooted at an explicit home directory
    pub fn from_home(home: &Path) -> Self {
        Self {
            home: home.to_path_buf(),
            store: home.join(STORE_FILE_NAME),
        }
    }
}
