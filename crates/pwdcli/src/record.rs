//! The credential record

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single stored credential.
///
/// All fields are free-form text; nothing is validated here. On disk the
/// password lives under the `pwd` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    /// Service the credential belongs to (e.g. "github.com")
    pub website: String,
    /// Login name
    pub username: String,
    /// Email linked to the account
    pub email: String,
    /// Password, stored in clear
    #[serde(rename = "pwd")]
    pub password: String,
}

impl Record {
    pub fn new(
        website: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            website: website.into(),
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Case-insensitive substring match against every field.
    ///
    /// `needle` must already be folded with [`fold_case`]. An empty needle
    /// matches.
    pub fn matches(&self, needle: &str) -> bool {
        self.fields()
            .iter()
            .any(|field| fold_case(field).contains(needle))
    }

    fn fields(&self) -> [&str; 4] {
        [
            self.website.as_str(),
            self.username.as_str(),
            self.email.as_str(),
            self.password.as_str(),
        ]
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Website: {} Username: {} Email: {} Password: {}",
            self.website, self.username, self.email, self.password
        )
    }
}

/// Lowercase one character at a time.
///
/// Unlike `str::to_lowercase` there is no context-sensitive mapping (a final
/// `Σ` folds to `σ` like any other), so a substring of a field stays a
/// substring after folding.
pub fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Render a record the way listings show it: `[<index>] Website: ...`
pub fn format_line(index: usize, record: &Record) -> String {
    format!("[{}] {}", index, record)
}
