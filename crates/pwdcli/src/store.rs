//! Record store - the JSON file holding every credential
//!
//! The file is a JSON array of `{website, username, email, pwd}` objects in
//! insertion order. The whole sequence is read and written at once; there is
//! no cache between calls and no locking, so two processes writing at the
//! same time race and the last writer wins.

use std::fs::{self, OpenOptions, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pwdcli_core::Paths;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::record::Record;

/// Content of a freshly initialized store
const EMPTY_STORE: &str = "[]";

/// Mode for files the store creates. Group and others can read it.
#[cfg(unix)]
const STORE_MODE: u32 = 0o644;

/// File-backed sequence of credential records
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// Path to the backing JSON file
    path: PathBuf,
}

impl RecordStore {
    /// Create a store backed by the given file. Nothing is touched on disk.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Create a store at the standard location (`~/.passwords.json`)
    pub fn open_default() -> Result<Self> {
        let paths = Paths::new().ok_or(StoreError::HomeDirUnavailable)?;
        Ok(Self::new(&paths.store))
    }

    /// Path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file containing `[]` if it does not exist yet.
    ///
    /// An existing file is left alone, whatever it contains. The empty store
    /// is written to a temp file first and linked into place, so the store
    /// never appears half-written.
    pub fn ensure_initialized(&self) -> Result<()> {
        if fs::symlink_metadata(&self.path).is_ok() {
            return Ok(());
        }

        let tmp_path = tmp_path_for(&self.path);
        let created = write_tmp(&tmp_path, EMPTY_STORE.as_bytes(), None)
            .and_then(|()| fs::hard_link(&tmp_path, &self.path));
        let _ = fs::remove_file(&tmp_path);

        match created {
            Ok(()) => {
                debug!(path = %self.path.display(), "created empty store");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    /// Read every record, in stored order
    pub fn load_all(&self) -> Result<Vec<Record>> {
        let content = fs::read(&self.path).map_err(|e| StoreError::io(&self.path, e))?;

        let records: Vec<Record> =
            serde_json::from_slice(&content).map_err(|source| StoreError::Format {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), count = records.len(), "loaded store");
        Ok(records)
    }

    /// Replace the whole store with `records`.
    ///
    /// The new content goes to a `.tmp` file next to the real store file,
    /// which is synced and then renamed over it, so a failed write never
    /// leaves a truncated store behind. A symlinked store is written through
    /// to its target and the link is kept.
    pub fn replace_all(&self, records: &[Record]) -> Result<()> {
        let json = serde_json::to_string_pretty(records).map_err(|source| StoreError::Format {
            path: self.path.clone(),
            source,
        })?;

        let target = self.target().map_err(|e| StoreError::io(&self.path, e))?;
        // Keep whatever mode the current store has
        let existing = fs::metadata(&target).ok().map(|m| m.permissions());

        let tmp_path = tmp_path_for(&target);
        let written = write_tmp(&tmp_path, json.as_bytes(), existing)
            .and_then(|()| fs::rename(&tmp_path, &target));

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::io(&self.path, e));
        }

        debug!(path = %target.display(), count = records.len(), "replaced store");
        Ok(())
    }

    /// The file actually holding the records, with symlinks resolved
    fn target(&self) -> io::Result<PathBuf> {
        match fs::canonicalize(&self.path) {
            Ok(resolved) => Ok(resolved),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(self.path.clone()),
            Err(e) => Err(e),
        }
    }
}

/// Sibling temp file for `path` (e.g. `.passwords.json.tmp`)
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_tmp(tmp_path: &Path, content: &[u8], perms: Option<Permissions>) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(STORE_MODE);
    }

    let mut file = options.open(tmp_path)?;
    file.write_all(content)?;
    if let Some(perms) = perms {
        file.set_permissions(perms)?;
    }
    file.sync_all()
}
