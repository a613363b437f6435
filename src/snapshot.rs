//! Persistence of previously captured responses, one JSON blob per endpoint.

use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Loads and saves named JSON snapshots. Keys are derived from the request's
/// category and path, so endpoints never share storage.
pub trait SnapshotStore {
    /// Load the previous snapshot for an endpoint. Returns an empty object
    /// when none has been captured yet; that is not an error.
    fn load(&self, category: &str, path: &str) -> Result<Value, StoreError>;

    /// Persist the current snapshot for an endpoint.
    fn save(&self, category: &str, path: &str, document: &Value) -> Result<(), StoreError>;
}

/// The ways snapshot persistence can fail.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the snapshot file failed.
    #[error("snapshot file access failed")]
    Io(#[from] std::io::Error),
    /// A stored snapshot is not valid JSON.
    #[error("stored snapshot is corrupt")]
    Corrupt(#[from] serde_json::Error),
}

/// Snapshot store backed by a directory of JSON files.
#[derive(Clone, Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// A store rooted at the given directory. The directory is created lazily
    /// on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirStore { root: root.into() }
    }

    /// Storage key for one endpoint: category, then the path with every `/`
    /// replaced by `_`, then the `.json` suffix.
    pub fn file_name(category: &str, path: &str) -> String {
        format!("{category}{}.json", path.replace('/', "_"))
    }
}

impl SnapshotStore for DirStore {
    fn load(&self, category: &str, path: &str) -> Result<Value, StoreError> {
        let file = self.root.join(Self::file_name(category, path));

        if !file.exists() {
            debug!(file = %file.display(), "no previous snapshot");
            return Ok(Value::Object(Map::new()));
        }

        let text = fs::read_to_string(&file)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&self, category: &str, path: &str, document: &Value) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;

        let file = self.root.join(Self::file_name(category, path));
        debug!(file = %file.display(), "saving snapshot");
        fs::write(&file, serde_json::to_string(document)?)?;

        Ok(())
    }
}
