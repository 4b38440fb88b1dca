use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::Context;
use borsh::{BorshDeserialize, BorshSerialize};
use tracing::debug;

use crate::config::Config;
use crate::storage::{OrderedWrites, Storage, StorageKey, StorageValue};

const STATE_FILE_NAME: &str = "state.db";

type Snapshot = BTreeMap<Vec<u8>, Vec<u8>>;

/// A [`Storage`] implementation that keeps the whole key space in memory and
/// persists it as a single borsh-encoded snapshot file.
///
/// Every [`Storage::commit`] writes the new snapshot to a temporary file in
/// the same directory and renames it over the previous one, so the file on
/// disk always holds the state as of some complete commit.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
    snapshot: Arc<RwLock<Snapshot>>,
}

impl FileStorage {
    /// Opens the storage rooted at the directory `path`, creating the
    /// directory if needed and loading the snapshot left by a previous run.
    pub fn with_path(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let dir = path.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory {}", dir.display()))?;

        let state_file = dir.join(STATE_FILE_NAME);
        let snapshot = if state_file.exists() {
            let bytes = fs::read(&state_file)
                .with_context(|| format!("Failed to read {}", state_file.display()))?;
            Snapshot::try_from_slice(&bytes)
                .with_context(|| format!("Corrupted state snapshot {}", state_file.display()))?
        } else {
            Snapshot::new()
        };
        debug!(path = %dir.display(), entries = snapshot.len(), "Opened file storage");

        Ok(Self {
            dir,
            snapshot: Arc::new(RwLock::new(snapshot)),
        })
    }

    /// Returns the directory this storage lives in.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    fn persist(&self, snapshot: &Snapshot) -> Result<(), anyhow::Error> {
        let bytes = snapshot.try_to_vec()?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.dir.join(STATE_FILE_NAME))?;
        Ok(())
    }
}

impl Storage for FileStorage {
    type RuntimeConfig = Config;

    fn with_config(config: Self::RuntimeConfig) -> Result<Self, anyhow::Error> {
        Self::with_path(config.path.as_path())
    }

    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        let snapshot = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        snapshot
            .get(key.as_ref())
            .map(|value| StorageValue::from(value.clone()))
    }

    fn commit(&self, writes: OrderedWrites) -> Result<(), anyhow::Error> {
        if writes.is_empty() {
            return Ok(());
        }

        let mut snapshot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = snapshot.clone();
        let writes_count = writes.len();
        for (key, value) in writes {
            let key = key.as_ref().clone();
            match value {
                Some(value) => next.insert(key, value.value().to_vec()),
                None => next.remove(&key),
            };
        }

        self.persist(&next)?;
        *snapshot = next;
        debug!(writes = writes_count, entries = snapshot.len(), "Committed state");
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}
