//! Configuration options for [`Storage`](crate::storage::Storage) types.

use std::path::PathBuf;

/// Configuration options for [`FileStorage`](crate::FileStorage)
/// initialization.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the directory holding the state snapshot. Created on first use.
    pub path: PathBuf,
}
