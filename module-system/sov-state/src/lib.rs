//! Storage and state management interfaces for Sovereign voting modules.

#![deny(missing_docs)]

pub mod codec;
pub mod config;
mod containers;
mod event;
mod file_storage;
mod scratchpad;

/// Trait and type definitions related to the [`Storage`] trait.
pub mod storage;

use std::fmt::Display;
use std::str;

pub use containers::{
    StateMap, StateMapError, StateValue, StateValueError, StateVec, StateVecError, StateVecIter,
};
pub use event::{Event, EventKey, EventValue};
pub use file_storage::FileStorage;
pub use scratchpad::{StateCheckpoint, WorkingSet};
pub use storage::{OrderedWrites, Storage, StorageKey, StorageValue};

/// Bytes every key of a state container starts with. Containers of all
/// modules share one key space, distinct prefixes keep them apart.
#[derive(Clone, Debug, PartialEq, Eq, borsh::BorshSerialize, borsh::BorshDeserialize)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Prefix {
    prefix: Vec<u8>,
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match str::from_utf8(&self.prefix) {
            Ok(s) => write!(f, "{:?}", s),
            Err(_) => write!(f, "0x{}", hex::encode(&self.prefix)),
        }
    }
}

impl Prefix {
    /// Wraps raw bytes.
    pub fn new(prefix: Vec<u8>) -> Self {
        Self { prefix }
    }

    /// The prefix bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.prefix
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    /// `true` for the empty prefix.
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }

    /// A copy of this prefix with `bytes` appended.
    pub fn extended(&self, bytes: &[u8]) -> Self {
        let mut prefix = self.clone();
        prefix.extend(bytes.iter().copied());
        prefix
    }
}

impl Extend<u8> for Prefix {
    fn extend<T: IntoIterator<Item = u8>>(&mut self, iter: T) {
        self.prefix.extend(iter)
    }
}
