use std::marker::PhantomData;

use thiserror::Error;

use crate::codec::{BorshCodec, StateKeyCodec, StateValueCodec};
use crate::storage::StorageKey;
use crate::{Prefix, Storage, WorkingSet};

/// A key-value mapping. Each entry is stored under the prefix followed by
/// the encoded key, so entries of different maps never collide as long as
/// their prefixes differ.
///
/// There is no iteration: keep a [`crate::StateVec`] alongside if the
/// entries need to be enumerated.
#[derive(Debug, Clone, PartialEq)]
pub struct StateMap<K, V, Codec = BorshCodec> {
    prefix: Prefix,
    codec: Codec,
    _entries: PhantomData<(K, V)>,
}

/// Error returned by [`StateMap::get_or_err`].
#[derive(Debug, Error)]
pub enum StateMapError {
    /// No entry for the key.
    #[error("Value not found for prefix: {0} and: storage key {1}")]
    MissingValue(Prefix, StorageKey),
}

impl<K, V> StateMap<K, V> {
    /// A map under `prefix` with borsh encoded keys and values.
    pub fn new(prefix: Prefix) -> Self {
        Self::with_codec(prefix, BorshCodec)
    }
}

impl<K, V, Codec> StateMap<K, V, Codec> {
    /// A map under `prefix`, encoded with `codec`.
    pub fn with_codec(prefix: Prefix, codec: Codec) -> Self {
        Self {
            prefix,
            codec,
            _entries: PhantomData,
        }
    }

    /// The prefix the entries live under.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }
}

impl<K, V, Codec> StateMap<K, V, Codec>
where
    Codec: StateKeyCodec<K> + StateValueCodec<V>,
{
    fn storage_key(&self, key: &K) -> StorageKey {
        StorageKey::new(&self.prefix, key, &self.codec)
    }

    /// Inserts or overwrites the entry for `key`.
    pub fn set<S: Storage>(&self, key: &K, value: &V, working_set: &mut WorkingSet<S>) {
        working_set.write(self.storage_key(key), value, &self.codec);
    }

    /// The entry for `key`, if any.
    pub fn get<S: Storage>(&self, key: &K, working_set: &mut WorkingSet<S>) -> Option<V> {
        working_set.read(&self.storage_key(key), &self.codec)
    }

    /// Like [`StateMap::get`], with absence reported as an error.
    pub fn get_or_err<S: Storage>(
        &self,
        key: &K,
        working_set: &mut WorkingSet<S>,
    ) -> Result<V, StateMapError> {
        let storage_key = self.storage_key(key);
        working_set
            .read(&storage_key, &self.codec)
            .ok_or_else(|| StateMapError::MissingValue(self.prefix.clone(), storage_key))
    }

    /// Deletes the entry for `key` and returns it.
    pub fn remove<S: Storage>(&self, key: &K, working_set: &mut WorkingSet<S>) -> Option<V> {
        working_set.take(self.storage_key(key), &self.codec)
    }
}
