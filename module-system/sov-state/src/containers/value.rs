use std::marker::PhantomData;

use thiserror::Error;

use crate::codec::{BorshCodec, StateValueCodec};
use crate::storage::StorageKey;
use crate::{Prefix, Storage, WorkingSet};

/// One value, stored under the bare prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct StateValue<V, Codec = BorshCodec> {
    prefix: Prefix,
    codec: Codec,
    _value: PhantomData<V>,
}

/// Error returned by [`StateValue::get_or_err`].
#[derive(Debug, Error)]
pub enum StateValueError {
    /// The value was never set, or was removed.
    #[error("Value not found for prefix: {0}")]
    MissingValue(Prefix),
}

impl<V> StateValue<V> {
    /// A borsh encoded value under `prefix`.
    pub fn new(prefix: Prefix) -> Self {
        Self::with_codec(prefix, BorshCodec)
    }
}

impl<V, Codec> StateValue<V, Codec> {
    /// A value under `prefix`, encoded with `codec`.
    pub fn with_codec(prefix: Prefix, codec: Codec) -> Self {
        Self {
            prefix,
            codec,
            _value: PhantomData,
        }
    }

    /// The prefix the value lives under.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    fn storage_key(&self) -> StorageKey {
        StorageKey::singleton(&self.prefix)
    }
}

impl<V, Codec: StateValueCodec<V>> StateValue<V, Codec> {
    /// Overwrites the value.
    pub fn set<S: Storage>(&self, value: &V, working_set: &mut WorkingSet<S>) {
        working_set.write(self.storage_key(), value, &self.codec);
    }

    /// The current value, if any.
    pub fn get<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> Option<V> {
        working_set.read(&self.storage_key(), &self.codec)
    }

    /// Like [`StateValue::get`], with absence reported as an error.
    pub fn get_or_err<S: Storage>(
        &self,
        working_set: &mut WorkingSet<S>,
    ) -> Result<V, StateValueError> {
        self.get(working_set)
            .ok_or_else(|| StateValueError::MissingValue(self.prefix.clone()))
    }

    /// Clears the value and returns it.
    pub fn remove<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> Option<V> {
        working_set.take(self.storage_key(), &self.codec)
    }
}
