use std::collections::HashMap;
use std::fmt::Debug;

use crate::codec::StateValueCodec;
use crate::storage::{OrderedWrites, StorageKey, StorageValue};
use crate::{Event, Storage};

/// A set of writes layered on top of a [`Storage`]. Reads are served from the
/// most recent write of a key, falling back to the storage itself.
struct Delta<S: Storage> {
    inner: S,
    writes: HashMap<StorageKey, Option<StorageValue>>,
}

impl<S: Storage> Debug for Delta<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Delta")
            .field("pending_writes", &self.writes.len())
            .finish()
    }
}

impl<S: Storage> Delta<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            writes: HashMap::new(),
        }
    }

    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        match self.writes.get(key) {
            Some(value) => value.clone(),
            None => self.inner.get(key),
        }
    }
}

/// This structure holds the writes of every call that was committed so far
/// and is obtained from the [`WorkingSet`] by using either the
/// [`WorkingSet::checkpoint`] or the [`WorkingSet::revert`] method.
pub struct StateCheckpoint<S: Storage> {
    delta: Delta<S>,
}

impl<S: Storage> StateCheckpoint<S> {
    /// Creates an empty checkpoint on top of `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            delta: Delta::new(inner),
        }
    }

    /// Opens a new [`WorkingSet`] whose writes can later be committed into
    /// this checkpoint or thrown away.
    pub fn to_revertable(self) -> WorkingSet<S> {
        WorkingSet {
            checkpoint: self,
            writes: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Drains the accumulated writes, sorted by key, so they can be handed to
    /// [`Storage::commit`].
    pub fn freeze(&mut self) -> OrderedWrites {
        let mut writes: OrderedWrites = self.delta.writes.drain().collect();
        writes.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));
        writes
    }

    /// Returns the storage this checkpoint is built on.
    pub fn backing(&self) -> &S {
        &self.delta.inner
    }
}

/// This structure contains the read-write set and the events collected during
/// the execution of a call. There are two ways to convert it into a
/// [`StateCheckpoint`]:
/// 1. By using the [`WorkingSet::checkpoint`] method, where all the changes
///    are added to the underlying [`StateCheckpoint`].
/// 2. By using the [`WorkingSet::revert`] method, where the changes made since
///    the last checkpoint are thrown away.
///
/// Events are dropped in both cases, take them with
/// [`WorkingSet::take_events`] first.
pub struct WorkingSet<S: Storage> {
    checkpoint: StateCheckpoint<S>,
    writes: HashMap<StorageKey, Option<StorageValue>>,
    events: Vec<Event>,
}

impl<S: Storage> WorkingSet<S> {
    /// Creates a working set directly on top of `inner`.
    pub fn new(inner: S) -> Self {
        StateCheckpoint::new(inner).to_revertable()
    }

    /// Folds the pending writes into the underlying checkpoint.
    pub fn checkpoint(self) -> StateCheckpoint<S> {
        let mut checkpoint = self.checkpoint;
        checkpoint.delta.writes.extend(self.writes);
        checkpoint
    }

    /// Discards the pending writes and events.
    pub fn revert(self) -> StateCheckpoint<S> {
        self.checkpoint
    }

    pub(crate) fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        match self.writes.get(key) {
            Some(value) => value.clone(),
            None => self.checkpoint.delta.get(key),
        }
    }

    pub(crate) fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.writes.insert(key, Some(value));
    }

    pub(crate) fn delete(&mut self, key: StorageKey) {
        self.writes.insert(key, None);
    }

    /// Records a textual event.
    pub fn add_event(&mut self, key: &str, value: &str) {
        self.events.push(Event::new(key, value));
    }

    /// Records an event whose value is the borsh encoding of `event`.
    pub fn add_typed_event<E: borsh::BorshSerialize>(
        &mut self,
        key: &str,
        event: &E,
    ) -> Result<(), std::io::Error> {
        self.events.push(Event::typed(key, event)?);
        Ok(())
    }

    /// Removes and returns all the events recorded so far.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Returns the events recorded so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns the storage this working set is built on.
    pub fn backing(&self) -> &S {
        self.checkpoint.backing()
    }
}

impl<S: Storage> WorkingSet<S> {
    /// Reads and decodes the value under `key`. Values are only ever written
    /// through [`WorkingSet::write`], so a decoding failure means corrupted
    /// storage and panics.
    pub(crate) fn read<V, Codec>(&self, key: &StorageKey, codec: &Codec) -> Option<V>
    where
        Codec: StateValueCodec<V>,
    {
        self.get(key)
            .map(|value| codec.decode_value_unwrap(value.value()))
    }

    pub(crate) fn write<V, Codec>(&mut self, key: StorageKey, value: &V, codec: &Codec)
    where
        Codec: StateValueCodec<V>,
    {
        self.set(key, StorageValue::new(value, codec));
    }

    /// Deletes `key` and returns what it held.
    pub(crate) fn take<V, Codec>(&mut self, key: StorageKey, codec: &Codec) -> Option<V>
    where
        Codec: StateValueCodec<V>,
    {
        let value = self.read(&key, codec)?;
        self.delete(key);
        Some(value)
    }
}
