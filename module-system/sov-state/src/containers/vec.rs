use std::iter::FusedIterator;

use thiserror::Error;

use crate::codec::{BorshCodec, StateKeyCodec, StateValueCodec};
use crate::{Prefix, StateMap, StateValue, Storage, WorkingSet};

/// An append-only friendly sequence, indexed from zero. The length and the
/// elements are kept under two sub-prefixes, `l` and `e`, so that no element
/// key can ever alias the length.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVec<V, Codec = BorshCodec> {
    prefix: Prefix,
    len: StateValue<usize, Codec>,
    elems: StateMap<usize, V, Codec>,
}

/// Error returned by the index based accessors of [`StateVec`].
#[derive(Debug, Error)]
pub enum StateVecError {
    /// The index is not below the length.
    #[error("Index out of bounds for index: {0}")]
    IndexOutOfBounds(usize),
    /// The index is in bounds but nothing is stored there.
    #[error("Value not found for prefix: {0} and index: {1}")]
    MissingValue(Prefix, usize),
}

impl<V> StateVec<V> {
    /// A vector under `prefix` with borsh encoded elements.
    pub fn new(prefix: Prefix) -> Self {
        Self::with_codec(prefix, BorshCodec)
    }
}

impl<V, Codec: Clone> StateVec<V, Codec> {
    /// A vector under `prefix`, encoded with `codec`.
    pub fn with_codec(prefix: Prefix, codec: Codec) -> Self {
        Self {
            len: StateValue::with_codec(prefix.extended(b"l"), codec.clone()),
            elems: StateMap::with_codec(prefix.extended(b"e"), codec),
            prefix,
        }
    }

    /// The prefix the vector lives under.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }
}

impl<V, Codec> StateVec<V, Codec>
where
    Codec: StateKeyCodec<usize> + StateValueCodec<usize> + StateValueCodec<V>,
{
    /// Number of elements.
    pub fn len<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> usize {
        self.len.get(working_set).unwrap_or_default()
    }

    /// `true` if nothing was ever pushed.
    pub fn is_empty<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> bool {
        self.len(working_set) == 0
    }

    /// Appends `value` and returns its index.
    pub fn push<S: Storage>(&self, value: &V, working_set: &mut WorkingSet<S>) -> usize {
        let index = self.len(working_set);
        self.elems.set(&index, value, working_set);
        self.len.set(&(index + 1), working_set);
        index
    }

    /// Replaces the element at `index`. Only existing slots can be written,
    /// use [`StateVec::push`] to grow the vector.
    pub fn set<S: Storage>(
        &self,
        index: usize,
        value: &V,
        working_set: &mut WorkingSet<S>,
    ) -> Result<(), StateVecError> {
        self.check_bounds(index, working_set)?;
        self.elems.set(&index, value, working_set);
        Ok(())
    }

    /// The element at `index`, `None` when out of bounds.
    pub fn get<S: Storage>(&self, index: usize, working_set: &mut WorkingSet<S>) -> Option<V> {
        self.elems.get(&index, working_set)
    }

    /// Like [`StateVec::get`], telling apart an index out of bounds from a
    /// missing element.
    pub fn get_or_err<S: Storage>(
        &self,
        index: usize,
        working_set: &mut WorkingSet<S>,
    ) -> Result<V, StateVecError> {
        self.check_bounds(index, working_set)?;
        self.elems
            .get(&index, working_set)
            .ok_or_else(|| StateVecError::MissingValue(self.prefix.clone(), index))
    }

    /// The element pushed last.
    pub fn last<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> Option<V> {
        let index = self.len(working_set).checked_sub(1)?;
        self.elems.get(&index, working_set)
    }

    /// Iterates over the elements in index order.
    pub fn iter<'a, 'ws, S: Storage>(
        &'a self,
        working_set: &'ws mut WorkingSet<S>,
    ) -> StateVecIter<'a, 'ws, V, Codec, S> {
        let len = self.len(working_set);
        StateVecIter {
            vec: self,
            working_set,
            next: 0,
            len,
        }
    }

    fn check_bounds<S: Storage>(
        &self,
        index: usize,
        working_set: &mut WorkingSet<S>,
    ) -> Result<(), StateVecError> {
        if index < self.len(working_set) {
            Ok(())
        } else {
            Err(StateVecError::IndexOutOfBounds(index))
        }
    }
}

/// Iterator returned by [`StateVec::iter`]. Holds the working set borrowed
/// for as long as it lives.
pub struct StateVecIter<'a, 'ws, V, Codec, S: Storage> {
    vec: &'a StateVec<V, Codec>,
    working_set: &'ws mut WorkingSet<S>,
    next: usize,
    len: usize,
}

impl<'a, 'ws, V, Codec, S> Iterator for StateVecIter<'a, 'ws, V, Codec, S>
where
    Codec: StateKeyCodec<usize> + StateValueCodec<usize> + StateValueCodec<V>,
    S: Storage,
{
    type Item = V;

    fn next(&mut self) -> Option<V> {
        if self.next >= self.len {
            return None;
        }
        let elem = self.vec.get(self.next, self.working_set);
        // A missing element stops the iteration for good.
        self.next = if elem.is_some() {
            self.next + 1
        } else {
            self.len
        };
        elem
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.len - self.next))
    }
}

impl<'a, 'ws, V, Codec, S> FusedIterator for StateVecIter<'a, 'ws, V, Codec, S>
where
    Codec: StateKeyCodec<usize> + StateValueCodec<usize> + StateValueCodec<V>,
    S: Storage,
{
}
