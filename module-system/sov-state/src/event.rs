use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A key-value pair emitted by a module to notify external observers about a
/// state change.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Event {
    key: EventKey,
    value: EventValue,
}

impl Event {
    /// Creates an event from a textual key and value.
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: EventKey(key.as_bytes().to_vec()),
            value: EventValue(value.as_bytes().to_vec()),
        }
    }

    /// Creates an event whose value is the borsh encoding of `value`.
    pub fn typed<E: BorshSerialize>(key: &str, value: &E) -> Result<Self, std::io::Error> {
        Ok(Self {
            key: EventKey(key.as_bytes().to_vec()),
            value: EventValue(value.try_to_vec()?),
        })
    }

    /// Decodes the value of an event created with [`Event::typed`].
    pub fn decode<E: BorshDeserialize>(&self) -> Result<E, std::io::Error> {
        E::try_from_slice(&self.value.0)
    }

    /// Returns the event key.
    pub fn key(&self) -> &EventKey {
        &self.key
    }

    /// Returns the event value.
    pub fn value(&self) -> &EventValue {
        &self.value
    }
}

/// The key of an [`Event`].
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct EventKey(Vec<u8>);

impl EventKey {
    /// Returns the raw bytes of the key.
    pub fn inner(&self) -> &Vec<u8> {
        &self.0
    }
}

impl PartialEq<&str> for EventKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

/// The value of an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct EventValue(Vec<u8>);

impl EventValue {
    /// Returns the raw bytes of the value.
    pub fn inner(&self) -> &Vec<u8> {
        &self.0
    }
}
