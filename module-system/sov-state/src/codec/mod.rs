//! Serialization and deserialization -related logic.

mod borsh_codec;

pub use borsh_codec::BorshCodec;

/// A trait for types that can serialize and deserialize values for storage
/// access.
pub trait StateValueCodec<V> {
    /// Error type that can arise during deserialization.
    type Error: std::fmt::Debug;

    /// Serializes a value into a bytes vector.
    ///
    /// This method **must** not panic as all instances of the value type are
    /// supposed to be serializable.
    fn encode_value(&self, value: &V) -> Vec<u8>;

    /// Tries to deserialize a value from a bytes slice, and returns a
    /// [`Result`] with either the deserialized value or an error.
    fn try_decode_value(&self, bytes: &[u8]) -> Result<V, Self::Error>;

    /// Deserializes a value from a bytes slice.
    ///
    /// # Panics
    /// Panics if the call to [`StateValueCodec::try_decode_value`] fails. A
    /// value that was written by the same codec always decodes, so a failure
    /// here means the storage is corrupted.
    fn decode_value_unwrap(&self, bytes: &[u8]) -> V {
        self.try_decode_value(bytes).unwrap_or_else(|err| {
            panic!(
                "Failed to decode value 0x{}, error: {:?}",
                hex::encode(bytes),
                err
            )
        })
    }
}

/// A trait for types that can serialize keys for storage access.
///
/// Unlike [`StateValueCodec`], keys are never decoded back.
pub trait StateKeyCodec<K: ?Sized> {
    /// Serializes a key into a bytes vector.
    ///
    /// Equal keys **MUST** serialize to the same byte sequence, independently
    /// of the platform the code runs on.
    fn encode_key(&self, key: &K) -> Vec<u8>;
}
