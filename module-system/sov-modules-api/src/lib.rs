//! The interface between modules and whatever drives them: addresses, call
//! contexts, the [`Module`] trait and all-or-nothing call execution.

#![deny(missing_docs)]

mod bech32;
pub mod default_context;
mod dispatch;
mod error;
mod prefix;
mod response;
pub mod utils;


use core::fmt::{self, Debug, Display};
use core::hash::Hash;
use core::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
pub use dispatch::{execute_call, CallOutcome};
pub use error::Error;
pub use prefix::ModulePrefix;
pub use response::CallResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sov_state::{Storage, WorkingSet};

pub use crate::bech32::Bech32ParseError;
use crate::bech32::{bech32m_to_decoded_vec, vec_to_bech32m, HRP};

/// A 32 byte account identifier. Displayed and parsed as a bech32m string
/// with the `sov` human readable part.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; 32]);

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<'a> TryFrom<&'a [u8]> for Address {
    type Error = anyhow::Error;

    fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
        let bytes = <[u8; 32]>::try_from(bytes)
            .map_err(|_| anyhow::anyhow!("Expected 32 bytes, got {}", bytes.len()))?;
        Ok(Self(bytes))
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Address {
    type Err = Bech32ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hrp, data) = bech32m_to_decoded_vec(s)?;
        if hrp != HRP {
            return Err(Bech32ParseError::WrongHRP(hrp));
        }
        let bytes = <[u8; 32]>::try_from(data.as_slice())
            .map_err(|_| Bech32ParseError::InvalidLength(data.len()))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = Bech32ParseError;

    fn try_from(addr: String) -> Result<Self, Self::Error> {
        Address::from_str(&addr)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.to_string()
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Encoding 32 bytes under a fixed, valid HRP cannot fail.
        match vec_to_bech32m(&self.0, HRP) {
            Ok(encoded) => f.write_str(&encoded),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

/// The primitive types a module is written against. Modules stay generic
/// over it, so the same module code can run over any storage.
pub trait Spec {
    /// Identifies callers and modules.
    type Address: Clone
        + Debug
        + Display
        + Eq
        + Hash
        + AsRef<[u8]>
        + From<[u8; 32]>
        + BorshSerialize
        + BorshDeserialize
        + Serialize
        + DeserializeOwned
        + Send
        + Sync;

    /// Durable state the modules read and write.
    type Storage: Storage + Send + Sync;
}

/// Per call information handed to a module. The sender is authenticated by
/// whoever builds the context, modules take it at face value.
pub trait Context: Spec + Clone + Debug + PartialEq {
    /// Who made the call.
    fn sender(&self) -> &Self::Address;

    /// A context for a call made by `sender`.
    fn new(sender: Self::Address) -> Self;
}

/// A unit of state and logic. All writes go through [`Module::call`], reads
/// go through plain query methods on the module type.
pub trait Module {
    /// The context calls are made with.
    type Context: Context;

    /// Input of [`Module::genesis`].
    type Config;

    /// Everything a caller can ask the module to do.
    type CallMessage: Debug + BorshSerialize + BorshDeserialize;

    /// Notifications recorded by accepted calls.
    type Event: Debug + BorshSerialize + BorshDeserialize;

    /// Writes the initial state. Runs once, before any call.
    fn genesis(
        &self,
        _config: &Self::Config,
        _working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), Error> {
        Ok(())
    }

    /// Handles one message. On error the caller is expected to discard the
    /// working set, see [`execute_call`].
    fn call(
        &self,
        message: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<CallResponse, Error>;
}

/// Identity of a module: where it lives and which prefix its state uses.
pub trait ModuleInfo {
    /// The context the module runs with.
    type Context: Context;

    /// The address of the module.
    fn address(&self) -> &<Self::Context as Spec>::Address;

    /// The prefix every state variable of the module starts with.
    fn prefix(&self) -> ModulePrefix;
}
