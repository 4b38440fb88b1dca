//! The [`Context`] used by the command line tools and the tests.

use serde::{Deserialize, Serialize};
use sov_state::FileStorage;

use crate::{Address, Context, Spec};

/// A [`Context`] backed by [`FileStorage`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefaultContext {
    /// The authenticated sender of the call.
    pub sender: Address,
}

impl Spec for DefaultContext {
    type Address = Address;
    type Storage = FileStorage;
}

impl Context for DefaultContext {
    fn sender(&self) -> &Self::Address {
        &self.sender
    }

    fn new(sender: Self::Address) -> Self {
        Self { sender }
    }
}
