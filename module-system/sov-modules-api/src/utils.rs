//! Helpers for deriving addresses.

use sha2::{Digest, Sha256};

use crate::{Context, Spec};

/// Derives a deterministic address from an arbitrary string, by hashing it.
/// Handy for naming accounts in tests and on the command line.
pub fn generate_address<C: Context>(key: &str) -> <C as Spec>::Address {
    let hash: [u8; 32] = Sha256::digest(key.as_bytes()).into();
    C::Address::from(hash)
}
