use bech32::{FromBase32, ToBase32};

pub(crate) const HRP: &str = "sov";

pub(crate) fn vec_to_bech32m(vec: &[u8], hrp: &str) -> Result<String, bech32::Error> {
    let data = vec.to_base32();
    let bech32_addr = bech32::encode(hrp, data, bech32::Variant::Bech32m)?;
    Ok(bech32_addr)
}

pub(crate) fn bech32m_to_decoded_vec(bech32_addr: &str) -> Result<(String, Vec<u8>), Bech32ParseError> {
    let (hrp, data, variant) = bech32::decode(bech32_addr)?;
    if variant != bech32::Variant::Bech32m {
        return Err(Bech32ParseError::WrongVariant);
    }
    let vec = Vec::<u8>::from_base32(&data)?;
    Ok((hrp, vec))
}

/// Error returned when a string is not a valid bech32m encoded address.
#[derive(Debug, thiserror::Error)]
pub enum Bech32ParseError {
    /// The string is not valid bech32.
    #[error("Bech32 error: {0}")]
    Bech32(#[from] bech32::Error),
    /// The string uses the bech32 checksum instead of bech32m.
    #[error("Address must be bech32m encoded")]
    WrongVariant,
    /// The human readable part is not `sov`.
    #[error("Wrong HRP: {0}")]
    WrongHRP(String),
    /// The decoded payload is not 32 bytes long.
    #[error("Invalid address length {0}, should be 32")]
    InvalidLength(usize),
}
