use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use sov_modules_api::Address;
pub use sov_state::config::Config as StorageConfig;

/// Configuration of the `sov-voting` binary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VotingCliConfig {
    /// Admin written at genesis by `init`.
    pub admin: Address,
    /// Where the voting state lives.
    pub storage: StorageConfig,
}

/// Reads toml file as a specific type.
pub fn from_toml_path<P: AsRef<Path>, R: DeserializeOwned>(path: P) -> anyhow::Result<R> {
    let mut contents = String::new();
    {
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;
    }

    let result: R = toml::from_str(&contents)?;

    Ok(result)
}
