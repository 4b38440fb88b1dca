use sha2::{Digest, Sha256};

const SEPARATOR: u8 = b'/';

/// A unique identifier for a module, or for one state variable of a module.
/// Converts into the [`sov_state::Prefix`] the state containers are keyed by.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ModulePrefix {
    module_path: &'static str,
    module_name: &'static str,
    storage_name: Option<&'static str>,
}

impl ModulePrefix {
    /// Prefix of the state variable `storage_name` of a module.
    pub fn new_storage(
        module_path: &'static str,
        module_name: &'static str,
        storage_name: &'static str,
    ) -> Self {
        Self {
            module_path,
            module_name,
            storage_name: Some(storage_name),
        }
    }

    /// Prefix of the module itself.
    pub fn new_module(module_path: &'static str, module_name: &'static str) -> Self {
        Self {
            module_path,
            module_name,
            storage_name: None,
        }
    }

    /// `module_path/module_name/` followed by `storage_name/` for state
    /// variables.
    fn combine_prefix(&self) -> Vec<u8> {
        [
            Some(self.module_path),
            Some(self.module_name),
            self.storage_name,
        ]
        .into_iter()
        .flatten()
        .flat_map(|segment| segment.bytes().chain([SEPARATOR]))
        .collect()
    }

    /// Sha256 of the combined prefix. Used to derive module addresses.
    pub fn hash(&self) -> [u8; 32] {
        Sha256::digest(self.combine_prefix()).into()
    }
}

impl From<ModulePrefix> for sov_state::Prefix {
    fn from(prefix: ModulePrefix) -> Self {
        sov_state::Prefix::new(prefix.combine_prefix())
    }
}
