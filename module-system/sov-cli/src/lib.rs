//! Library side of the `sov-voting` binary: configuration, subcommands and a
//! [`VotingNode`] tying the voting module to durable storage.

pub mod config;
pub mod workflows;

pub use config::{from_toml_path, StorageConfig, VotingCliConfig};
use serde_json::{json, Value};
use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::{execute_call, Address, Context, Error, Module};
use sov_state::{Event, FileStorage, StateCheckpoint, Storage, WorkingSet};
use sov_voting::{CallMessage, Voting, VotingConfig, VotingEvent};
use tracing::info;
pub use workflows::{CallWorkflow, QueryWorkflow};

/// The context every call is made with.
pub type Ctx = DefaultContext;

/// The voting module on top of a [`FileStorage`]. Every accepted call is
/// committed before the next one is read.
pub struct VotingNode {
    voting: Voting<Ctx>,
    storage: FileStorage,
}

impl VotingNode {
    /// Opens, or creates, the storage described by `config`.
    pub fn open(config: &StorageConfig) -> Result<Self, anyhow::Error> {
        let storage = FileStorage::with_config(config.clone())?;
        Ok(Self {
            voting: Voting::default(),
            storage,
        })
    }

    /// Runs genesis with `admin` and commits it. Fails if the storage is
    /// already initialized.
    pub fn init(&self, admin: Address) -> Result<Value, anyhow::Error> {
        let mut working_set = WorkingSet::new(self.storage.clone());
        self.voting
            .genesis(&VotingConfig { admin }, &mut working_set)
            .map_err(|Error::ModuleError(err)| err)?;

        self.storage.commit(working_set.checkpoint().freeze())?;
        info!(path = %self.storage.path().display(), "Voting storage initialized");
        Ok(json!({ "admin": admin }))
    }

    /// Applies one call from `caller`. The call is committed only if it is
    /// accepted, and the events it emitted are returned.
    pub fn call(&self, caller: Address, msg: CallMessage<Ctx>) -> Result<Value, anyhow::Error> {
        let checkpoint = StateCheckpoint::new(self.storage.clone());
        let (outcome, mut checkpoint) =
            execute_call(&self.voting, msg, &Ctx::new(caller), checkpoint);

        outcome.result.map_err(|Error::ModuleError(err)| err)?;
        self.storage.commit(checkpoint.freeze())?;

        let events = outcome
            .events
            .iter()
            .map(decode_event)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(json!({ "events": events }))
    }

    /// Answers a read-only query.
    pub fn query(&self, query: QueryWorkflow) -> Result<Value, anyhow::Error> {
        let mut working_set = WorkingSet::new(self.storage.clone());
        query.run(&self.voting, &mut working_set)
    }
}

fn decode_event(event: &Event) -> Result<Value, anyhow::Error> {
    let event = event.decode::<VotingEvent<Ctx>>()?;
    Ok(serde_json::to_value(event)?)
}
