use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::utils::generate_address;
use sov_modules_api::{execute_call, Address, CallOutcome, Context, Error, Module};
use sov_state::{FileStorage, StateCheckpoint, Storage, WorkingSet};
use sov_voting::{CallMessage, Voting, VotingConfig, VotingError, WorkflowStatus};
use tempfile::TempDir;

pub type C = DefaultContext;

/// A genesis-initialized [`Voting`] module on top of a fresh on-disk storage.
/// Calls go through [`execute_call`], so rejected calls are reverted.
pub struct VotingRunner {
    pub voting: Voting<C>,
    pub admin: Address,
    pub storage: FileStorage,
    checkpoint: Option<StateCheckpoint<FileStorage>>,
    _tmpdir: TempDir,
}

impl VotingRunner {
    pub fn new() -> Self {
        let tmpdir = tempfile::tempdir().unwrap();
        let storage = FileStorage::with_path(tmpdir.path()).unwrap();
        let voting = Voting::<C>::default();
        let admin = generate_address::<C>("admin");

        let mut working_set = WorkingSet::new(storage.clone());
        voting
            .genesis(&VotingConfig { admin }, &mut working_set)
            .unwrap();

        Self {
            voting,
            admin,
            storage,
            checkpoint: Some(working_set.checkpoint()),
            _tmpdir: tmpdir,
        }
    }

    pub fn call(&mut self, sender: &Address, msg: CallMessage<C>) -> CallOutcome {
        let checkpoint = self.checkpoint.take().unwrap();
        let (outcome, checkpoint) =
            execute_call(&self.voting, msg, &C::new(*sender), checkpoint);
        self.checkpoint = Some(checkpoint);
        outcome
    }

    pub fn admin_call(&mut self, msg: CallMessage<C>) -> CallOutcome {
        let admin = self.admin;
        self.call(&admin, msg)
    }

    pub fn query<T>(&mut self, f: impl FnOnce(&Voting<C>, &mut WorkingSet<FileStorage>) -> T) -> T {
        let mut working_set = self.checkpoint.take().unwrap().to_revertable();
        let result = f(&self.voting, &mut working_set);
        self.checkpoint = Some(working_set.revert());
        result
    }

    #[allow(dead_code)]
    pub fn commit(&mut self) {
        let checkpoint = self.checkpoint.as_mut().unwrap();
        self.storage.commit(checkpoint.freeze()).unwrap();
    }

    pub fn workflow_status(&mut self) -> WorkflowStatus {
        self.query(|voting, ws| voting.workflow_status(ws))
    }

    pub fn register_voters(&mut self, names: &[&str]) -> Vec<Address> {
        names
            .iter()
            .map(|name| {
                let voter = generate_address::<C>(name);
                self.admin_call(CallMessage::RegisterVoter { voter })
                    .result
                    .unwrap();
                voter
            })
            .collect()
    }

    /// Walks the workflow forward, as the admin, until it reaches `target`.
    pub fn advance_to(&mut self, target: WorkflowStatus) {
        while self.workflow_status() < target {
            let next = self.workflow_status().next().unwrap();
            self.admin_call(transition_to(next)).result.unwrap();
        }
        assert_eq!(self.workflow_status(), target);
    }
}

/// The admin call that moves the workflow into `status`.
pub fn transition_to(status: WorkflowStatus) -> CallMessage<C> {
    match status {
        WorkflowStatus::RegisteringVoters => panic!("No transition leads to the initial phase"),
        WorkflowStatus::ProposalsRegistrationStarted => CallMessage::StartProposalsRegistration,
        WorkflowStatus::ProposalsRegistrationEnded => CallMessage::EndProposalsRegistration,
        WorkflowStatus::VotingSessionStarted => CallMessage::StartVotingSession,
        WorkflowStatus::VotingSessionEnded => CallMessage::EndVotingSession,
        WorkflowStatus::VotesTallied => CallMessage::TallyVotes,
    }
}

/// Extracts the [`VotingError`] a rejected call failed with.
#[allow(dead_code)]
pub fn voting_error(outcome: CallOutcome) -> VotingError {
    assert!(outcome.events.is_empty());
    let Error::ModuleError(err) = outcome.result.unwrap_err();
    err.downcast::<VotingError>().unwrap()
}
