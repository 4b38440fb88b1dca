#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod call;
mod error;
mod event;
mod genesis;
mod query;
mod types;

pub use call::CallMessage;
pub use error::{Role, VotingError};
pub use event::VotingEvent;
pub use genesis::VotingConfig;
use sov_modules_api::{CallResponse, Error, ModuleInfo, ModulePrefix};
use sov_state::{StateMap, StateValue, StateVec, WorkingSet};
pub use types::{
    compute_winner, Proposal, ProposalId, Voter, VotingStatus, Winner, WorkflowStatus,
};

const MODULE_NAME: &str = "Voting";

/// The voting workflow module. The admin, the current phase and every
/// registry live in state under this module's prefix, so the struct itself
/// only carries the handles to them.
#[derive(Clone, Debug)]
pub struct Voting<C: sov_modules_api::Context> {
    /// The address of the module.
    pub address: C::Address,

    /// The only caller allowed to register voters and move the workflow.
    pub(crate) admin: StateValue<C::Address>,

    /// The current phase.
    pub(crate) workflow_status: StateValue<WorkflowStatus>,

    /// Every voter ever registered.
    pub(crate) voters: StateMap<C::Address, Voter>,

    /// Size of `voters`.
    pub(crate) registered_voters: StateValue<u64>,

    /// Proposals in registration order, the position is the id.
    pub(crate) proposals: StateVec<Proposal>,

    /// Set once, by the tally, if there was at least one proposal.
    pub(crate) winning_proposal_id: StateValue<ProposalId>,

    /// Number of votes cast.
    pub(crate) number_of_votes: StateValue<u64>,
}

impl<C: sov_modules_api::Context> Default for Voting<C> {
    fn default() -> Self {
        let module_path = module_path!();
        let storage = |name: &'static str| -> sov_state::Prefix {
            ModulePrefix::new_storage(module_path, MODULE_NAME, name).into()
        };

        Self {
            address: ModulePrefix::new_module(module_path, MODULE_NAME)
                .hash()
                .into(),
            admin: StateValue::new(storage("admin")),
            workflow_status: StateValue::new(storage("workflow_status")),
            voters: StateMap::new(storage("voters")),
            registered_voters: StateValue::new(storage("registered_voters")),
            proposals: StateVec::new(storage("proposals")),
            winning_proposal_id: StateValue::new(storage("winning_proposal_id")),
            number_of_votes: StateValue::new(storage("number_of_votes")),
        }
    }
}

impl<C: sov_modules_api::Context> ModuleInfo for Voting<C> {
    type Context = C;

    fn address(&self) -> &C::Address {
        &self.address
    }

    fn prefix(&self) -> ModulePrefix {
        ModulePrefix::new_module(module_path!(), MODULE_NAME)
    }
}

impl<C: sov_modules_api::Context> sov_modules_api::Module for Voting<C> {
    type Context = C;

    type Config = VotingConfig<C>;

    type CallMessage = CallMessage<C>;

    type Event = VotingEvent<C>;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), Error> {
        Ok(self.init_module(config, working_set)?)
    }

    fn call(
        &self,
        msg: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse, Error> {
        match msg {
            CallMessage::RegisterVoter { voter } => {
                Ok(self.register_voter(voter, context, working_set)?)
            }

            CallMessage::StartProposalsRegistration => Ok(self.advance_workflow(
                WorkflowStatus::RegisteringVoters,
                context,
                working_set,
            )?),

            CallMessage::RegisterProposal { description } => {
                Ok(self.register_proposal(description, context, working_set)?)
            }

            CallMessage::EndProposalsRegistration => Ok(self.advance_workflow(
                WorkflowStatus::ProposalsRegistrationStarted,
                context,
                working_set,
            )?),

            CallMessage::StartVotingSession => Ok(self.advance_workflow(
                WorkflowStatus::ProposalsRegistrationEnded,
                context,
                working_set,
            )?),

            CallMessage::Vote { proposal_id } => {
                Ok(self.vote(proposal_id, context, working_set)?)
            }

            CallMessage::EndVotingSession => Ok(self.advance_workflow(
                WorkflowStatus::VotingSessionStarted,
                context,
                working_set,
            )?),

            CallMessage::TallyVotes => Ok(self.tally_votes(context, working_set)?),
        }
    }
}
