//! Calls into the voting module.
use sov_modules_api::Address;
use sov_voting::{CallMessage, ProposalId};

use crate::Ctx;

#[derive(clap::Subcommand, Debug, Clone, PartialEq)]
/// Submit a call to the voting module
pub enum CallWorkflow {
    /// Register a voter (admin)
    RegisterVoter {
        /// Address of the voter
        voter: Address,
    },
    /// Open proposal registration (admin)
    StartProposalsRegistration,
    /// Register a proposal (registered voter)
    RegisterProposal {
        /// Text of the proposal
        description: String,
    },
    /// Close proposal registration (admin)
    EndProposalsRegistration,
    /// Open the voting session (admin)
    StartVotingSession,
    /// Vote for a proposal (registered voter, once)
    Vote {
        /// Id of the proposal
        proposal_id: ProposalId,
    },
    /// Close the voting session (admin)
    EndVotingSession,
    /// Count the votes (admin)
    TallyVotes,
}

impl From<CallWorkflow> for CallMessage<Ctx> {
    fn from(workflow: CallWorkflow) -> Self {
        match workflow {
            CallWorkflow::RegisterVoter { voter } => CallMessage::RegisterVoter { voter },
            CallWorkflow::StartProposalsRegistration => CallMessage::StartProposalsRegistration,
            CallWorkflow::RegisterProposal { description } => {
                CallMessage::RegisterProposal { description }
            }
            CallWorkflow::EndProposalsRegistration => CallMessage::EndProposalsRegistration,
            CallWorkflow::StartVotingSession => CallMessage::StartVotingSession,
            CallWorkflow::Vote { proposal_id } => CallMessage::Vote { proposal_id },
            CallWorkflow::EndVotingSession => CallMessage::EndVotingSession,
            CallWorkflow::TallyVotes => CallMessage::TallyVotes,
        }
    }
}
