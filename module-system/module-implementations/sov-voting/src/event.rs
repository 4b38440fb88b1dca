use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{ProposalId, WorkflowStatus};

/// Notifications recorded by successful calls. Each one is stored in the
/// working set under its [`VotingEvent::name`], borsh encoded.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, PartialEq, Clone)]
pub enum VotingEvent<C: sov_modules_api::Context> {
    /// The admin registered a voter.
    VoterRegistered {
        /// The new voter.
        voter: C::Address,
    },
    /// The workflow moved to the next phase.
    WorkflowStatusChange {
        /// The phase that ended.
        previous_status: WorkflowStatus,
        /// The phase that started.
        new_status: WorkflowStatus,
    },
    /// A voter registered a proposal.
    ProposalRegistered {
        /// Id of the new proposal.
        proposal_id: ProposalId,
    },
    /// A voter cast their vote.
    Voted {
        /// The voter.
        voter: C::Address,
        /// The proposal they voted for.
        proposal_id: ProposalId,
    },
}

impl<C: sov_modules_api::Context> VotingEvent<C> {
    /// The event key the event is recorded under.
    pub fn name(&self) -> &'static str {
        match self {
            VotingEvent::VoterRegistered { .. } => "VoterRegistered",
            VotingEvent::WorkflowStatusChange { .. } => "WorkflowStatusChange",
            VotingEvent::ProposalRegistered { .. } => "ProposalRegistered",
            VotingEvent::Voted { .. } => "Voted",
        }
    }
}
