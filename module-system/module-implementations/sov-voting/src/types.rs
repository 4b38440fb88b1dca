use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Index of a proposal in the order it was registered, starting at zero.
pub type ProposalId = usize;

/// The phases of the workflow. The only way between them is
/// [`WorkflowStatus::next`], one step forward at a time.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub enum WorkflowStatus {
    /// The admin registers voters.
    #[default]
    RegisteringVoters,
    /// Registered voters submit proposals.
    ProposalsRegistrationStarted,
    /// Proposals are closed, voting has not started yet.
    ProposalsRegistrationEnded,
    /// Registered voters cast their vote.
    VotingSessionStarted,
    /// Voting is closed, votes are not counted yet.
    VotingSessionEnded,
    /// The winner is known.
    VotesTallied,
}

impl WorkflowStatus {
    /// Every phase, in workflow order.
    pub const ALL: [WorkflowStatus; 6] = [
        WorkflowStatus::RegisteringVoters,
        WorkflowStatus::ProposalsRegistrationStarted,
        WorkflowStatus::ProposalsRegistrationEnded,
        WorkflowStatus::VotingSessionStarted,
        WorkflowStatus::VotingSessionEnded,
        WorkflowStatus::VotesTallied,
    ];

    /// The phase that follows this one, `None` for the final phase.
    pub fn next(self) -> Option<WorkflowStatus> {
        match self {
            WorkflowStatus::RegisteringVoters => Some(WorkflowStatus::ProposalsRegistrationStarted),
            WorkflowStatus::ProposalsRegistrationStarted => {
                Some(WorkflowStatus::ProposalsRegistrationEnded)
            }
            WorkflowStatus::ProposalsRegistrationEnded => Some(WorkflowStatus::VotingSessionStarted),
            WorkflowStatus::VotingSessionStarted => Some(WorkflowStatus::VotingSessionEnded),
            WorkflowStatus::VotingSessionEnded => Some(WorkflowStatus::VotesTallied),
            WorkflowStatus::VotesTallied => None,
        }
    }

    /// Stable position of the phase in the workflow, `0..=5`. This is also
    /// the borsh encoding of the phase.
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Registry entry of a voter.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Voter {
    /// Whether the admin registered this voter.
    pub is_registered: bool,
    /// The proposal this voter voted for, once they did.
    pub voted_proposal_id: Option<ProposalId>,
}

impl Voter {
    pub(crate) fn registered() -> Self {
        Self {
            is_registered: true,
            voted_proposal_id: None,
        }
    }

    /// Whether a vote was recorded for this voter.
    pub fn has_voted(&self) -> bool {
        self.voted_proposal_id.is_some()
    }
}

/// A proposal and the votes it received so far.
#[derive(
    Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Proposal {
    /// Free text submitted by the voter, never empty.
    pub description: String,
    /// Number of votes cast for this proposal.
    pub vote_count: u64,
}

impl Proposal {
    pub(crate) fn new(description: String) -> Self {
        Self {
            description,
            vote_count: 0,
        }
    }
}

/// The proposal that won the tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    /// Id of the winning proposal.
    pub proposal_id: ProposalId,
    /// Its description.
    pub description: String,
    /// The votes it received.
    pub vote_count: u64,
}

/// Summary of the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingStatus {
    /// The current phase.
    pub workflow_status: WorkflowStatus,
    /// Number of registered voters.
    pub registered_voters: u64,
    /// Number of registered proposals.
    pub proposals: usize,
    /// Number of votes cast.
    pub votes_cast: u64,
}

/// Picks the winner among proposals given their vote counts in id order.
///
/// The first proposal seeds the maximum and a later one only takes over with
/// strictly more votes, so ties go to the lowest id. Returns `None` when
/// there is no proposal at all.
pub fn compute_winner<I>(vote_counts: I) -> Option<ProposalId>
where
    I: IntoIterator<Item = u64>,
{
    let mut leader: Option<(ProposalId, u64)> = None;
    for (id, count) in vote_counts.into_iter().enumerate() {
        match leader {
            Some((_, max)) if count <= max => {}
            _ => leader = Some((id, count)),
        }
    }
    leader.map(|(id, _)| id)
}
