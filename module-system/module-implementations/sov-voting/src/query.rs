use sov_state::WorkingSet;

use crate::{
    Proposal, ProposalId, Voter, Voting, VotingError, VotingStatus, Winner, WorkflowStatus,
};

impl<C: sov_modules_api::Context> Voting<C> {
    /// The current phase. Before genesis this is the initial phase.
    pub fn workflow_status(&self, working_set: &mut WorkingSet<C::Storage>) -> WorkflowStatus {
        self.workflow_status.get(working_set).unwrap_or_default()
    }

    /// The admin, once the module is initialized.
    pub fn admin(&self, working_set: &mut WorkingSet<C::Storage>) -> Option<C::Address> {
        self.admin.get(working_set)
    }

    /// The registry entry of `voter`, if the admin registered it.
    pub fn voter(
        &self,
        voter: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Option<Voter> {
        self.voters.get(voter, working_set)
    }

    /// The proposal with the given id.
    pub fn proposal(
        &self,
        proposal_id: ProposalId,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Option<Proposal> {
        self.proposals.get(proposal_id, working_set)
    }

    /// Every proposal, in id order.
    pub fn proposals(&self, working_set: &mut WorkingSet<C::Storage>) -> Vec<Proposal> {
        self.proposals.iter(working_set).collect()
    }

    /// Id of the winning proposal. Only set after a tally over at least one
    /// proposal.
    pub fn winning_proposal_id(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Option<ProposalId> {
        self.winning_proposal_id.get(working_set)
    }

    /// Number of votes cast so far.
    pub fn number_of_votes(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.number_of_votes.get(working_set).unwrap_or_default()
    }

    /// The phase together with the size of each registry.
    pub fn status(&self, working_set: &mut WorkingSet<C::Storage>) -> VotingStatus {
        VotingStatus {
            workflow_status: self.workflow_status(working_set),
            registered_voters: self.registered_voters.get(working_set).unwrap_or_default(),
            proposals: self.proposals.len(working_set),
            votes_cast: self.number_of_votes(working_set),
        }
    }

    /// The winning proposal. Fails until votes are tallied, and for good if
    /// the tally ran without any proposal.
    pub fn get_winner(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Winner, VotingError> {
        let workflow_status = self.workflow_status(working_set);
        if workflow_status != WorkflowStatus::VotesTallied {
            return Err(VotingError::NotYetAvailable {
                reason: format!("votes are not tallied, current phase is {workflow_status}"),
            });
        }

        let proposal_id =
            self.winning_proposal_id(working_set)
                .ok_or_else(|| VotingError::NotYetAvailable {
                    reason: "no proposal was registered".to_owned(),
                })?;
        let proposal = self.proposal(proposal_id, working_set).ok_or_else(|| {
            VotingError::NotYetAvailable {
                reason: format!("winning proposal {proposal_id} is missing"),
            }
        })?;

        Ok(Winner {
            proposal_id,
            description: proposal.description,
            vote_count: proposal.vote_count,
        })
    }
}
