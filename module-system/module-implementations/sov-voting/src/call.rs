use anyhow::{anyhow, ensure, Result};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use sov_modules_api::{CallResponse, Context};
use sov_state::WorkingSet;
use tracing::info;

use crate::{
    compute_winner, Proposal, ProposalId, Role, Voter, Voting, VotingError, VotingEvent,
    WorkflowStatus,
};

/// Call actions supported by the module.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, PartialEq, Clone)]
pub enum CallMessage<C: Context> {
    /// Adds a voter to the registry. Admin only.
    RegisterVoter {
        /// The voter to register.
        voter: C::Address,
    },
    /// Opens proposal registration. Admin only.
    StartProposalsRegistration,
    /// Appends a proposal. Registered voters only.
    RegisterProposal {
        /// The proposal text, must not be empty.
        description: String,
    },
    /// Closes proposal registration. Admin only.
    EndProposalsRegistration,
    /// Opens the voting session. Admin only.
    StartVotingSession,
    /// Votes for a proposal. Registered voters only, once each.
    Vote {
        /// The proposal voted for.
        proposal_id: ProposalId,
    },
    /// Closes the voting session. Admin only.
    EndVotingSession,
    /// Counts the votes and records the winner. Admin only.
    TallyVotes,
}

impl<C: Context> Voting<C> {
    /// Adds `voter` to the registry.
    pub(crate) fn register_voter(
        &self,
        voter: C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_admin(context, working_set)?;
        self.exit_if_not_in_phase(WorkflowStatus::RegisteringVoters, working_set)?;

        let already_registered = self
            .voters
            .get(&voter, working_set)
            .is_some_and(|v| v.is_registered);
        ensure!(
            !already_registered,
            VotingError::AlreadyRegistered {
                voter: voter.to_string()
            }
        );

        let registered_voters = self
            .registered_voters
            .get_or_err(working_set)?
            .checked_add(1)
            .ok_or(anyhow!("Registered voters count overflow"))?;

        self.voters.set(&voter, &Voter::registered(), working_set);
        self.registered_voters.set(&registered_voters, working_set);

        info!(%voter, "Voter registered");
        self.emit(VotingEvent::VoterRegistered { voter }, working_set)?;
        Ok(CallResponse::default())
    }

    /// Moves the workflow from `from` to the phase right after it.
    pub(crate) fn advance_workflow(
        &self,
        from: WorkflowStatus,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_admin(context, working_set)?;
        self.exit_if_not_in_phase(from, working_set)?;
        self.set_next_status(from, working_set)?;
        Ok(CallResponse::default())
    }

    /// Appends a proposal on behalf of a registered voter.
    pub(crate) fn register_proposal(
        &self,
        description: String,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_registered(context, working_set)?;
        self.exit_if_not_in_phase(WorkflowStatus::ProposalsRegistrationStarted, working_set)?;
        ensure!(
            !description.is_empty(),
            VotingError::InvalidInput {
                reason: "proposal description must not be empty".to_owned()
            }
        );

        let proposal_id = self.proposals.push(&Proposal::new(description), working_set);

        info!(sender = %context.sender(), proposal_id, "Proposal registered");
        self.emit(VotingEvent::ProposalRegistered { proposal_id }, working_set)?;
        Ok(CallResponse::default())
    }

    /// Records the vote of the caller for `proposal_id`.
    pub(crate) fn vote(
        &self,
        proposal_id: ProposalId,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        let mut voter = self.exit_if_not_registered(context, working_set)?;
        self.exit_if_not_in_phase(WorkflowStatus::VotingSessionStarted, working_set)?;
        ensure!(
            !voter.has_voted(),
            VotingError::AlreadyVoted {
                voter: context.sender().to_string()
            }
        );

        let mut proposal = self.proposals.get(proposal_id, working_set).ok_or_else(|| {
            VotingError::InvalidInput {
                reason: format!("proposal {proposal_id} does not exist"),
            }
        })?;

        proposal.vote_count = proposal
            .vote_count
            .checked_add(1)
            .ok_or(anyhow!("Vote count overflow"))?;
        let number_of_votes = self
            .number_of_votes
            .get_or_err(working_set)?
            .checked_add(1)
            .ok_or(anyhow!("Number of votes overflow"))?;

        voter.voted_proposal_id = Some(proposal_id);
        self.voters.set(context.sender(), &voter, working_set);
        self.proposals.set(proposal_id, &proposal, working_set)?;
        self.number_of_votes.set(&number_of_votes, working_set);

        info!(sender = %context.sender(), proposal_id, "Vote recorded");
        self.emit(
            VotingEvent::Voted {
                voter: context.sender().clone(),
                proposal_id,
            },
            working_set,
        )?;
        Ok(CallResponse::default())
    }

    /// Picks the winner and closes the workflow. With no proposals there is
    /// no winner, the workflow is closed all the same.
    pub(crate) fn tally_votes(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_admin(context, working_set)?;
        self.exit_if_not_in_phase(WorkflowStatus::VotingSessionEnded, working_set)?;

        let vote_counts: Vec<u64> = self
            .proposals
            .iter(working_set)
            .map(|proposal| proposal.vote_count)
            .collect();

        match compute_winner(vote_counts) {
            Some(winning_proposal_id) => {
                self.winning_proposal_id
                    .set(&winning_proposal_id, working_set);
                info!(winning_proposal_id, "Votes tallied");
            }
            None => info!("Votes tallied without any proposal"),
        }

        self.set_next_status(WorkflowStatus::VotingSessionEnded, working_set)?;
        Ok(CallResponse::default())
    }

    fn set_next_status(
        &self,
        previous_status: WorkflowStatus,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let new_status = previous_status
            .next()
            .ok_or(anyhow!("No phase follows {previous_status}"))?;
        self.workflow_status.set(&new_status, working_set);

        info!(%previous_status, %new_status, "Workflow status changed");
        self.emit(
            VotingEvent::WorkflowStatusChange {
                previous_status,
                new_status,
            },
            working_set,
        )?;
        Ok(())
    }

    fn emit(
        &self,
        event: VotingEvent<C>,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        working_set.add_typed_event(event.name(), &event)?;
        Ok(())
    }

    fn exit_if_not_admin(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let admin = self.admin.get_or_err(working_set)?;

        ensure!(
            &admin == context.sender(),
            VotingError::Unauthorized {
                sender: context.sender().to_string(),
                required: Role::Admin,
            }
        );
        Ok(())
    }

    fn exit_if_not_registered(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Voter> {
        self.voters
            .get(context.sender(), working_set)
            .filter(|voter| voter.is_registered)
            .ok_or_else(|| {
                VotingError::Unauthorized {
                    sender: context.sender().to_string(),
                    required: Role::RegisteredVoter,
                }
                .into()
            })
    }

    fn exit_if_not_in_phase(
        &self,
        expected: WorkflowStatus,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let actual = self.workflow_status.get_or_err(working_set)?;

        ensure!(
            actual == expected,
            VotingError::InvalidPhase { expected, actual }
        );
        Ok(())
    }
}
