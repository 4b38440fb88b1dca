//! Read-only queries against the voting module.
use serde_json::{json, Value};
use sov_modules_api::Address;
use sov_state::{FileStorage, WorkingSet};
use sov_voting::{ProposalId, Voting};

use crate::Ctx;

#[derive(clap::Subcommand, Debug, Clone, PartialEq)]
/// Read the state of the voting module
pub enum QueryWorkflow {
    /// The current phase and its ordinal
    WorkflowStatus,
    /// The admin address
    Admin,
    /// The registry entry of a voter
    Voter {
        /// Address of the voter
        address: Address,
    },
    /// A single proposal
    Proposal {
        /// Id of the proposal
        proposal_id: ProposalId,
    },
    /// All proposals, in id order
    Proposals,
    /// Id of the winning proposal, once tallied
    WinningProposalId,
    /// Number of votes cast
    NumberOfVotes,
    /// Phase and registry sizes
    Status,
    /// The winning proposal
    Winner,
}

impl QueryWorkflow {
    /// Answers the query as JSON.
    pub fn run(
        self,
        voting: &Voting<Ctx>,
        working_set: &mut WorkingSet<FileStorage>,
    ) -> Result<Value, anyhow::Error> {
        let value = match self {
            QueryWorkflow::WorkflowStatus => {
                let status = voting.workflow_status(working_set);
                json!({ "workflow_status": status, "ordinal": status.ordinal() })
            }
            QueryWorkflow::Admin => json!({ "admin": voting.admin(working_set) }),
            QueryWorkflow::Voter { address } => match voting.voter(&address, working_set) {
                Some(voter) => json!({
                    "is_registered": voter.is_registered,
                    "has_voted": voter.has_voted(),
                    "voted_proposal_id": voter.voted_proposal_id,
                }),
                None => json!({
                    "is_registered": false,
                    "has_voted": false,
                    "voted_proposal_id": null,
                }),
            },
            QueryWorkflow::Proposal { proposal_id } => {
                let proposal = voting
                    .proposal(proposal_id, working_set)
                    .ok_or_else(|| anyhow::anyhow!("Proposal {proposal_id} does not exist"))?;
                serde_json::to_value(proposal)?
            }
            QueryWorkflow::Proposals => serde_json::to_value(voting.proposals(working_set))?,
            QueryWorkflow::WinningProposalId => {
                json!({ "winning_proposal_id": voting.winning_proposal_id(working_set) })
            }
            QueryWorkflow::NumberOfVotes => {
                json!({ "number_of_votes": voting.number_of_votes(working_set) })
            }
            QueryWorkflow::Status => serde_json::to_value(voting.status(working_set))?,
            QueryWorkflow::Winner => serde_json::to_value(voting.get_winner(working_set)?)?,
        };
        Ok(value)
    }
}
