use std::fmt;

use thiserror::Error;

use crate::WorkflowStatus;

/// Who is allowed to make a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The admin set at genesis.
    Admin,
    /// Any voter the admin registered.
    RegisteredVoter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("the admin"),
            Role::RegisteredVoter => f.write_str("a registered voter"),
        }
    }
}

/// Reasons a voting call or query is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VotingError {
    /// The caller does not hold the role the operation needs.
    #[error("Caller {sender} is not {required}")]
    Unauthorized {
        /// The rejected caller.
        sender: String,
        /// The role the operation needs.
        required: Role,
    },
    /// The operation is not allowed in the current phase.
    #[error("Operation requires phase {expected}, current phase is {actual}")]
    InvalidPhase {
        /// The phase the operation needs.
        expected: WorkflowStatus,
        /// The phase the workflow is in.
        actual: WorkflowStatus,
    },
    /// The voter is already in the registry.
    #[error("Voter {voter} is already registered")]
    AlreadyRegistered {
        /// The voter.
        voter: String,
    },
    /// The voter already cast their vote.
    #[error("Voter {voter} has already voted")]
    AlreadyVoted {
        /// The voter.
        voter: String,
    },
    /// The call arguments are not acceptable.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// What is wrong with the input.
        reason: String,
    },
    /// The requested result does not exist (yet).
    #[error("Not available: {reason}")]
    NotYetAvailable {
        /// Why there is no result.
        reason: String,
    },
}
