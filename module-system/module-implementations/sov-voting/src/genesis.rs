use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use sov_state::WorkingSet;
use tracing::info;

use crate::{Voting, WorkflowStatus};

/// Genesis configuration of the [`Voting`] module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingConfig<C: sov_modules_api::Context> {
    /// The admin for the whole lifetime of the module.
    pub admin: C::Address,
}

impl<C: sov_modules_api::Context> Voting<C> {
    pub(crate) fn init_module(
        &self,
        config: &<Self as sov_modules_api::Module>::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        ensure!(
            self.admin.get(working_set).is_none(),
            "Voting module is already initialized"
        );

        self.admin.set(&config.admin, working_set);
        self.workflow_status
            .set(&WorkflowStatus::RegisteringVoters, working_set);
        self.registered_voters.set(&0, working_set);
        self.number_of_votes.set(&0, working_set);

        info!(admin = %config.admin, "Voting module initialized");
        Ok(())
    }
}
