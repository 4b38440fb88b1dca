use sov_state::{Event, StateCheckpoint};
use tracing::debug;

use crate::{CallResponse, Context, Error, Module, Spec};

/// What came out of a single [`execute_call`].
#[derive(Debug)]
pub struct CallOutcome {
    /// The module's verdict on the call.
    pub result: Result<CallResponse, Error>,
    /// Events recorded by the call. Always empty when `result` is an error.
    pub events: Vec<Event>,
}

/// Runs one call against `checkpoint` with all-or-nothing semantics: a call
/// that succeeds has its writes folded into the returned checkpoint, a call
/// that fails leaves the checkpoint exactly as it was and emits no events.
pub fn execute_call<M: Module>(
    module: &M,
    message: M::CallMessage,
    context: &M::Context,
    checkpoint: StateCheckpoint<<M::Context as Spec>::Storage>,
) -> (
    CallOutcome,
    StateCheckpoint<<M::Context as Spec>::Storage>,
) {
    let mut working_set = checkpoint.to_revertable();
    match module.call(message, context, &mut working_set) {
        Ok(response) => {
            let events = working_set.take_events();
            let outcome = CallOutcome {
                result: Ok(response),
                events,
            };
            (outcome, working_set.checkpoint())
        }
        Err(error) => {
            debug!(sender = %context.sender(), %error, "Call rejected, reverting");
            let outcome = CallOutcome {
                result: Err(error),
                events: Vec::new(),
            };
            (outcome, working_set.revert())
        }
    }
}
