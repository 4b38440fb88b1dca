//! Subcommands of the `sov-voting` binary.

pub mod call;
pub mod query;

pub use call::CallWorkflow;
pub use query::QueryWorkflow;
