//! The `sov-voting` command line tool.

use anyhow::Context as _;
use clap::Parser;
use sov_modules_api::utils::generate_address;
use sov_modules_api::Address;
use sov_voting_cli::{
    from_toml_path, CallWorkflow, Ctx, QueryWorkflow, VotingCliConfig, VotingNode,
};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(clap::Subcommand, Debug)]
pub enum Workflows {
    /// Write the genesis state, with the admin from the config
    Init,
    /// Submit a call on behalf of a caller
    Call {
        /// The address the call is made from
        #[arg(long)]
        caller: Address,
        #[clap(subcommand)]
        call: CallWorkflow,
    },
    /// Read the voting state
    #[clap(subcommand)]
    Query(QueryWorkflow),
    /// Print the address derived from a nickname
    Address {
        /// Any string, e.g. "admin" or "alice"
        nickname: String,
    },
}

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct App {
    /// The path to the voting config.
    #[arg(long, default_value = "voting_config.toml")]
    config_path: String,

    #[clap(subcommand)]
    workflow: Workflows,
}

fn main() -> Result<(), anyhow::Error> {
    // Initializing logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let invocation = App::parse();

    let config_path = invocation.config_path.as_str();
    let output = match invocation.workflow {
        Workflows::Init => {
            let (config, node) = open_node(config_path)?;
            node.init(config.admin)?
        }
        Workflows::Call { caller, call } => open_node(config_path)?.1.call(caller, call.into())?,
        Workflows::Query(query) => open_node(config_path)?.1.query(query)?,
        Workflows::Address { nickname } => {
            serde_json::json!({ "address": generate_address::<Ctx>(&nickname) })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn open_node(config_path: &str) -> Result<(VotingCliConfig, VotingNode), anyhow::Error> {
    info!("Reading voting config from {config_path:?}");
    let config: VotingCliConfig =
        from_toml_path(config_path).context("Failed to read voting configuration")?;
    let node = VotingNode::open(&config.storage).context("Failed to open storage")?;
    Ok((config, node))
}
