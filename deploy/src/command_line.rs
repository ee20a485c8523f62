use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use ethers::types::H160;

use crate::artifact;
use crate::credentials;
use crate::deploy::Deploy;
use crate::error::DeployError;
use crate::network;
use crate::report;

/// The one contract this tool deploys.
pub const CONTRACT_NAME: &str = "PrescriptionNFT";

#[derive(Debug, Parser)]
#[clap(name = "hippocard-contracts", about = "Deploy the PrescriptionNFT registry contract")]
pub struct CommandLine {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit the contract-creation transaction and wait for it to be mined
    Deploy(DeployArgs),
}

#[derive(Debug, Args)]
struct DeployArgs {
    /// Registered network profile id (local, amoy, sepolia)
    #[clap(short, long, env = "HIPPOCARD_NETWORK")]
    network: String,

    /// Directory holding the compiled contract artifacts
    #[clap(long, default_value = "compiled-contracts")]
    artifact_dir: PathBuf,

    /// Initial owner passed to the constructor, defaults to the deployer
    #[clap(long)]
    initial_owner: Option<H160>,

    /// Give up waiting for confirmation after this many seconds
    #[clap(long)]
    confirmation_timeout: Option<u64>,

    /// Write the deployment result to this file as JSON
    #[clap(short, long)]
    output: Option<PathBuf>,
}

impl CommandLine {
    pub async fn execute(self) -> Result<(), DeployError> {
        match self.command {
            Command::Deploy(args) => args.run().await,
        }
    }
}

impl DeployArgs {
    async fn run(self) -> Result<(), DeployError> {
        let profile = network::resolve(&self.network)?;
        let credential = credentials::resolve(profile)?;
        let explorer_key = credentials::resolve_explorer_key(profile);
        let contract = artifact::load(&self.artifact_dir, CONTRACT_NAME)?;

        let timeout = self.confirmation_timeout.map(Duration::from_secs);
        let deploy = Deploy::new(profile, &credential, timeout).await?;
        let result = deploy.run(contract, self.initial_owner).await?;

        report::success(&result, profile, explorer_key.as_deref());
        if let Some(path) = &self.output {
            report::write_json(&result, path);
        }
        Ok(())
    }
}
