use std::path::Path;
use std::process::ExitCode;

use crate::deploy::DeploymentResult;
use crate::error::DeployError;
use crate::network::{self, NetworkProfile};

/// Prints the terminal state of a successful deployment.
pub fn success(result: &DeploymentResult, profile: &NetworkProfile, explorer_key: Option<&str>) {
    println!("network: {}", profile.id);
    println!("deployer address: {:?}", result.deployer_address);
    println!("contract address: {:?}", result.contract_address);
    println!("transaction hash: {:?}", result.transaction_hash);
    if let (Some(url), Some(_)) = (profile.explorer_url, explorer_key) {
        println!("verify at: {url}/address/{:?}#code", result.contract_address);
    }
}

/// Prints the failure and maps its kind to the process exit status.
pub fn failure(err: &DeployError) -> ExitCode {
    eprintln!("deployment failed: {err}");
    match err {
        DeployError::UnknownNetwork(_) => {
            eprintln!("registered networks: {}", network::known_ids().join(", "));
        }
        DeployError::ConfirmationFailed { tx_hash, .. } => {
            eprintln!(
                "transaction {tx_hash:?} was submitted and may still be mined, \
                 inspect it before resubmitting"
            );
        }
        _ => {}
    }
    ExitCode::from(err.exit_code())
}

/// Best-effort JSON copy of the result for downstream tooling. A write
/// failure cannot undo the deployment, so it only downgrades the report.
pub fn write_json(result: &DeploymentResult, path: &Path) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => match std::fs::write(path, json) {
            Ok(()) => log::info!("deployment result written to {}", path.display()),
            Err(e) => eprintln!("could not write {}: {e}", path.display()),
        },
        Err(e) => eprintln!("could not encode the deployment result: {e}"),
    }
}
