use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use ethers::abi::Abi;
use ethers::types::Bytes;
use serde::Deserialize;

use crate::error::DeployError;

/// Compiled contract as emitted by the build toolchain: the ABI plus the
/// creation bytecode, in the usual Hardhat artifact layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub abi: Abi,
    pub bytecode: Bytes,
}

/// Looks up the compiled artifact for `name` under `dir`.
///
/// A missing or malformed artifact means the creation transaction cannot be
/// built, so every failure here surfaces as a submission failure.
pub fn load(dir: &Path, name: &str) -> Result<ContractArtifact, DeployError> {
    read(dir, name).map_err(DeployError::SubmissionFailed)
}

fn read(dir: &Path, name: &str) -> anyhow::Result<ContractArtifact> {
    let path = dir.join(format!("{name}.json"));
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("reading contract artifact {}", path.display()))?;
    let artifact: ContractArtifact = serde_json::from_str(&raw)
        .with_context(|| format!("parsing contract artifact {}", path.display()))?;
    if artifact.bytecode.is_empty() {
        return Err(anyhow!("artifact {} carries no creation bytecode", path.display()));
    }
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ARTIFACT: &str = r#"{
        "_format": "hh-sol-artifact-1",
        "contractName": "PrescriptionNFT",
        "sourceName": "contracts/PrescriptionNFT.sol",
        "abi": [
            {
                "inputs": [
                    { "internalType": "address", "name": "initialOwner", "type": "address" }
                ],
                "stateMutability": "nonpayable",
                "type": "constructor"
            }
        ],
        "bytecode": "0x6080604052348015600e575f5ffd5b50603e80601a5f395ff3fe",
        "linkReferences": {},
        "deployedLinkReferences": {}
    }"#;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(format!("{name}.json")), contents).unwrap();
    }

    #[test]
    fn loads_a_compiled_artifact() {
        let tmp = TempDir::new().unwrap();
        write(&tmp, "PrescriptionNFT", ARTIFACT);

        let artifact = load(tmp.path(), "PrescriptionNFT").unwrap();
        assert_eq!(artifact.contract_name, "PrescriptionNFT");
        assert!(artifact.abi.constructor.is_some());
        assert!(!artifact.bytecode.is_empty());
    }

    #[test]
    fn a_missing_artifact_is_a_submission_failure() {
        let tmp = TempDir::new().unwrap();

        let err = load(tmp.path(), "PrescriptionNFT").unwrap_err();
        assert!(matches!(err, DeployError::SubmissionFailed(_)));
        assert!(err.to_string().contains("PrescriptionNFT.json"));
    }

    #[test]
    fn an_artifact_without_bytecode_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp,
            "PrescriptionNFT",
            r#"{ "contractName": "PrescriptionNFT", "abi": [], "bytecode": "0x" }"#,
        );

        let err = load(tmp.path(), "PrescriptionNFT").unwrap_err();
        assert!(err.to_string().contains("no creation bytecode"));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write(&tmp, "PrescriptionNFT", "not json");

        let err = load(tmp.path(), "PrescriptionNFT").unwrap_err();
        assert!(matches!(err, DeployError::SubmissionFailed(_)));
    }
}
