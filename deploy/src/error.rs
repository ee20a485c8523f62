use ethers::types::H256;
use thiserror::Error;

/// Failure kinds surfaced to the operator. Each kind maps to its own exit
/// status so wrapper scripts can tell a configuration mistake from a
/// transaction that made it on-chain but was never confirmed.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("unknown network {0:?}")]
    UnknownNetwork(String),

    #[error("environment variable {0} is not set or is empty")]
    MissingCredential(&'static str),

    #[error("submission failed: {0:#}")]
    SubmissionFailed(anyhow::Error),

    #[error("confirmation failed for transaction {tx_hash:?}: {cause:#}")]
    ConfirmationFailed { tx_hash: H256, cause: anyhow::Error },
}

impl DeployError {
    pub fn confirmation(tx_hash: H256, cause: anyhow::Error) -> Self {
        Self::ConfirmationFailed { tx_hash, cause }
    }

    /// Process exit status for this failure. Zero is reserved for success.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::UnknownNetwork(_) => 2,
            Self::MissingCredential(_) => 3,
            Self::SubmissionFailed(_) => 4,
            Self::ConfirmationFailed { .. } => 5,
        }
    }
}
