use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use ethers::{
    contract::ContractFactory,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, PendingTransaction, Provider},
    signers::{LocalWallet, Signer},
    types::{TransactionReceipt, H160, H256},
    utils::hex,
};
use serde::Serialize;

use crate::artifact::ContractArtifact;
use crate::credentials::Credential;
use crate::error::DeployError;
use crate::network::NetworkProfile;

/// Terminal state of a successful deployment.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentResult {
    pub deployer_address: H160,
    pub contract_address: H160,
    pub transaction_hash: H256,
}

pub struct Deploy {
    client: Arc<SignerMiddleware<Provider<Http>, LocalWallet>>,
    confirmation_timeout: Option<Duration>,
}

impl Deploy {
    /// Binds the signing key to the profile's endpoint and chain id. The
    /// chain id reported by the node must match the profile, otherwise the
    /// signed transaction would be valid on a different network than the
    /// one the operator selected.
    pub async fn new(
        profile: &NetworkProfile,
        credential: &Credential,
        confirmation_timeout: Option<Duration>,
    ) -> Result<Self, DeployError> {
        let sk = credential.reveal();
        let raw = hex::decode(sk.strip_prefix("0x").unwrap_or(sk))
            .map_err(|e| DeployError::SubmissionFailed(anyhow!("decoding signing key: {e}")))?;
        let wallet = LocalWallet::from_bytes(&raw)
            .map_err(|e| DeployError::SubmissionFailed(anyhow!("constructing signer: {e}")))?;

        let provider = Provider::<Http>::try_from(profile.rpc_endpoint)
            .map_err(|e| DeployError::SubmissionFailed(e.into()))?;
        let reported = provider
            .get_chainid()
            .await
            .map_err(|e| DeployError::SubmissionFailed(e.into()))?;
        if reported != profile.chain_id.into() {
            return Err(DeployError::SubmissionFailed(anyhow!(
                "node at {} reports chain id {reported}, profile {:?} expects {}",
                profile.rpc_endpoint,
                profile.id,
                profile.chain_id
            )));
        }

        let client = Arc::new(SignerMiddleware::new(
            provider,
            wallet.with_chain_id(profile.chain_id),
        ));

        Ok(Self {
            client,
            confirmation_timeout,
        })
    }

    /// Submits the contract-creation transaction and waits for it to be
    /// mined. The returned address comes from the confirmation receipt,
    /// never from a locally computed guess.
    pub async fn run(
        &self,
        contract: ContractArtifact,
        initial_owner: Option<H160>,
    ) -> Result<DeploymentResult, DeployError> {
        let deployer_address = self.client.address();
        let initial_owner = initial_owner.unwrap_or(deployer_address);
        log::info!(
            "deploying {} from {deployer_address:?} with initial owner {initial_owner:?}",
            contract.contract_name
        );

        let factory = ContractFactory::new(contract.abi, contract.bytecode, self.client.clone());
        let mut tx = factory
            .deploy(initial_owner)
            .map_err(|e| DeployError::SubmissionFailed(e.into()))?
            .tx;
        self.client
            .fill_transaction(&mut tx, None)
            .await
            .map_err(|e| DeployError::SubmissionFailed(e.into()))?;

        let pending = self
            .client
            .send_transaction(tx, None)
            .await
            .map_err(|e| DeployError::SubmissionFailed(e.into()))?;
        let transaction_hash = pending.tx_hash();
        log::info!("transaction {transaction_hash:?} accepted, awaiting confirmation");

        let receipt = self.await_confirmation(pending, transaction_hash).await?;
        let contract_address = receipt.contract_address.ok_or_else(|| {
            DeployError::confirmation(
                transaction_hash,
                anyhow!("confirmation receipt carries no contract address"),
            )
        })?;
        log::info!("contract mined at {contract_address:?}");

        Ok(DeploymentResult {
            deployer_address,
            contract_address,
            transaction_hash,
        })
    }

    async fn await_confirmation(
        &self,
        pending: PendingTransaction<'_, Http>,
        tx_hash: H256,
    ) -> Result<TransactionReceipt, DeployError> {
        let pending = pending.interval(Duration::from_secs(1));
        let mined = async {
            match self.confirmation_timeout {
                Some(limit) => match tokio::time::timeout(limit, pending).await {
                    Ok(outcome) => outcome.map_err(anyhow::Error::from),
                    Err(_) => Err(anyhow!("not confirmed within {}s", limit.as_secs())),
                },
                None => pending.await.map_err(anyhow::Error::from),
            }
        };
        tokio::pin!(mined);

        let outcome = tokio::select! {
            outcome = &mut mined => outcome,
            _ = tokio::signal::ctrl_c() => {
                // The transaction is already on its way; only the local wait
                // can be abandoned.
                log::warn!(
                    "interrupted, transaction {tx_hash:?} stays pending on-chain and \
                     re-running will deploy a second instance"
                );
                Err(anyhow!("interrupted while awaiting confirmation"))
            }
        };

        let receipt = outcome
            .map_err(|e| DeployError::confirmation(tx_hash, e))?
            .ok_or_else(|| {
                DeployError::confirmation(tx_hash, anyhow!("transaction dropped before it was mined"))
            })?;
        if receipt.status == Some(0u64.into()) {
            return Err(DeployError::confirmation(tx_hash, anyhow!("transaction reverted")));
        }
        Ok(receipt)
    }
}
