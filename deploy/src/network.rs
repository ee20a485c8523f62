use crate::error::DeployError;

/// Connection parameters for one deployment target. Credentials are
/// referenced by environment variable name, never held here.
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    pub id: &'static str,
    pub rpc_endpoint: &'static str,
    pub chain_id: u64,
    pub credential_env: &'static str,
    pub explorer_api_key_env: Option<&'static str>,
    pub explorer_url: Option<&'static str>,
}

/// Every network this tool knows how to deploy to. The table is fixed at
/// compile time; adding a target means adding an entry here.
const PROFILES: &[NetworkProfile] = &[
    NetworkProfile {
        id: "local",
        rpc_endpoint: "http://127.0.0.1:8545",
        chain_id: 1337,
        credential_env: "HIPPOCARD_DEPLOYER_KEY",
        explorer_api_key_env: None,
        explorer_url: None,
    },
    NetworkProfile {
        id: "amoy",
        rpc_endpoint: "https://rpc-amoy.polygon.technology",
        chain_id: 80002,
        credential_env: "POLYGON_PRIVATE_KEY",
        explorer_api_key_env: Some("POLYGONSCAN_API_KEY"),
        explorer_url: Some("https://amoy.polygonscan.com"),
    },
    NetworkProfile {
        id: "sepolia",
        rpc_endpoint: "https://rpc.sepolia.org",
        chain_id: 11155111,
        credential_env: "SEPOLIA_PRIVATE_KEY",
        explorer_api_key_env: Some("ETHERSCAN_API_KEY"),
        explorer_url: Some("https://sepolia.etherscan.io"),
    },
];

pub fn resolve(id: &str) -> Result<&'static NetworkProfile, DeployError> {
    PROFILES
        .iter()
        .find(|profile| profile.id == id)
        .ok_or_else(|| DeployError::UnknownNetwork(id.to_string()))
}

pub fn known_ids() -> Vec<&'static str> {
    PROFILES.iter().map(|profile| profile.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_returns_the_matching_profile_for_every_registered_id() {
        for profile in PROFILES {
            let resolved = resolve(profile.id).unwrap();
            assert_eq!(resolved.id, profile.id);
            assert_eq!(resolved.chain_id, profile.chain_id);
        }
    }

    #[test]
    fn resolve_rejects_an_unregistered_id() {
        match resolve("mainnet") {
            Err(DeployError::UnknownNetwork(id)) => assert_eq!(id, "mainnet"),
            other => panic!("expected UnknownNetwork, got {other:?}"),
        }
    }

    #[test]
    fn ids_and_chain_ids_are_unique() {
        for (i, profile) in PROFILES.iter().enumerate() {
            for other in &PROFILES[i + 1..] {
                assert_ne!(profile.id, other.id);
                assert_ne!(profile.chain_id, other.chain_id);
            }
        }
    }

    #[test]
    fn every_profile_references_a_credential_variable() {
        for profile in PROFILES {
            assert!(!profile.credential_env.is_empty());
        }
    }

    #[test]
    fn known_ids_lists_the_whole_registry() {
        assert_eq!(known_ids().len(), PROFILES.len());
        assert!(known_ids().contains(&"local"));
    }
}
