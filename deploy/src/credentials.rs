use std::env;
use std::fmt;

use crate::error::DeployError;
use crate::network::NetworkProfile;

/// Signing secret for one deployment. Read once at startup and held only
/// until the signer is constructed.
pub struct Credential(String);

impl Credential {
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

// The secret must never reach logs or error output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

pub fn resolve(profile: &NetworkProfile) -> Result<Credential, DeployError> {
    read_env(profile.credential_env)
        .map(Credential)
        .ok_or(DeployError::MissingCredential(profile.credential_env))
}

/// The explorer key is optional: without it the deployment still runs and
/// only the verification link is dropped from the final report.
pub fn resolve_explorer_key(profile: &NetworkProfile) -> Option<String> {
    let var = profile.explorer_api_key_env?;
    let key = read_env(var);
    if key.is_none() {
        log::warn!("{var} is not set, the report will skip explorer verification");
    }
    key
}

fn read_env(var: &str) -> Option<String> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}
