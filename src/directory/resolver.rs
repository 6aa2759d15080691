//! Profile resolution for a connected wallet address.
//!
//! Lookup order: directory by address (probing both the as-given and
//! lower-cased response keys), then — on an empty result — the on-chain id
//! registry followed by an id-keyed directory lookup. External failures
//! degrade to "no profile found"; they never surface to the caller.

use std::sync::Arc;

use crate::directory::ProfileDirectory;
use crate::directory::model::Profile;
use crate::registry::IdRegistry;
use crate::wallet::Address;

/// Shown when a wallet is connected but no profile could be resolved.
pub const NO_PROFILE_MESSAGE: &str = "You are connected with a wallet, but we couldn't find an \
     account connected to it. If you recently created an account, it may \
     take a few minutes for it to be indexed.";

/// Outcome of a resolution attempt, tagged with the address it was started
/// for so late arrivals for a previous address can be discarded.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub address: Address,
    pub profile: Option<Profile>,
}

/// Derive the informational banner from connectivity and the resolved
/// profile. Only a connected wallet without a profile produces a message.
pub fn info_message(connected: bool, profile: Option<&Profile>) -> Option<String> {
    if connected && profile.is_none() {
        Some(NO_PROFILE_MESSAGE.to_string())
    } else {
        None
    }
}

/// Resolves profiles for connected addresses.
pub struct ProfileResolver {
    directory: Arc<dyn ProfileDirectory>,
    registry: Arc<dyn IdRegistry>,
    viewer_fid: u64,
}

impl ProfileResolver {
    pub fn new(
        directory: Arc<dyn ProfileDirectory>,
        registry: Arc<dyn IdRegistry>,
        viewer_fid: u64,
    ) -> Self {
        Self {
            directory,
            registry,
            viewer_fid,
        }
    }

    /// Resolve the profile for `address`.
    ///
    /// Never fails: any external error is logged and treated as "no profile".
    pub async fn resolve(&self, address: Address) -> Resolution {
        let profile = self.lookup(&address).await;
        Resolution { address, profile }
    }

    async fn lookup(&self, address: &Address) -> Option<Profile> {
        match self.directory.users_by_address(address).await {
            Ok(by_address) => {
                // Response keys are not guaranteed to match the query casing.
                let direct = by_address
                    .get(&address.lowercase())
                    .or_else(|| by_address.get(address.as_str()))
                    .and_then(|profiles| profiles.first())
                    .cloned();
                if let Some(profile) = direct {
                    return Some(profile);
                }
            }
            Err(e) => {
                tracing::warn!(address = %address, error = %e, "Directory lookup by address failed");
                return None;
            }
        }

        self.lookup_by_registry_id(address).await
    }

    async fn lookup_by_registry_id(&self, address: &Address) -> Option<Profile> {
        let fid = match self.registry.id_of(address).await {
            Ok(Some(fid)) => fid,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(address = %address, error = %e, "Registry id lookup failed");
                return None;
            }
        };

        match self.directory.users_by_fid(fid, self.viewer_fid).await {
            Ok(users) => users.into_iter().next(),
            Err(e) => {
                tracing::warn!(fid, error = %e, "Directory lookup by fid failed");
                None
            }
        }
    }
}
