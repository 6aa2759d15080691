//! On-chain id registry — address → numeric account identifier.
//!
//! The real registry is an on-chain contract read owned by an external
//! collaborator; the flows only consume this trait. [`StaticRegistry`] is
//! the in-memory implementation used by the demo binary and tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::RegistryError;
use crate::wallet::Address;

/// Reader for the on-chain id registry.
#[async_trait]
pub trait IdRegistry: Send + Sync {
    /// Numeric identifier registered for `address`, if any.
    async fn id_of(&self, address: &Address) -> Result<Option<u64>, RegistryError>;
}

/// In-memory registry keyed by lower-cased address.
#[derive(Debug, Default)]
pub struct StaticRegistry {
    ids: HashMap<String, u64>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, address: &Address, fid: u64) -> Self {
        self.ids.insert(address.lowercase(), fid);
        self
    }
}

#[async_trait]
impl IdRegistry for StaticRegistry {
    async fn id_of(&self, address: &Address) -> Result<Option<u64>, RegistryError> {
        Ok(self.ids.get(&address.lowercase()).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_registry_lookup_ignores_casing() {
        let alice: Address = "0xAbCd00000000000000000000000000000000Ef12".parse().unwrap();
        let registry = StaticRegistry::new().with_id(&alice, 42);

        assert_eq!(registry.id_of(&alice).await.unwrap(), Some(42));

        let lower: Address = alice.lowercase().parse().unwrap();
        assert_eq!(registry.id_of(&lower).await.unwrap(), Some(42));

        let other: Address = "0x0000000000000000000000000000000000000001"
            .parse()
            .unwrap();
        assert_eq!(registry.id_of(&other).await.unwrap(), None);
    }
}
