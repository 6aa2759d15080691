//! Collaborator contracts — external components the flows delegate real
//! work to.
//!
//! A collaborator communicates back only through its success signal: the
//! `Ok(())` return of its async operation, consumed exactly once per stage.
//! Failures stay inside the collaborator (it owns its own user-facing error
//! display); a flow that never receives the signal simply stays on its
//! current stage.

use async_trait::async_trait;

/// Performs the on-chain account creation steps.
#[async_trait]
pub trait AccountCreator: Send + Sync {
    /// Resolves once the account exists on-chain.
    async fn create_account(&self) -> Result<(), ()>;
}

/// Performs username registration for the freshly created account.
#[async_trait]
pub trait UsernameRegistrar: Send + Sync {
    /// Resolves once the username is registered.
    async fn register_username(&self) -> Result<(), ()>;
}

/// Collaborator that completes immediately; used by the demo binary and
/// driver tests.
pub struct InstantCollaborator;

#[async_trait]
impl AccountCreator for InstantCollaborator {
    async fn create_account(&self) -> Result<(), ()> {
        Ok(())
    }
}

#[async_trait]
impl UsernameRegistrar for InstantCollaborator {
    async fn register_username(&self) -> Result<(), ()> {
        Ok(())
    }
}

/// Collaborator that never completes; the flow stays on its stage
/// indefinitely.
pub struct StalledCollaborator;

#[async_trait]
impl AccountCreator for StalledCollaborator {
    async fn create_account(&self) -> Result<(), ()> {
        std::future::pending().await
    }
}

#[async_trait]
impl UsernameRegistrar for StalledCollaborator {
    async fn register_username(&self) -> Result<(), ()> {
        std::future::pending().await
    }
}
