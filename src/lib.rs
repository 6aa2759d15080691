//! cast-onboard — onboarding flow controllers for a Farcaster client.
//!
//! Two independent flows: the signup flow (login → connect wallet → create
//! account onchain → register username → explainer) and the feed
//! customization flow (users → channels → invite). Both are built on the
//! generic step-sequence machinery in [`flow`] and delegate real work
//! (wallet connectivity, account creation, profile lookups) to external
//! collaborators behind traits.

pub mod collab;
pub mod composer;
pub mod config;
pub mod directory;
pub mod error;
pub mod feed;
pub mod flow;
pub mod registry;
pub mod signup;
pub mod wallet;
