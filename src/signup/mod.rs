//! Signup flow — login, wallet connection, on-chain account creation,
//! username registration, explainer.
//!
//! Connectivity drives two automatic transitions (advance into and retreat
//! out of the account-creation stage); everything else moves on explicit
//! user action or a collaborator's success signal.

pub mod driver;
pub mod flow;
pub mod stage;

pub use driver::{FlowEvent, SignupCommand, SignupDriver};
pub use flow::{SignupFlow, StageTransition, TransitionCause};
pub use stage::{SignupStage, nav_items};
