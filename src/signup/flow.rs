//! Signup flow state machine.
//!
//! Pure transition logic: every rule is a plain method of (current stage,
//! input) with no I/O. The async [`super::driver::SignupDriver`] feeds it
//! wallet snapshots, user commands, and collaborator success signals.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::FlowError;
use crate::flow::{StepView, ViewElement};

use super::stage::SignupStage;

/// A recorded stage transition.
#[derive(Debug, Clone)]
pub struct StageTransition {
    pub from: SignupStage,
    pub to: SignupStage,
    pub at: DateTime<Utc>,
    pub cause: TransitionCause,
}

/// What triggered a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCause {
    /// Explicit user action ("Next").
    Manual,
    /// Connectivity signal change.
    Connectivity,
    /// Collaborator success signal.
    CollaboratorSuccess,
}

/// The signup flow: current stage plus transition history.
#[derive(Debug)]
pub struct SignupFlow {
    id: Uuid,
    stage: SignupStage,
    history: Vec<StageTransition>,
}

impl SignupFlow {
    /// Start a new flow instance.
    ///
    /// New flows start at the wallet-connection stage; the login stage is
    /// only shown to users arriving without a session.
    pub fn new() -> Self {
        Self::starting_at(SignupStage::ConnectWallet)
    }

    pub fn starting_at(stage: SignupStage) -> Self {
        Self {
            id: Uuid::new_v4(),
            stage,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn stage(&self) -> SignupStage {
        self.stage
    }

    pub fn history(&self) -> &[StageTransition] {
        &self.history
    }

    pub fn is_complete(&self) -> bool {
        self.stage.is_terminal()
    }

    fn transition(&mut self, to: SignupStage, cause: TransitionCause) -> SignupStage {
        let from = self.stage;
        tracing::info!(flow_id = %self.id, %from, %to, ?cause, "Signup stage transition");
        self.history.push(StageTransition {
            from,
            to,
            at: Utc::now(),
            cause,
        });
        self.stage = to;
        to
    }

    /// React to a connectivity change. Returns the new stage if one applies.
    ///
    /// Only two stages react: connecting while on `ConnectWallet` advances
    /// to `CreateAccountOnchain`, and disconnecting while on
    /// `CreateAccountOnchain` reverts to `ConnectWallet`. Disconnecting on
    /// `RegisterUsername` or `Explainer` leaves the stage unchanged; the
    /// flow does not rewind progress past the account-creation step.
    pub fn on_connectivity(&mut self, connected: bool) -> Option<SignupStage> {
        match (self.stage, connected) {
            (SignupStage::ConnectWallet, true) => Some(self.transition(
                SignupStage::CreateAccountOnchain,
                TransitionCause::Connectivity,
            )),
            (SignupStage::CreateAccountOnchain, false) => Some(
                self.transition(SignupStage::ConnectWallet, TransitionCause::Connectivity),
            ),
            _ => None,
        }
    }

    /// Explicit "Next" action from the current stage's renderer.
    pub fn next(&mut self, connected: bool) -> Result<SignupStage, FlowError> {
        match self.stage {
            SignupStage::Login => {
                Ok(self.transition(SignupStage::ConnectWallet, TransitionCause::Manual))
            }
            SignupStage::ConnectWallet if connected => Ok(self.transition(
                SignupStage::CreateAccountOnchain,
                TransitionCause::Manual,
            )),
            SignupStage::ConnectWallet => Err(FlowError::InvalidTransition {
                from: self.stage.to_string(),
                to: SignupStage::CreateAccountOnchain.to_string(),
                reason: "wallet is not connected".to_string(),
            }),
            stage => Err(FlowError::NoManualTransition {
                stage: stage.to_string(),
            }),
        }
    }

    /// Single-shot collaborator success signal for the current stage.
    pub fn collaborator_success(&mut self) -> Result<SignupStage, FlowError> {
        match self.stage {
            SignupStage::CreateAccountOnchain => Ok(self.transition(
                SignupStage::RegisterUsername,
                TransitionCause::CollaboratorSuccess,
            )),
            SignupStage::RegisterUsername => Ok(self.transition(
                SignupStage::Explainer,
                TransitionCause::CollaboratorSuccess,
            )),
            stage => Err(FlowError::NoManualTransition {
                stage: stage.to_string(),
            }),
        }
    }

    /// Render a stage to its view content.
    pub fn render(stage: SignupStage, connected: bool) -> StepView {
        match stage {
            SignupStage::Login => StepView::new("Login", "Congrats, you are already logged in.")
                .with_body(vec![ViewElement::button("Next step", "next", true)]),
            SignupStage::ConnectWallet => StepView::new(
                "Connect your wallet",
                "We will create your account onchain in the next step.",
            )
            .with_body(vec![
                ViewElement::button("Switch wallet", "switch_wallet", true),
                ViewElement::button("Next step", "next", connected),
            ]),
            SignupStage::CreateAccountOnchain => {
                StepView::new("Create your account", "Let's get you onchain").with_body(vec![
                    ViewElement::text("Waiting for the onchain account creation to finish."),
                ])
            }
            SignupStage::RegisterUsername => StepView::new(
                "Register your username",
                "Submit name and bio of your account",
            )
            .with_body(vec![ViewElement::text(
                "Waiting for the username registration to finish.",
            )]),
            SignupStage::Explainer => {
                StepView::new("Let's go 🤩", "You just created your account").with_body(vec![
                    ViewElement::button("Start exploring your feed", "goto_feed", true),
                    ViewElement::button("Post your first cast", "goto_post", true),
                    ViewElement::button("Share this account with others", "goto_share", true),
                ])
            }
        }
    }
}

impl Default for SignupFlow {
    fn default() -> Self {
        Self::new()
    }
}
