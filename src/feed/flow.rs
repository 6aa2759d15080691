//! Feed customization flow state machine.
//!
//! Manual-only transitions: connectivity and profile resolution gate the
//! controls but never move the stage on their own.

use uuid::Uuid;

use crate::directory::model::Profile;
use crate::directory::resolver::{Resolution, info_message};
use crate::error::FlowError;
use crate::flow::{StepView, ViewElement};
use crate::wallet::Address;

use super::invite::ShareCopy;
use super::stage::FeedStage;

/// The feed customization flow: stage plus flow-local transient state.
/// Everything here is reset when the flow is dropped; nothing persists.
#[derive(Debug)]
pub struct FeedFlow {
    id: Uuid,
    stage: FeedStage,
    connected: bool,
    address: Option<Address>,
    profile: Option<Profile>,
    info_message: Option<String>,
    delegator: Option<Address>,
    share_copy: ShareCopy,
}

impl FeedFlow {
    pub fn new() -> Self {
        Self::starting_at(FeedStage::Users)
    }

    pub fn starting_at(stage: FeedStage) -> Self {
        Self {
            id: Uuid::new_v4(),
            stage,
            connected: false,
            address: None,
            profile: None,
            info_message: None,
            delegator: None,
            share_copy: ShareCopy::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn stage(&self) -> FeedStage {
        self.stage
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn info_message(&self) -> Option<&str> {
        self.info_message.as_deref()
    }

    pub fn copied(&self) -> bool {
        self.share_copy.copied()
    }

    /// Record the latest wallet snapshot. Never changes the stage.
    /// Disconnecting drops the resolved profile.
    pub fn set_connectivity(&mut self, connected: bool, address: Option<Address>) {
        self.connected = connected;
        if !connected || address.is_none() {
            self.profile = None;
        }
        self.address = address;
        self.refresh_info_message();
    }

    /// Apply a finished profile resolution. Resolutions for an address other
    /// than the currently connected one are stale and discarded.
    pub fn apply_resolution(&mut self, resolution: Resolution) -> bool {
        if self.address.as_ref() != Some(&resolution.address) {
            tracing::debug!(
                flow_id = %self.id,
                resolved_for = %resolution.address,
                "Discarding stale profile resolution"
            );
            return false;
        }
        self.profile = resolution.profile;
        self.refresh_info_message();
        true
    }

    fn refresh_info_message(&mut self) {
        self.info_message = info_message(self.connected, self.profile.as_ref());
    }

    /// Set the delegator contract address produced by the shared-account
    /// ownership setup.
    pub fn set_delegator(&mut self, delegator: Address) {
        self.delegator = Some(delegator);
    }

    /// Whether the continue control on the channels stage is enabled.
    pub fn can_continue_from_channels(&self) -> bool {
        self.connected && self.profile.is_some()
    }

    /// Explicit continue control. The channels stage additionally requires
    /// a connected wallet and a resolved profile.
    pub fn advance(&mut self) -> Result<FeedStage, FlowError> {
        let next = self.stage.next().ok_or_else(|| FlowError::Terminal {
            stage: self.stage.to_string(),
        })?;
        if self.stage == FeedStage::Channels && !self.can_continue_from_channels() {
            return Err(FlowError::InvalidTransition {
                from: self.stage.to_string(),
                to: next.to_string(),
                reason: "requires a connected wallet and a resolved profile".to_string(),
            });
        }
        tracing::info!(flow_id = %self.id, from = %self.stage, to = %next, "Feed stage transition");
        self.stage = next;
        Ok(next)
    }

    /// The share string for the invite stage, once both the delegator
    /// contract and a profile id are known.
    pub fn share_text(&self) -> Option<String> {
        let delegator = self.delegator.as_ref()?;
        let fid = self.profile.as_ref()?.fid;
        Some(format!(
            "Join my shared account with delegator contract address {delegator} and FID {fid}"
        ))
    }

    /// Register a copy click. Returns the generation token of the reset
    /// window the caller must arm, or `None` when there is nothing to copy.
    pub fn copy_share(&mut self) -> Option<(String, u64)> {
        let text = self.share_text()?;
        let generation = self.share_copy.click();
        Some((text, generation))
    }

    /// A copy reset window elapsed.
    pub fn copy_window_elapsed(&mut self, generation: u64) -> bool {
        self.share_copy.window_elapsed(generation)
    }

    /// Render a stage to its view content.
    pub fn render(&self, stage: FeedStage) -> StepView {
        match stage {
            FeedStage::Users => StepView::new(
                "Customize users in your feed",
                "Add your onchain and IRL friends to your feed",
            )
            .with_body(vec![ViewElement::button("Continue", "continue", true)]),
            FeedStage::Channels => {
                let mut body = vec![
                    ViewElement::Composer {
                        placeholder: "Select channels you like".to_string(),
                    },
                    ViewElement::Composer {
                        placeholder: "Channels you want to see less of".to_string(),
                    },
                ];
                if let Some(message) = &self.info_message {
                    body.push(ViewElement::info(message.clone()));
                }
                if let Some(profile) = &self.profile {
                    body.push(ViewElement::ProfileCard {
                        profile: profile.clone(),
                    });
                }
                body.push(ViewElement::button(
                    "Continue",
                    "continue",
                    self.can_continue_from_channels(),
                ));
                StepView::new("Customize channels in your feed", "Add channels to your feed")
                    .with_body(body)
            }
            FeedStage::Invite => {
                let body = match self.share_text() {
                    Some(text) => vec![
                        ViewElement::text("Share this to invite other users:"),
                        ViewElement::ShareBox {
                            text,
                            copied: self.copied(),
                        },
                    ],
                    None => vec![ViewElement::info(
                        "Finish the shared account setup to generate an invite.",
                    )],
                };
                StepView::new("Invite others", "Let other users join your customized feed")
                    .with_body(body)
            }
        }
    }
}

impl Default for FeedFlow {
    fn default() -> Self {
        Self::new()
    }
}
