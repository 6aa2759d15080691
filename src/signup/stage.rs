//! Signup flow stages.

use serde::{Deserialize, Serialize};

use crate::flow::{FlowStage, SidebarNavItem};

/// The five stages of the signup flow, in strict forward order.
///
/// `Explainer` is terminal: it offers navigation away from onboarding, not a
/// further stage transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupStage {
    Login,
    ConnectWallet,
    CreateAccountOnchain,
    RegisterUsername,
    Explainer,
}

impl SignupStage {
    /// Whether this stage ends the flow.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Explainer)
    }
}

impl FlowStage for SignupStage {
    fn all() -> &'static [Self] {
        &[
            Self::Login,
            Self::ConnectWallet,
            Self::CreateAccountOnchain,
            Self::RegisterUsername,
            Self::Explainer,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            Self::Login => "LOGIN",
            Self::ConnectWallet => "CONNECT_WALLET",
            Self::CreateAccountOnchain => "CREATE_ACCOUNT_ONCHAIN",
            Self::RegisterUsername => "REGISTER_USERNAME",
            Self::Explainer => "EXPLAINER",
        }
    }
}

impl std::fmt::Display for SignupStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Sidebar declaration for the signup flow. The username and explainer
/// entries share an ordinal.
pub fn nav_items() -> Vec<SidebarNavItem<SignupStage>> {
    vec![
        SidebarNavItem {
            title: "Login",
            idx: 0,
            keys: &[SignupStage::Login],
        },
        SidebarNavItem {
            title: "Connect wallet",
            idx: 1,
            keys: &[SignupStage::ConnectWallet],
        },
        SidebarNavItem {
            title: "Create account onchain",
            idx: 2,
            keys: &[SignupStage::CreateAccountOnchain],
        },
        SidebarNavItem {
            title: "Register username",
            idx: 3,
            keys: &[SignupStage::RegisterUsername],
        },
        SidebarNavItem {
            title: "Let's go",
            idx: 3,
            keys: &[SignupStage::Explainer],
        },
    ]
}
