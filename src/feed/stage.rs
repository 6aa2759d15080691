//! Feed customization flow stages.

use serde::{Deserialize, Serialize};

use crate::flow::{FlowStage, SidebarNavItem};

/// The three stages of the feed customization flow. All transitions are
/// manual; nothing auto-advances. `Invite` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedStage {
    Users,
    Channels,
    Invite,
}

impl FeedStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Invite)
    }

    /// The next stage in the manual progression, if any.
    pub fn next(&self) -> Option<FeedStage> {
        match self {
            Self::Users => Some(Self::Channels),
            Self::Channels => Some(Self::Invite),
            Self::Invite => None,
        }
    }
}

impl FlowStage for FeedStage {
    fn all() -> &'static [Self] {
        &[Self::Users, Self::Channels, Self::Invite]
    }

    fn key(&self) -> &'static str {
        match self {
            Self::Users => "USERS",
            Self::Channels => "CHANNELS",
            Self::Invite => "INVITE",
        }
    }
}

impl std::fmt::Display for FeedStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Sidebar declaration: the channels and invite stages share an ordinal.
pub fn nav_items() -> Vec<SidebarNavItem<FeedStage>> {
    vec![
        SidebarNavItem {
            title: "Users",
            idx: 0,
            keys: &[FeedStage::Users],
        },
        SidebarNavItem {
            title: "Channels",
            idx: 1,
            keys: &[FeedStage::Channels],
        },
        SidebarNavItem {
            title: "Share with others",
            idx: 1,
            keys: &[FeedStage::Invite],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::validate_nav;

    #[test]
    fn keys_roundtrip() {
        for stage in FeedStage::all() {
            assert_eq!(FeedStage::from_key(stage.key()), Some(*stage));
        }
        assert_eq!(FeedStage::from_key("LOGIN"), None);
    }

    #[test]
    fn next_walks_to_terminal() {
        assert_eq!(FeedStage::Users.next(), Some(FeedStage::Channels));
        assert_eq!(FeedStage::Channels.next(), Some(FeedStage::Invite));
        assert_eq!(FeedStage::Invite.next(), None);
        assert!(FeedStage::Invite.is_terminal());
    }

    #[test]
    fn nav_declaration_is_valid() {
        assert!(validate_nav(&nav_items()).is_ok());
    }
}
