//! Profile directory data models.

use serde::{Deserialize, Serialize};

/// A user profile record returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Numeric account identifier.
    pub fid: u64,
    /// Registered username (handle), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pfp_url: Option<String>,
}

impl Profile {
    /// Handle to show next to the avatar: username when registered, fid
    /// otherwise.
    pub fn handle(&self) -> String {
        match &self.username {
            Some(name) => format!("@{name}"),
            None => format!("@{}", self.fid),
        }
    }
}
