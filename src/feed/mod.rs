//! Feed customization flow — users, channels, invite.
//!
//! Manual-only stage transitions. Connectivity and profile resolution gate
//! the controls; the invite stage shares the account via a copy-to-clipboard
//! affordance with a 2-second "copied" indicator.

pub mod driver;
pub mod flow;
pub mod invite;
pub mod stage;

pub use driver::{FeedCommand, FeedDriver, FeedEvent};
pub use flow::FeedFlow;
pub use invite::{COPIED_RESET_AFTER, Clipboard, NullClipboard, ShareCopy};
pub use stage::{FeedStage, nav_items};
