//! Invite sharing: clipboard hand-off and the "copied" indicator.
//!
//! Every copy click sets the indicator and arms a fresh reset window of
//! [`COPIED_RESET_AFTER`]. Windows are generation-guarded: a reset only
//! clears the indicator if no later click has happened, so the indicator is
//! never cleared earlier than the full window after the latest click.

use std::time::Duration;

use async_trait::async_trait;

/// How long the "copied" indicator stays on after a click.
pub const COPIED_RESET_AFTER: Duration = Duration::from_millis(2000);

/// External clipboard the share text is written to.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write(&self, text: &str);
}

/// The "copied" indicator state.
#[derive(Debug, Default)]
pub struct ShareCopy {
    copied: bool,
    generation: u64,
}

impl ShareCopy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copied(&self) -> bool {
        self.copied
    }

    /// Register a copy click: the indicator turns on and a new reset window
    /// starts. Returns the window's generation token.
    pub fn click(&mut self) -> u64 {
        self.copied = true;
        self.generation += 1;
        self.generation
    }

    /// A reset window elapsed. Clears the indicator only if `generation` is
    /// still the latest click's window; stale windows are ignored.
    pub fn window_elapsed(&mut self, generation: u64) -> bool {
        if generation == self.generation {
            self.copied = false;
            true
        } else {
            false
        }
    }
}

/// Clipboard that drops the text; used when no platform clipboard is wired.
pub struct NullClipboard;

#[async_trait]
impl Clipboard for NullClipboard {
    async fn write(&self, _text: &str) {}
}
