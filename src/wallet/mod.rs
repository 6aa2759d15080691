//! Wallet connectivity signal.
//!
//! The flows never talk to a wallet directly; they subscribe to a
//! [`tokio::sync::watch`] channel of [`WalletSnapshot`]s. The
//! [`WalletHandle`] side is driven by whatever integration owns the real
//! wallet connection (or by tests).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::WalletError;

/// A checksummed-or-not Ethereum address: `0x` followed by 40 hex digits.
///
/// Casing is preserved as given; directory lookups probe both the as-given
/// and the lower-cased form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased form, used as the secondary directory lookup key.
    pub fn lowercase(&self) -> String {
        self.0.to_lowercase()
    }
}

impl FromStr for Address {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix("0x")
            .ok_or_else(|| WalletError::InvalidAddress(s.to_string()))?;
        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WalletError::InvalidAddress(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Point-in-time wallet state, published on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSnapshot {
    pub address: Option<Address>,
    pub connected: bool,
}

impl WalletSnapshot {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connected(address: Address) -> Self {
        Self {
            address: Some(address),
            connected: true,
        }
    }
}

/// Mutating side of the wallet signal.
#[derive(Debug, Clone)]
pub struct WalletHandle {
    tx: watch::Sender<WalletSnapshot>,
}

impl WalletHandle {
    /// Publish a connected state for `address`.
    pub fn connect(&self, address: Address) {
        let _ = self.tx.send(WalletSnapshot::connected(address));
    }

    /// Publish a disconnected state.
    pub fn disconnect(&self) {
        let _ = self.tx.send(WalletSnapshot::disconnected());
    }

    /// Switch to a different connected address.
    pub fn switch(&self, address: Address) {
        self.connect(address);
    }
}

/// Read side handed to flows.
#[derive(Debug, Clone)]
pub struct ChannelWallet {
    rx: watch::Receiver<WalletSnapshot>,
}

impl ChannelWallet {
    /// Create a wallet signal pair, starting disconnected.
    pub fn new() -> (WalletHandle, Self) {
        let (tx, rx) = watch::channel(WalletSnapshot::disconnected());
        (WalletHandle { tx }, Self { rx })
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> WalletSnapshot {
        self.rx.borrow().clone()
    }

    /// Subscribe to connectivity changes.
    pub fn subscribe(&self) -> watch::Receiver<WalletSnapshot> {
        self.rx.clone()
    }
}
