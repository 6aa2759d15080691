//! Async driver for the feed customization flow.
//!
//! Subscribes to the wallet signal and runs profile resolutions in the
//! background. Resolutions are keyed by the address they were started for;
//! results arriving after the wallet moved on are discarded by the flow.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast, mpsc, watch};
use tokio::time::sleep;

use crate::directory::resolver::{ProfileResolver, Resolution};
use crate::wallet::{Address, WalletSnapshot};

use super::flow::FeedFlow;
use super::invite::{COPIED_RESET_AFTER, Clipboard};
use super::stage::FeedStage;

/// Broadcast capacity for feed events.
const EVENT_CAPACITY: usize = 64;

/// User commands accepted by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedCommand {
    /// Continue control on the current stage.
    Advance,
    /// Delegator contract produced by the shared-account setup.
    SetDelegator(Address),
    /// Copy the invite share text to the clipboard.
    CopyShare,
    /// Abandon the flow.
    Quit,
}

/// Events published while the flow runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    StageChanged { from: FeedStage, to: FeedStage },
    ProfileUpdated { address: Address, fid: Option<u64> },
    CopiedChanged { copied: bool },
}

/// Internal timer/task messages.
enum Internal {
    Resolved(Resolution),
    CopyWindowElapsed(u64),
}

/// Drives a [`FeedFlow`] from external signals until it is abandoned.
pub struct FeedDriver {
    state: Arc<RwLock<FeedFlow>>,
    wallet: watch::Receiver<WalletSnapshot>,
    commands: mpsc::Receiver<FeedCommand>,
    events: broadcast::Sender<FeedEvent>,
    resolver: Arc<ProfileResolver>,
    clipboard: Arc<dyn Clipboard>,
}

impl FeedDriver {
    pub fn new(
        flow: FeedFlow,
        wallet: watch::Receiver<WalletSnapshot>,
        resolver: Arc<ProfileResolver>,
        clipboard: Arc<dyn Clipboard>,
    ) -> (
        Self,
        mpsc::Sender<FeedCommand>,
        broadcast::Receiver<FeedEvent>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = broadcast::channel(EVENT_CAPACITY);
        (
            Self {
                state: Arc::new(RwLock::new(flow)),
                wallet,
                commands: cmd_rx,
                events: event_tx,
                resolver,
                clipboard,
            },
            cmd_tx,
            event_rx,
        )
    }

    /// Shared flow state, for rendering while the driver runs.
    pub fn state(&self) -> Arc<RwLock<FeedFlow>> {
        Arc::clone(&self.state)
    }

    /// Run until the command channel closes or a quit command arrives.
    pub async fn run(mut self) {
        let (internal_tx, mut internal_rx) = mpsc::channel::<Internal>(16);

        // Evaluate the snapshot present at mount.
        let snapshot = self.wallet.borrow().clone();
        self.apply_snapshot(snapshot, &internal_tx).await;

        loop {
            tokio::select! {
                changed = self.wallet.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = self.wallet.borrow_and_update().clone();
                    self.apply_snapshot(snapshot, &internal_tx).await;
                }
                cmd = self.commands.recv() => {
                    match cmd {
                        Some(FeedCommand::Advance) => self.advance().await,
                        Some(FeedCommand::SetDelegator(delegator)) => {
                            self.state.write().await.set_delegator(delegator);
                        }
                        Some(FeedCommand::CopyShare) => self.copy_share(&internal_tx).await,
                        Some(FeedCommand::Quit) | None => break,
                    }
                }
                Some(internal) = internal_rx.recv() => {
                    match internal {
                        Internal::Resolved(resolution) => {
                            let address = resolution.address.clone();
                            let fid = resolution.profile.as_ref().map(|p| p.fid);
                            let applied = self.state.write().await.apply_resolution(resolution);
                            if applied {
                                let _ = self.events.send(FeedEvent::ProfileUpdated { address, fid });
                            }
                        }
                        Internal::CopyWindowElapsed(generation) => {
                            let cleared = self.state.write().await.copy_window_elapsed(generation);
                            if cleared {
                                let _ = self.events.send(FeedEvent::CopiedChanged { copied: false });
                            }
                        }
                    }
                }
            }
        }
    }

    async fn apply_snapshot(&self, snapshot: WalletSnapshot, internal_tx: &mpsc::Sender<Internal>) {
        self.state
            .write()
            .await
            .set_connectivity(snapshot.connected, snapshot.address.clone());

        let Some(address) = snapshot.address.filter(|_| snapshot.connected) else {
            return;
        };

        let resolver = Arc::clone(&self.resolver);
        let internal_tx = internal_tx.clone();
        tokio::spawn(async move {
            let resolution = resolver.resolve(address).await;
            let _ = internal_tx.send(Internal::Resolved(resolution)).await;
        });
    }

    async fn advance(&self) {
        let mut flow = self.state.write().await;
        let from = flow.stage();
        match flow.advance() {
            Ok(to) => {
                let _ = self.events.send(FeedEvent::StageChanged { from, to });
            }
            Err(e) => {
                tracing::debug!(flow_id = %flow.id(), error = %e, "Advance ignored");
            }
        }
    }

    async fn copy_share(&self, internal_tx: &mpsc::Sender<Internal>) {
        let copied = { self.state.write().await.copy_share() };
        let Some((text, generation)) = copied else {
            return;
        };

        self.clipboard.write(&text).await;
        let _ = self.events.send(FeedEvent::CopiedChanged { copied: true });

        let internal_tx = internal_tx.clone();
        tokio::spawn(async move {
            sleep(COPIED_RESET_AFTER).await;
            let _ = internal_tx
                .send(Internal::CopyWindowElapsed(generation))
                .await;
        });
    }
}
