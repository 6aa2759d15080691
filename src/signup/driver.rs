//! Async driver for the signup flow.
//!
//! Subscribes to the wallet connectivity signal, accepts user commands, and
//! runs collaborator tasks, feeding everything into the pure
//! [`SignupFlow`] state machine. Stage changes fan out on a broadcast
//! channel for whatever is rendering the flow.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};

use crate::collab::{AccountCreator, UsernameRegistrar};
use crate::wallet::WalletSnapshot;

use super::flow::SignupFlow;
use super::stage::SignupStage;

/// Broadcast capacity for flow events.
const EVENT_CAPACITY: usize = 64;

/// User commands accepted by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupCommand {
    /// Explicit "Next" control on the current stage.
    Next,
    /// Abandon the flow.
    Quit,
}

/// Events published while the flow runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    StageChanged {
        from: SignupStage,
        to: SignupStage,
    },
    /// The terminal stage was reached.
    Completed {
        stage: SignupStage,
    },
}

/// Completion signal from a spawned collaborator task. `entry` ties the
/// signal to the stage entry it was spawned for, so a late success for an
/// entry the flow has since left is discarded.
#[derive(Debug, Clone, Copy)]
struct CollabDone {
    stage: SignupStage,
    entry: u64,
}

/// Drives a [`SignupFlow`] from external signals until it completes.
pub struct SignupDriver {
    flow: SignupFlow,
    wallet: watch::Receiver<WalletSnapshot>,
    commands: mpsc::Receiver<SignupCommand>,
    events: broadcast::Sender<FlowEvent>,
    account_creator: Arc<dyn AccountCreator>,
    registrar: Arc<dyn UsernameRegistrar>,
    entry_seq: u64,
}

impl SignupDriver {
    /// Build a driver. Returns the command sender and an event receiver
    /// alongside it.
    pub fn new(
        flow: SignupFlow,
        wallet: watch::Receiver<WalletSnapshot>,
        account_creator: Arc<dyn AccountCreator>,
        registrar: Arc<dyn UsernameRegistrar>,
    ) -> (
        Self,
        mpsc::Sender<SignupCommand>,
        broadcast::Receiver<FlowEvent>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = broadcast::channel(EVENT_CAPACITY);
        (
            Self {
                flow,
                wallet,
                commands: cmd_rx,
                events: event_tx,
                account_creator,
                registrar,
                entry_seq: 0,
            },
            cmd_tx,
            event_rx,
        )
    }

    /// Run until the flow reaches its terminal stage or is abandoned.
    /// Returns the final flow state (with its transition history).
    pub async fn run(mut self) -> SignupFlow {
        let (done_tx, mut done_rx) = mpsc::channel::<CollabDone>(4);

        // The effect also evaluates the snapshot present at mount.
        let connected = self.wallet.borrow().connected;
        if let Some(to) = self.flow.on_connectivity(connected) {
            self.enter(to, &done_tx);
        }

        while !self.flow.is_complete() {
            tokio::select! {
                changed = self.wallet.changed() => {
                    if changed.is_err() {
                        tracing::warn!(flow_id = %self.flow.id(), "Wallet signal closed, abandoning flow");
                        break;
                    }
                    let connected = self.wallet.borrow_and_update().connected;
                    if let Some(to) = self.flow.on_connectivity(connected) {
                        self.enter(to, &done_tx);
                    }
                }
                cmd = self.commands.recv() => {
                    match cmd {
                        Some(SignupCommand::Next) => {
                            let connected = self.wallet.borrow().connected;
                            match self.flow.next(connected) {
                                Ok(to) => self.enter(to, &done_tx),
                                Err(e) => {
                                    tracing::debug!(flow_id = %self.flow.id(), error = %e, "Next ignored");
                                }
                            }
                        }
                        Some(SignupCommand::Quit) | None => break,
                    }
                }
                Some(done) = done_rx.recv() => {
                    if done.entry != self.entry_seq || done.stage != self.flow.stage() {
                        tracing::debug!(
                            flow_id = %self.flow.id(),
                            stage = %done.stage,
                            "Discarding stale collaborator success"
                        );
                        continue;
                    }
                    match self.flow.collaborator_success() {
                        Ok(to) => self.enter(to, &done_tx),
                        Err(e) => {
                            tracing::warn!(flow_id = %self.flow.id(), error = %e, "Unexpected collaborator success");
                        }
                    }
                }
            }
        }

        if self.flow.is_complete() {
            let _ = self.events.send(FlowEvent::Completed {
                stage: self.flow.stage(),
            });
        }
        self.flow
    }

    /// Publish the transition and start the entered stage's collaborator,
    /// if it has one.
    fn enter(&mut self, to: SignupStage, done_tx: &mpsc::Sender<CollabDone>) {
        self.entry_seq += 1;
        if let Some(last) = self.flow.history().last() {
            let _ = self.events.send(FlowEvent::StageChanged {
                from: last.from,
                to: last.to,
            });
        }

        let entry = self.entry_seq;
        match to {
            SignupStage::CreateAccountOnchain => {
                let creator = Arc::clone(&self.account_creator);
                let done_tx = done_tx.clone();
                tokio::spawn(async move {
                    if creator.create_account().await.is_ok() {
                        let _ = done_tx
                            .send(CollabDone {
                                stage: SignupStage::CreateAccountOnchain,
                                entry,
                            })
                            .await;
                    }
                });
            }
            SignupStage::RegisterUsername => {
                let registrar = Arc::clone(&self.registrar);
                let done_tx = done_tx.clone();
                tokio::spawn(async move {
                    if registrar.register_username().await.is_ok() {
                        let _ = done_tx
                            .send(CollabDone {
                                stage: SignupStage::RegisterUsername,
                                entry,
                            })
                            .await;
                    }
                });
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::time::timeout;

    use crate::collab::{InstantCollaborator, StalledCollaborator};
    use crate::wallet::{Address, ChannelWallet};

    const TEST_TIMEOUT: Duration = Duration::from_secs(5);

    fn addr() -> Address {
        "0xAbCd00000000000000000000000000000000Ef12".parse().unwrap()
    }

    /// Collaborator that waits for an external go signal before succeeding.
    struct GatedCreator {
        gate: tokio::sync::Semaphore,
    }

    #[async_trait]
    impl AccountCreator for GatedCreator {
        async fn create_account(&self) -> Result<(), ()> {
            let permit = self.gate.acquire().await.map_err(|_| ())?;
            permit.forget();
            Ok(())
        }
    }

    #[tokio::test]
    async fn connect_drives_flow_to_completion() {
        timeout(TEST_TIMEOUT, async {
            let (handle, wallet) = ChannelWallet::new();
            let (driver, _cmds, mut events) = SignupDriver::new(
                SignupFlow::new(),
                wallet.subscribe(),
                Arc::new(InstantCollaborator),
                Arc::new(InstantCollaborator),
            );
            let task = tokio::spawn(driver.run());

            handle.connect(addr());

            let flow = task.await.unwrap();
            assert!(flow.is_complete());
            assert_eq!(flow.stage(), SignupStage::Explainer);

            // Events arrive in stage order, ending with Completed.
            let mut seen = Vec::new();
            while let Ok(event) = events.try_recv() {
                seen.push(event);
            }
            assert_eq!(
                seen,
                vec![
                    FlowEvent::StageChanged {
                        from: SignupStage::ConnectWallet,
                        to: SignupStage::CreateAccountOnchain
                    },
                    FlowEvent::StageChanged {
                        from: SignupStage::CreateAccountOnchain,
                        to: SignupStage::RegisterUsername
                    },
                    FlowEvent::StageChanged {
                        from: SignupStage::RegisterUsername,
                        to: SignupStage::Explainer
                    },
                    FlowEvent::Completed {
                        stage: SignupStage::Explainer
                    },
                ]
            );
        })
        .await
        .expect("test timed out");
    }

    #[tokio::test]
    async fn already_connected_wallet_advances_at_start() {
        timeout(TEST_TIMEOUT, async {
            let (handle, wallet) = ChannelWallet::new();
            handle.connect(addr());

            let (driver, _cmds, _events) = SignupDriver::new(
                SignupFlow::new(),
                wallet.subscribe(),
                Arc::new(StalledCollaborator),
                Arc::new(StalledCollaborator),
            );
            let task = tokio::spawn(driver.run());

            // Give the driver a moment, then abandon: with stalled
            // collaborators the flow must be parked on account creation.
            tokio::time::sleep(Duration::from_millis(50)).await;
            drop(handle);
            let flow = task.await.unwrap();
            assert_eq!(flow.stage(), SignupStage::CreateAccountOnchain);
        })
        .await
        .expect("test timed out");
    }

    #[tokio::test]
    async fn stale_collaborator_success_is_discarded() {
        timeout(TEST_TIMEOUT, async {
            let gate = Arc::new(GatedCreator {
                gate: tokio::sync::Semaphore::new(0),
            });
            let (handle, wallet) = ChannelWallet::new();
            let (driver, _cmds, mut events) = SignupDriver::new(
                SignupFlow::new(),
                wallet.subscribe(),
                Arc::clone(&gate) as Arc<dyn AccountCreator>,
                Arc::new(StalledCollaborator),
            );
            let task = tokio::spawn(driver.run());

            // Advance to account creation, then disconnect to revert.
            handle.connect(addr());
            wait_for(&mut events, |e| {
                matches!(
                    e,
                    FlowEvent::StageChanged {
                        to: SignupStage::CreateAccountOnchain,
                        ..
                    }
                )
            })
            .await;
            handle.disconnect();
            wait_for(&mut events, |e| {
                matches!(
                    e,
                    FlowEvent::StageChanged {
                        to: SignupStage::ConnectWallet,
                        ..
                    }
                )
            })
            .await;

            // Let the first (now stale) creation attempt finish.
            gate.gate.add_permits(1);
            tokio::time::sleep(Duration::from_millis(50)).await;

            // Abandon the flow; it must still be on ConnectWallet.
            drop(handle);
            let flow = task.await.unwrap();
            assert_eq!(flow.stage(), SignupStage::ConnectWallet);
        })
        .await
        .expect("test timed out");
    }

    #[tokio::test]
    async fn manual_next_ignored_while_disconnected() {
        timeout(TEST_TIMEOUT, async {
            let (handle, wallet) = ChannelWallet::new();
            let (driver, cmds, _events) = SignupDriver::new(
                SignupFlow::new(),
                wallet.subscribe(),
                Arc::new(StalledCollaborator),
                Arc::new(StalledCollaborator),
            );
            let task = tokio::spawn(driver.run());

            cmds.send(SignupCommand::Next).await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
            cmds.send(SignupCommand::Quit).await.unwrap();

            let flow = task.await.unwrap();
            assert_eq!(flow.stage(), SignupStage::ConnectWallet);
            drop(handle);
        })
        .await
        .expect("test timed out");
    }

    async fn wait_for(
        events: &mut broadcast::Receiver<FlowEvent>,
        pred: impl Fn(&FlowEvent) -> bool,
    ) {
        loop {
            let event = events.recv().await.expect("event stream closed");
            if pred(&event) {
                return;
            }
        }
    }
}
