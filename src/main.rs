use std::sync::Arc;

use secrecy::SecretString;
use tokio::io::{AsyncBufReadExt, BufReader};

use cast_onboard::collab::InstantCollaborator;
use cast_onboard::config::AppConfig;
use cast_onboard::directory::{HttpDirectory, ProfileResolver};
use cast_onboard::feed::{FeedCommand, FeedDriver, FeedFlow, NullClipboard};
use cast_onboard::flow::{FlowView, StepSequence, ViewElement};
use cast_onboard::registry::StaticRegistry;
use cast_onboard::signup::{
    self, FlowEvent, SignupCommand, SignupDriver, SignupFlow, SignupStage,
};
use cast_onboard::wallet::{Address, ChannelWallet, WalletHandle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Note: {e}; using demo configuration");
        AppConfig {
            directory_base_url: "http://localhost:3000".to_string(),
            directory_api_key: SecretString::from("demo"),
            app_fid: 1,
        }
    });

    eprintln!("🪄 cast-onboard v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Directory: {}", config.directory_base_url);
    eprintln!("   App fid: {}", config.app_fid);
    eprintln!("   Commands: connect <0x..>, disconnect, next, quit");
    eprintln!("   Feed commands: advance, delegator <0x..>, copy, quit\n");

    let (handle, wallet) = ChannelWallet::new();

    // ── Signup flow ──────────────────────────────────────────────────────
    let (driver, cmds, mut events) = SignupDriver::new(
        SignupFlow::new(),
        wallet.subscribe(),
        Arc::new(InstantCollaborator),
        Arc::new(InstantCollaborator),
    );
    let signup_task = tokio::spawn(driver.run());

    let mut sequence = StepSequence::new(
        "Welcome",
        "Follow these steps to create your account",
        SignupStage::ConnectWallet,
        signup::nav_items(),
        {
            let wallet = wallet.clone();
            Box::new(move |stage| SignupFlow::render(stage, wallet.snapshot().connected))
        },
    )?;
    print_view(&sequence.view());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(FlowEvent::StageChanged { to, .. }) => {
                        sequence.set_stage(to);
                        print_view(&sequence.view());
                    }
                    Ok(FlowEvent::Completed { .. }) | Err(_) => break,
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_wallet_command(&line, &handle) {
                    Some(WalletAction::Handled) => {}
                    Some(WalletAction::Quit) => {
                        let _ = cmds.send(SignupCommand::Quit).await;
                        break;
                    }
                    None if line.trim() == "next" => {
                        let _ = cmds.send(SignupCommand::Next).await;
                    }
                    None => eprintln!("Unknown command: {line}"),
                }
            }
        }
    }

    let flow = signup_task.await?;
    if !flow.is_complete() {
        eprintln!("Signup abandoned on stage {}", flow.stage());
        return Ok(());
    }
    eprintln!("Signup complete after {} transitions\n", flow.history().len());

    // ── Feed customization flow ──────────────────────────────────────────
    let directory = Arc::new(HttpDirectory::new(&config));
    let registry = Arc::new(StaticRegistry::new());
    let resolver = Arc::new(ProfileResolver::new(directory, registry, config.app_fid));

    let (driver, cmds, _events) = FeedDriver::new(
        FeedFlow::new(),
        wallet.subscribe(),
        resolver,
        Arc::new(NullClipboard),
    );
    let state = driver.state();
    let feed_task = tokio::spawn(driver.run());

    loop {
        {
            let flow = state.read().await;
            let view = flow.render(flow.stage());
            eprintln!("\n── {} ──", view.title);
            eprintln!("{}", view.description);
            print_elements(&view.body);
        }

        let Some(line) = lines.next_line().await? else { break };
        let line = line.trim();
        match line.split_once(' ') {
            Some(("delegator", raw)) => match raw.parse::<Address>() {
                Ok(address) => {
                    let _ = cmds.send(FeedCommand::SetDelegator(address)).await;
                }
                Err(e) => eprintln!("{e}"),
            },
            _ if line == "advance" => {
                let _ = cmds.send(FeedCommand::Advance).await;
            }
            _ if line == "copy" => {
                let _ = cmds.send(FeedCommand::CopyShare).await;
            }
            _ if line == "quit" => {
                let _ = cmds.send(FeedCommand::Quit).await;
                break;
            }
            _ => match parse_wallet_command(line, &handle) {
                Some(_) => {}
                None => eprintln!("Unknown command: {line}"),
            },
        }
        // Let the driver absorb the command before re-rendering.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    feed_task.await?;
    Ok(())
}

enum WalletAction {
    Handled,
    Quit,
}

fn parse_wallet_command(line: &str, handle: &WalletHandle) -> Option<WalletAction> {
    let line = line.trim();
    if line == "quit" {
        return Some(WalletAction::Quit);
    }
    if line == "disconnect" {
        handle.disconnect();
        return Some(WalletAction::Handled);
    }
    if let Some(("connect", raw)) = line.split_once(' ') {
        match raw.parse::<Address>() {
            Ok(address) => handle.connect(address),
            Err(e) => eprintln!("{e}"),
        }
        return Some(WalletAction::Handled);
    }
    None
}

fn print_view(view: &FlowView) {
    eprintln!("\n═══ {} ═══", view.title);
    for entry in &view.sidebar {
        let marker = if entry.active { "▶" } else { " " };
        eprintln!(" {marker} {}. {}", entry.idx, entry.title);
    }
    eprintln!("── {} ──", view.content.title);
    eprintln!("{}", view.content.description);
    print_elements(&view.content.body);
}

fn print_elements(body: &[ViewElement]) {
    for element in body {
        match element {
            ViewElement::Text { text } => eprintln!("  {text}"),
            ViewElement::Info { text } => eprintln!("  ℹ {text}"),
            ViewElement::Button {
                label, enabled, ..
            } => {
                let state = if *enabled { "" } else { " (disabled)" };
                eprintln!("  [{label}]{state}");
            }
            ViewElement::ProfileCard { profile } => {
                eprintln!(
                    "  {} {}",
                    profile.display_name.as_deref().unwrap_or(""),
                    profile.handle()
                );
            }
            ViewElement::ShareBox { text, copied } => {
                let suffix = if *copied { " (copied!)" } else { "" };
                eprintln!("  ▭ {text}{suffix}");
            }
            ViewElement::Composer { placeholder } => eprintln!("  ✎ {placeholder}"),
        }
    }
}
