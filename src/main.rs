//! # JoyKey Bridge
//!
//! Drive keyboard-navigated applications with a game controller.
//!
//! This application translates controller button presses into synthesized
//! key taps on a virtual keyboard, so WASD/arrow-key navigation can be
//! driven from a handheld gamepad.

use anyhow::Result;
use tokio::sync::watch;
use tracing::{debug, info, warn};

mod config;
mod error;
mod mapper;
mod controller;
mod keyboard;

use config::Config;
use controller::{Gamepad, SnapshotBuilder};
use keyboard::VirtualKeyboard;
use mapper::{ButtonSnapshot, Mapper};

/// Number of fired actions between status log messages
const LOG_INTERVAL_ACTIONS: u64 = 100;

/// Main entry point for JoyKey Bridge
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration (optional path as the sole CLI argument)
///    - Register the virtual keyboard device
///    - Detect and open the game controller
///
/// 2. **Event Feed**
///    - A blocking reader task folds evdev events into button snapshots
///      and publishes one snapshot per SYN report through a depth-1
///      watch channel (most-recent-wins; a snapshot arriving while the
///      previous one is still unread replaces it)
///
/// 3. **Main Loop**
///    - Evaluate each snapshot strictly sequentially against the rule
///      table, tapping at most one key per snapshot
///    - Log a status line every 100 fired actions
///    - Handle Ctrl+C for shutdown
///
/// A failed key injection is logged and dropped; it never terminates the
/// process. If the controller feed closes (device disconnected), the
/// bridge exits cleanly.
///
/// # Errors
///
/// Returns error if:
/// - The configuration file is invalid
/// - No game controller is found
/// - The virtual keyboard cannot be registered (uinput permissions)
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("JoyKey Bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(config::DEFAULT_CONFIG_PATH)?,
    };

    // Register the output device before touching the controller, so a
    // uinput permission problem surfaces first
    let keyboard = VirtualKeyboard::create(&config.keyboard.device_name)?;

    let mut gamepad = if config.controller.device_path.is_empty() {
        Gamepad::open()?
    } else {
        Gamepad::open_at(&config.controller.device_path)?
    };
    info!(
        "Controller: {} at {}",
        gamepad.name().unwrap_or("unnamed"),
        gamepad.device_path()
    );

    // Snapshot feed: depth-1, most-recent-wins
    let (snapshot_tx, mut snapshot_rx) = watch::channel(ButtonSnapshot::empty());

    // Blocking reader task: evdev fetch_events blocks, so it lives on the
    // blocking pool and feeds the async loop through the channel
    tokio::task::spawn_blocking(move || {
        let mut builder = SnapshotBuilder::new();
        loop {
            let events: Vec<_> = match gamepad.fetch_events() {
                Ok(events) => events.collect(),
                Err(e) => {
                    warn!("Controller read failed: {}", e);
                    break;
                }
            };

            for event in events {
                if matches!(event.kind(), evdev::InputEventKind::Synchronization(_)) {
                    // One snapshot per SYN report
                    if snapshot_tx.send(builder.snapshot()).is_err() {
                        return; // main loop gone
                    }
                } else {
                    builder.process_event(&event);
                }
            }
        }
    });

    let mut mapper = Mapper::with_period(keyboard, config.nav_period());
    info!(
        "Mapping active ({} Hz navigation gate)",
        config.mapper.nav_rate_hz
    );
    info!("Press Ctrl+C to exit");

    let mut action_count: u64 = 0;

    // Main loop
    loop {
        tokio::select! {
            changed = snapshot_rx.changed() => {
                if changed.is_err() {
                    info!("Controller event feed closed");
                    break;
                }
                let snapshot = snapshot_rx.borrow_and_update().clone();

                match mapper.evaluate(&snapshot).await {
                    Ok(Some(key)) => {
                        action_count += 1;
                        debug!("Action #{}: {}", action_count, key);
                        if action_count % LOG_INTERVAL_ACTIONS == 0 {
                            info!("Fired {} actions", action_count);
                        }
                    }
                    Ok(None) => {}
                    // A failed injection drops this action only
                    Err(e) => warn!("Key injection failed: {}", e),
                }
            }

            // Handle Ctrl+C for shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    info!("Total actions fired: {}", action_count);

    Ok(())
}
