//! skypulse — airline social-sentiment monitor for the terminal.
//!
//! Entry point for the `skypulse` binary. Wires together tracing (`logging`),
//! user config (`config`), the terminal lifecycle (`tui`), the unified event
//! bus (`event`), the dashboard state (`app`), and the ratatui views (`ui`).
//!
//! # Startup sequence
//!
//! 1. `logging::init()` so config warnings land in the log strip.
//! 2. Load config, then resolve brand, theme, and the Gemini client.
//! 3. `install_panic_hook()` before the terminal is touched.
//! 4. `register_sigterm()`, polled in the event loop.
//! 5. `init_tui()` enters the alternate screen and raw mode.
//! 6. Spawn the event task; the live feed timer is started on demand by
//!    `AppState::sync_live_feed`.
//!
//! `restore_tui()` runs after the loop exits on every path except panic, which
//! the hook covers. `?` inside the loop is limited to the Render arm so draw
//! errors still break out to the restore call.

mod app;
mod config;
mod event;
mod logging;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use skypulse_core::analyst::{Analyst, GeminiAnalyst};
use skypulse_core::monitor::Monitor;
use tokio::sync::mpsc;

use crate::event::AppEvent;
use crate::ui::keybindings::{handle_key, handle_mouse, KeyAction};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let log_rx = logging::init();

    let config = config::Config::load(&config::config_path());
    let brand = config.brand_profile();
    let theme = theme::Theme::from_name(config.theme_name(&brand));
    let gemini = config.gemini_config();
    if gemini.api_key.is_none() {
        tracing::warn!("no API key in config, GEMINI_API_KEY or API_KEY; analysis calls will fail");
    }
    tracing::info!(brand = brand.key, model = %gemini.model, "skypulse starting");
    let analyst: Arc<dyn Analyst> = Arc::new(GeminiAnalyst::new(gemini, brand.clone()));

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    let (feed_tx, mut feed_rx) = mpsc::unbounded_channel();
    let mut state = app::AppState::new(Monitor::new(brand), analyst, handler.tx.clone(), feed_tx)
        .with_log_receiver(log_rx);

    'event_loop: loop {
        tokio::select! {
            // Heartbeat so SIGTERM is noticed even when nothing else arrives.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            Some(entry) = feed_rx.recv() => {
                state.ingest_feed_entry(entry);
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(AppEvent::Render) => {
                        terminal.draw(|frame| ui::render(frame, &mut state, &theme))?;
                    }
                    Some(AppEvent::Key(key)) => {
                        if handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Mouse(mouse)) => {
                        handle_mouse(mouse, &mut state);
                    }
                    Some(AppEvent::Resize) => {
                        // The next Render picks up the new frame size.
                    }
                    Some(AppEvent::Tick) => state.on_tick(),
                    Some(AppEvent::Analysis(outcome)) => state.apply_analysis(*outcome),
                    Some(AppEvent::ChatReply(reply)) => state.apply_chat_reply(reply),
                    None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
        state.sync_live_feed();
    }

    tracing::info!("skypulse exiting");
    tui::restore_tui()?;
    Ok(())
}
