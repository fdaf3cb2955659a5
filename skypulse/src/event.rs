//! Event bus for skypulse.
//!
//! All user input, timer ticks, and analyst results are normalised into a
//! single `AppEvent` enum and sent over a tokio unbounded MPSC channel. The
//! main loop receives from this channel and dispatches accordingly.
//!
//! Two independent intervals drive the render and logic cycles:
//! - **Render interval** (33 ms, about 30 FPS) triggers a `terminal.draw()` call.
//! - **Tick interval** (250 ms) drains the log channel and advances the spinner.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use skypulse_core::analyst::{Analyst, AnalystError};
use skypulse_core::chat::ChatRequest;
use skypulse_core::monitor::{AnalysisRequest, RequestKind};
use skypulse_core::report::DashboardReport;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Result of one analysis call, tagged with the request that produced it.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub seq: u64,
    pub kind: RequestKind,
    pub result: Result<DashboardReport, AnalystError>,
}

/// All events the application can receive from any source.
#[derive(Debug)]
#[non_exhaustive]
pub enum AppEvent {
    /// A key press from the terminal (`KeyEventKind::Press` only).
    Key(KeyEvent),
    /// A mouse event from the terminal (click, scroll, move).
    Mouse(MouseEvent),
    /// Terminal was resized; the next render reads the new frame size.
    Resize,
    /// Logic tick (250 ms).
    Tick,
    /// Render tick (33 ms).
    Render,
    /// An analysis call finished, successfully or not.
    Analysis(Box<AnalysisOutcome>),
    /// A chat call finished.
    ChatReply(Result<String, AnalystError>),
}

/// Holds the sender and receiver ends of the unified event channel.
pub struct EventHandler {
    /// Cloned into every task that produces events.
    pub tx: mpsc::UnboundedSender<AppEvent>,
    /// Owned by the main loop.
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the background task that feeds terminal input and timer ticks into `tx`.
///
/// `reader.next().fuse()` keeps `select!` from polling a finished stream.
/// Only `KeyEventKind::Press` is forwarded; Windows also reports releases.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut tick_interval = interval(Duration::from_millis(250));
        let mut render_interval = interval(Duration::from_millis(33));
        let mut reader = EventStream::new();

        loop {
            let tick_tick = tick_interval.tick();
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            tokio::select! {
                _ = tick_tick => {
                    if tx.send(AppEvent::Tick).is_err() {
                        return;
                    }
                }
                _ = render_tick => {
                    if tx.send(AppEvent::Render).is_err() {
                        return;
                    }
                }
                maybe_event = crossterm_event => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => {
                            if key.kind == KeyEventKind::Press {
                                let _ = tx.send(AppEvent::Key(key));
                            }
                        }
                        Some(Ok(Event::Resize(..))) => {
                            let _ = tx.send(AppEvent::Resize);
                        }
                        Some(Ok(Event::Mouse(mouse))) => {
                            let _ = tx.send(AppEvent::Mouse(mouse));
                        }
                        _ => {}
                    }
                }
            }
        }
    });
}

/// Runs `request` against `analyst` on its own task and posts the outcome.
pub fn spawn_analysis(
    analyst: Arc<dyn Analyst>,
    request: AnalysisRequest,
    tx: mpsc::UnboundedSender<AppEvent>,
) {
    tokio::spawn(async move {
        tracing::debug!(
            seq = request.seq,
            kind = ?request.kind,
            provider = analyst.name(),
            focus = request.focus.as_deref().unwrap_or("-"),
            "analysis request sent"
        );
        let result = analyst.analyze(&request.batch, request.focus.as_deref()).await;
        let outcome = AnalysisOutcome { seq: request.seq, kind: request.kind, result };
        let _ = tx.send(AppEvent::Analysis(Box::new(outcome)));
    });
}

/// Runs one chat turn on its own task and posts the reply.
pub fn spawn_chat(
    analyst: Arc<dyn Analyst>,
    request: ChatRequest,
    tx: mpsc::UnboundedSender<AppEvent>,
) {
    tokio::spawn(async move {
        let result = analyst.chat(&request).await;
        let _ = tx.send(AppEvent::ChatReply(result));
    });
}
