//! Central application state for skypulse.
//!
//! `AppState` owns the dashboard controller (`Monitor`), the chat session, and
//! all UI-only state: mode, focus, scroll offsets, panel geometry, and the log
//! strip. Rendering reads it; the keybinding dispatcher and the event loop
//! mutate it. Calls to the analyst are spawned from here and come back as
//! `AppEvent`s.

use std::collections::VecDeque;
use std::sync::Arc;

use crossbeam_channel::Receiver;
use ratatui::layout::Rect;
use skypulse_core::analyst::Analyst;
use skypulse_core::chat::ChatSession;
use skypulse_core::feed::{FeedGenerator, LiveFeed};
use skypulse_core::monitor::{AnalysisRequest, ApplyOutcome, Monitor};
use skypulse_core::types::ReviewEntry;
use tokio::sync::mpsc::UnboundedSender;

use crate::event::{self, AnalysisOutcome, AppEvent};

/// Lines kept in the log strip.
const LOG_CAPACITY: usize = 200;

/// Editor mode controlling which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing into the chat input.
    Insert,
    /// Full-screen help overlay.
    HelpOverlay,
    /// Connector status overlay.
    Integrations,
    /// Quit confirmation, shown when a chat draft or reply would be lost.
    ConfirmQuit,
}

/// Which panel currently has keyboard focus.
///
/// Cycle order: `Feed` → `Report` → `Chat` → `Feed`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Left panel: live review feed.
    Feed,
    /// Centre panel: the analysis report.
    #[default]
    Report,
    /// Right panel: chat assistant.
    Chat,
}

impl PanelFocus {
    pub fn prev(self) -> Self {
        match self {
            PanelFocus::Feed => PanelFocus::Chat,
            PanelFocus::Report => PanelFocus::Feed,
            PanelFocus::Chat => PanelFocus::Report,
        }
    }

    pub fn next(self) -> Self {
        match self {
            PanelFocus::Feed => PanelFocus::Report,
            PanelFocus::Report => PanelFocus::Chat,
            PanelFocus::Chat => PanelFocus::Feed,
        }
    }
}

/// All mutable state passed through every render cycle.
pub struct AppState {
    pub monitor: Monitor,
    pub chat: ChatSession,
    /// Draft text of the chat input box.
    pub chat_input: String,

    pub mode: Mode,
    pub focus: PanelFocus,

    /// First visible review in the feed panel.
    pub feed_scroll: usize,
    pub report_scroll: u16,
    /// Chat transcript scroll. `u16::MAX` follows the newest message.
    pub chat_scroll: u16,
    pub help_scroll: u16,

    /// Inner heights cached by the renderer for page-wise scrolling.
    pub feed_viewport_height: u16,
    pub report_viewport_height: u16,
    pub chat_viewport_height: u16,

    /// `[feed, report, chat]` outer rects from the last frame, for mouse hit-testing.
    pub panel_rects: [Rect; 3],

    pub left_pct: u16,
    pub center_pct: u16,
    pub right_pct: u16,

    /// Tail of the tracing output, oldest first.
    pub log_lines: VecDeque<String>,
    pub show_log: bool,
    log_rx: Option<Receiver<String>>,

    /// Advanced on every logic tick while a call is in flight.
    pub spinner_frame: usize,

    analyst: Arc<dyn Analyst>,
    event_tx: UnboundedSender<AppEvent>,
    feed_tx: UnboundedSender<ReviewEntry>,
    live_feed: Option<LiveFeed>,
}

impl AppState {
    /// Builds the state around a monitor that has not started yet.
    ///
    /// Feed entries from the live timer go to `feed_tx`; analyst results come
    /// back on `event_tx`.
    pub fn new(
        monitor: Monitor,
        analyst: Arc<dyn Analyst>,
        event_tx: UnboundedSender<AppEvent>,
        feed_tx: UnboundedSender<ReviewEntry>,
    ) -> Self {
        Self {
            monitor,
            chat: ChatSession::new(),
            chat_input: String::new(),
            mode: Mode::default(),
            focus: PanelFocus::default(),
            feed_scroll: 0,
            report_scroll: 0,
            chat_scroll: u16::MAX,
            help_scroll: 0,
            feed_viewport_height: 0,
            report_viewport_height: 0,
            chat_viewport_height: 0,
            panel_rects: [Rect::default(); 3],
            left_pct: 25,
            center_pct: 45,
            right_pct: 30,
            log_lines: VecDeque::with_capacity(LOG_CAPACITY),
            show_log: false,
            log_rx: None,
            spinner_frame: 0,
            analyst,
            event_tx,
            feed_tx,
            live_feed: None,
        }
    }

    /// Attaches the receiving end of the tracing sink.
    pub fn with_log_receiver(mut self, rx: Receiver<String>) -> Self {
        self.log_rx = Some(rx);
        self
    }

    // -----------------------------------------------------------------------
    // Analysis
    // -----------------------------------------------------------------------

    /// True when the landing screen's start action is available.
    pub fn can_start(&self) -> bool {
        self.monitor.report().is_none() && !self.monitor.is_loading()
    }

    /// Seeds the log and sends the initial analysis. Also serves as retry.
    pub fn start_initial(&mut self) {
        if !self.can_start() {
            return;
        }
        let request = self.monitor.start_initial();
        self.feed_scroll = 0;
        self.report_scroll = 0;
        self.dispatch(request);
    }

    /// Issues a background analysis of the current log, if it has any entries.
    pub fn refresh(&mut self) {
        if self.monitor.is_loading() {
            return;
        }
        if let Some(request) = self.monitor.request_refresh() {
            tracing::info!(seq = request.seq, "manual refresh");
            self.dispatch(request);
        }
    }

    fn dispatch(&self, request: AnalysisRequest) {
        event::spawn_analysis(Arc::clone(&self.analyst), request, self.event_tx.clone());
    }

    /// Routes an entry from the live timer through the monitor's trigger.
    pub fn ingest_feed_entry(&mut self, entry: ReviewEntry) {
        if let Some(request) = self.monitor.ingest_live(entry) {
            self.dispatch(request);
        }
        if self.feed_scroll > 0 {
            self.feed_scroll = self.feed_scroll.saturating_add(1);
        }
    }

    pub fn apply_analysis(&mut self, outcome: AnalysisOutcome) {
        let applied = self.monitor.apply_analysis(outcome.seq, outcome.kind, outcome.result);
        if applied == ApplyOutcome::Replaced {
            tracing::info!(seq = outcome.seq, "report updated");
        }
    }

    /// Flips live mode. Ignored while the initial analysis is running.
    pub fn toggle_live(&mut self) {
        if self.monitor.is_loading() {
            return;
        }
        self.monitor.toggle_live();
    }

    /// Starts or stops the feed timer so it matches the monitor's live flag.
    ///
    /// Called by the event loop after every event.
    pub fn sync_live_feed(&mut self) {
        match (self.monitor.is_live(), self.live_feed.is_some()) {
            (true, false) => {
                let brand = self.monitor.brand();
                let generator = FeedGenerator::new(brand.catalog);
                self.live_feed =
                    Some(LiveFeed::start(generator, brand.feed_interval, self.feed_tx.clone()));
                tracing::debug!(interval_ms = brand.feed_interval.as_millis() as u64, "feed timer started");
            }
            (false, true) => {
                if let Some(feed) = self.live_feed.take() {
                    feed.stop();
                }
                tracing::debug!("feed timer stopped");
            }
            _ => {}
        }
    }

    pub fn is_feed_running(&self) -> bool {
        self.live_feed.as_ref().is_some_and(LiveFeed::is_running)
    }

    // -----------------------------------------------------------------------
    // Category scope
    // -----------------------------------------------------------------------

    pub fn cycle_category(&mut self, forward: bool) {
        self.monitor.cycle_category(forward);
        self.report_scroll = 0;
    }

    pub fn clear_category(&mut self) {
        self.monitor.set_active_category(None);
        self.report_scroll = 0;
    }

    // -----------------------------------------------------------------------
    // Chat
    // -----------------------------------------------------------------------

    /// Sends the draft. Blank drafts and sends during a pending reply are ignored.
    pub fn send_chat(&mut self) {
        let Some(request) = self.chat.begin_send(&self.chat_input) else {
            return;
        };
        self.chat_input.clear();
        self.chat_scroll = u16::MAX;
        event::spawn_chat(Arc::clone(&self.analyst), request, self.event_tx.clone());
    }

    pub fn apply_chat_reply(&mut self, reply: Result<String, skypulse_core::analyst::AnalystError>) {
        self.chat.finish(reply);
        self.chat_scroll = u16::MAX;
    }

    /// True when quitting would throw away a draft or an unanswered question.
    pub fn has_unsent_chat(&self) -> bool {
        !self.chat_input.trim().is_empty() || self.chat.is_pending()
    }

    // -----------------------------------------------------------------------
    // Ticks
    // -----------------------------------------------------------------------

    /// Logic tick: pulls new log lines and advances the spinner.
    pub fn on_tick(&mut self) {
        if let Some(rx) = &self.log_rx {
            for line in rx.try_iter() {
                if self.log_lines.len() == LOG_CAPACITY {
                    self.log_lines.pop_front();
                }
                self.log_lines.push_back(line);
            }
        }
        if self.is_busy() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    /// Any analyst call in flight.
    pub fn is_busy(&self) -> bool {
        self.monitor.is_loading() || self.monitor.is_background_updating() || self.chat.is_pending()
    }

    // -----------------------------------------------------------------------
    // Scrolling
    // -----------------------------------------------------------------------

    pub fn scroll_down(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Feed => {
                let max = self.monitor.log().len().saturating_sub(1);
                self.feed_scroll = (self.feed_scroll + lines as usize).min(max);
            }
            PanelFocus::Report => {
                self.report_scroll = self.report_scroll.saturating_add(lines);
            }
            PanelFocus::Chat => {
                self.chat_scroll = self.chat_scroll.saturating_add(lines);
            }
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Feed => {
                self.feed_scroll = self.feed_scroll.saturating_sub(lines as usize);
            }
            PanelFocus::Report => {
                self.report_scroll = self.report_scroll.saturating_sub(lines);
            }
            PanelFocus::Chat => {
                self.chat_scroll = self.chat_scroll.saturating_sub(lines);
            }
        }
    }

    pub fn scroll_top(&mut self) {
        match self.focus {
            PanelFocus::Feed => self.feed_scroll = 0,
            PanelFocus::Report => self.report_scroll = 0,
            PanelFocus::Chat => self.chat_scroll = 0,
        }
    }

    /// Scrolls to the end. Report and chat offsets are clamped by the renderer.
    pub fn scroll_bottom(&mut self) {
        match self.focus {
            PanelFocus::Feed => self.feed_scroll = self.monitor.log().len().saturating_sub(1),
            PanelFocus::Report => self.report_scroll = u16::MAX,
            PanelFocus::Chat => self.chat_scroll = u16::MAX,
        }
    }

    fn focused_viewport(&self) -> u16 {
        match self.focus {
            PanelFocus::Feed => self.feed_viewport_height,
            PanelFocus::Report => self.report_viewport_height,
            PanelFocus::Chat => self.chat_viewport_height,
        }
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down((self.focused_viewport() / 2).max(1));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up((self.focused_viewport() / 2).max(1));
    }

    pub fn full_page_down(&mut self) {
        self.scroll_down(self.focused_viewport().max(1));
    }

    pub fn full_page_up(&mut self) {
        self.scroll_up(self.focused_viewport().max(1));
    }

    // -----------------------------------------------------------------------
    // Panel geometry
    // -----------------------------------------------------------------------

    /// Shrinks the report panel by 5%, giving the space to the side panels.
    ///
    /// The centre panel will not shrink below 30%.
    pub fn shrink_report_panel(&mut self) {
        const MIN_CENTER: u16 = 30;
        const STEP: u16 = 5;
        if self.center_pct <= MIN_CENTER {
            return;
        }
        let transfer = STEP.min(self.center_pct - MIN_CENTER);
        self.center_pct -= transfer;
        let left_gain = transfer / 2;
        self.left_pct = self.left_pct.saturating_add(left_gain);
        self.right_pct = self.right_pct.saturating_add(transfer - left_gain);
    }

    /// Grows the report panel by 5%, taken from the side panels.
    ///
    /// The centre panel will not grow above 80%; side panels keep at least 10%.
    pub fn grow_report_panel(&mut self) {
        const MAX_CENTER: u16 = 80;
        const MIN_SIDE: u16 = 10;
        const STEP: u16 = 5;
        if self.center_pct >= MAX_CENTER {
            return;
        }
        let transfer = STEP.min(MAX_CENTER - self.center_pct);
        let left_give = (transfer / 2).min(self.left_pct.saturating_sub(MIN_SIDE));
        let right_give = (transfer - transfer / 2).min(self.right_pct.saturating_sub(MIN_SIDE));
        self.left_pct -= left_give;
        self.right_pct -= right_give;
        self.center_pct += left_give + right_give;
    }
}
