//! Responsive 3-panel layout engine for skypulse.
//!
//! Pure layout arithmetic plus the shared chrome (panel blocks, status bar,
//! log strip). Called inside `terminal.draw()` on every render so each frame
//! reflects the current terminal size.
//!
//! # Panel geometry
//!
//! At `>= 120` columns the feed, report, and chat panels are all visible with
//! widths from `AppState.left_pct / center_pct / right_pct` (25 / 45 / 30).
//! Below 120 columns the side panels collapse and the report fills the width.
//!
//! `Spacing::Overlap(1)` with `MergeStrategy::Fuzzy` lets adjacent borders
//! share one column and merge their junction characters.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Rows given to the log strip when it is visible.
const LOG_STRIP_HEIGHT: u16 = 7;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Frame regions for one render.
pub struct Regions {
    pub feed: Rect,
    pub report: Rect,
    pub chat: Rect,
    /// Zero-height when the log strip is hidden.
    pub log: Rect,
    pub status_bar: Rect,
}

/// Splits the frame into panels, optional log strip, and the 1-row status bar.
pub fn compute_layout(frame: &Frame, state: &AppState) -> Regions {
    let term_width = frame.area().width;
    let log_height = if state.show_log { LOG_STRIP_HEIGHT } else { 0 };

    let [main_area, log, status_bar] = frame.area().layout(&Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(log_height),
        Constraint::Length(1),
    ]));

    let horizontal = if term_width >= 120 {
        Layout::horizontal([
            Constraint::Percentage(state.left_pct),
            Constraint::Percentage(state.center_pct),
            Constraint::Percentage(state.right_pct),
        ])
        .spacing(Spacing::Overlap(1))
    } else {
        Layout::horizontal([
            Constraint::Length(0),
            Constraint::Fill(1),
            Constraint::Length(0),
        ])
        .spacing(Spacing::Overlap(1))
    };

    let [feed, report, chat] = main_area.layout(&horizontal);

    Regions { feed, report, chat, log, status_bar }
}

/// The panel area inside its 1-cell border.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Bordered block for a panel: thick and highlighted when focused.
///
/// `MergeStrategy::Fuzzy` is needed because `Exact` mis-draws junctions
/// between `Thick` and `Plain` borders.
pub fn panel_block<'a>(title: Line<'a>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Current spinner glyph.
pub fn spinner(state: &AppState) -> &'static str {
    SPINNER[state.spinner_frame % SPINNER.len()]
}

/// Renders the status bar: mode, brand, live state, scope, activity, last error.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::Insert => (" INSERT ", theme.status_mode_insert),
        Mode::Normal | Mode::ConfirmQuit | Mode::HelpOverlay | Mode::Integrations => {
            (" NORMAL ", theme.status_mode_normal)
        }
    };
    let monitor = &state.monitor;
    let bold = Modifier::BOLD;

    let mut spans = vec![
        Span::styled(mode_text, Style::default().fg(mode_fg).add_modifier(bold)),
        Span::raw(" "),
        Span::styled(monitor.brand().name, Style::default().fg(theme.accent)),
        Span::raw("  "),
    ];

    if monitor.is_live() {
        spans.push(Span::styled("● LIVE", Style::default().fg(theme.status_live).add_modifier(bold)));
    } else {
        spans.push(Span::styled("○ PAUSED", Style::default().fg(theme.muted)));
    }

    let scope = monitor.active_category().unwrap_or("entire network");
    spans.push(Span::raw(format!("  scope: {scope}")));
    spans.push(Span::raw(format!("  reviews: {}/{}", monitor.log().len(), monitor.log().capacity())));

    let activity = if monitor.is_loading() {
        Some("analyzing")
    } else if monitor.is_background_updating() {
        Some("updating")
    } else if state.chat.is_pending() {
        Some("assistant typing")
    } else {
        None
    };
    if let Some(activity) = activity {
        spans.push(Span::styled(
            format!("  {} {activity}", spinner(state)),
            Style::default().fg(theme.accent),
        ));
    }

    if let Some(err) = monitor.last_error() {
        spans.push(Span::styled(format!("  ✗ {err}"), Style::default().fg(theme.status_error)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}

/// Renders the tail of the tracing output.
pub fn render_log_strip(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    let block = Block::bordered()
        .title(" Log ")
        .border_style(Style::default().fg(theme.border_inactive));
    let visible = inner_rect(area).height as usize;
    let skip = state.log_lines.len().saturating_sub(visible);
    let lines: Vec<Line> = state
        .log_lines
        .iter()
        .skip(skip)
        .map(|l| Line::styled(l.as_str(), Style::default().fg(theme.muted)))
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
