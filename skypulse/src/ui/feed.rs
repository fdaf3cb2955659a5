//! Live review feed panel (left).
//!
//! Newest review at the top. Each entry is a source badge with its time,
//! followed by the word-wrapped text.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::layout::{inner_rect, panel_block};
use super::wrap_text;
use crate::app::AppState;
use crate::theme::Theme;

pub fn render_feed(frame: &mut Frame, area: Rect, is_focused: bool, state: &AppState, theme: &Theme) {
    let monitor = &state.monitor;
    let mut title = vec![Span::raw(format!(
        " Live Feed {}/{} ",
        monitor.log().len(),
        monitor.log().capacity()
    ))];
    if state.is_feed_running() {
        title.push(Span::styled("● ", Style::default().fg(theme.status_live)));
    }
    frame.render_widget(panel_block(Line::from(title), is_focused, theme), area);

    let inner = inner_rect(area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if monitor.log().is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::styled(" No reviews yet.", Style::default().fg(theme.muted)),
            Line::styled(" Start monitoring to seed the feed.", Style::default().fg(theme.muted)),
        ]);
        frame.render_widget(hint, inner);
        return;
    }

    let width = inner.width.saturating_sub(1) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for entry in monitor.log().iter().skip(state.feed_scroll) {
        if lines.len() >= inner.height as usize {
            break;
        }
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", entry.source.tag()),
                Style::default()
                    .fg(theme.source_color(entry.source))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                entry.timestamp.format("%H:%M:%S").to_string(),
                Style::default().fg(theme.muted),
            ),
        ]));
        for chunk in wrap_text(&entry.text, width) {
            lines.push(Line::styled(format!(" {chunk}"), Style::default().fg(theme.text)));
        }
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
