//! UI rendering module for skypulse.
//!
//! `render()` is the single entry point called from the event loop's
//! `terminal.draw()` closure. Layout arithmetic and shared chrome live in
//! `layout.rs`; each panel and overlay has its own module.

mod chat;
mod feed;
mod help;
mod integrations;
pub mod keybindings;
mod layout;
mod report;

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

use crate::app::{AppState, Mode, PanelFocus};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_log_strip, render_status_bar};

/// Renders one complete frame.
///
/// Viewport heights and panel rects are written back into `state` before the
/// panels draw, so the next keypress or click sees this frame's geometry.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let regions = compute_layout(frame, state);
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        frame.area(),
    );

    state.feed_viewport_height = inner_rect(regions.feed).height;
    state.chat_viewport_height = inner_rect(regions.chat).height.saturating_sub(3);
    state.panel_rects = [regions.feed, regions.report, regions.chat];

    let focus = state.focus;

    if regions.feed.width > 0 {
        feed::render_feed(frame, regions.feed, focus == PanelFocus::Feed, state, theme);
    }

    report::render_report(frame, regions.report, focus == PanelFocus::Report, state, theme);

    if regions.chat.width > 0 {
        chat::render_chat(frame, regions.chat, focus == PanelFocus::Chat, state, theme);
    }

    render_log_strip(frame, regions.log, state, theme);
    render_status_bar(frame, regions.status_bar, state, theme);

    match state.mode {
        Mode::HelpOverlay => help::render_help_overlay(frame, theme, state.help_scroll),
        Mode::Integrations => integrations::render_integrations(frame, theme),
        Mode::ConfirmQuit => render_confirm_quit(frame, theme),
        Mode::Normal | Mode::Insert => {}
    }
}

fn render_confirm_quit(frame: &mut Frame, theme: &Theme) {
    let area = frame
        .area()
        .centered(Constraint::Length(46), Constraint::Length(5));
    frame.render_widget(Clear, area);
    let block = Block::bordered()
        .title(" Quit? ")
        .border_style(Style::default().fg(theme.status_error));
    let text = vec![
        Line::from("Your chat draft or pending reply will be lost."),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::raw(" quit   "),
            Span::styled("n", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::raw(" / Esc stay"),
        ]),
    ];
    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// Greedy word wrap on whitespace. Words longer than `width` are split.
///
/// Widths are counted in chars, which is exact for the ASCII review catalog.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::wrap_text;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn splits_words_longer_than_width() {
        assert_eq!(wrap_text("abcdefgh ij", 3), vec!["abc", "def", "gh", "ij"]);
    }

    #[test]
    fn keeps_explicit_newlines_and_empty_input() {
        assert_eq!(wrap_text("a\n\nb", 5), vec!["a", "", "b"]);
        assert_eq!(wrap_text("", 5), vec![""]);
    }
}
