//! Chat assistant panel (right): transcript above a 3-row input box.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use skypulse_core::types::ChatRole;

use super::layout::{inner_rect, panel_block, spinner};
use super::wrap_text;
use crate::app::{AppState, Mode};
use crate::theme::Theme;

pub fn render_chat(frame: &mut Frame, area: Rect, is_focused: bool, state: &mut AppState, theme: &Theme) {
    let mut title = vec![Span::raw(" Assistant ")];
    if state.chat.thinking() {
        title.push(Span::styled("[thinking] ", Style::default().fg(theme.accent)));
    }
    frame.render_widget(panel_block(Line::from(title), is_focused, theme), area);

    let inner = inner_rect(area);
    if inner.height < 4 || inner.width == 0 {
        return;
    }
    let [transcript, input] =
        inner.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]));

    let width = transcript.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    if state.chat.messages().is_empty() {
        lines.push(Line::styled(
            format!("Ask about {} sentiment. Press i to type.", state.monitor.brand().name),
            Style::default().fg(theme.muted),
        ));
    }
    for message in state.chat.messages() {
        let (label, color) = match message.role {
            ChatRole::User => ("you", theme.chat_user),
            ChatRole::Model => ("assistant", theme.chat_model),
            ChatRole::Thought => ("thought", theme.chat_thought),
        };
        lines.push(Line::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)));
        let mut body = Style::default().fg(color);
        if message.role == ChatRole::Thought {
            body = body.add_modifier(Modifier::ITALIC);
        }
        for chunk in wrap_text(&message.text, width) {
            lines.push(Line::styled(chunk, body));
        }
        lines.push(Line::from(""));
    }
    if state.chat.is_pending() {
        lines.push(Line::styled(
            format!("{} thinking…", spinner(state)),
            Style::default().fg(theme.muted),
        ));
    }

    let max_scroll = (lines.len() as u16).saturating_sub(transcript.height);
    state.chat_scroll = state.chat_scroll.min(max_scroll);
    frame.render_widget(Paragraph::new(lines).scroll((state.chat_scroll, 0)), transcript);

    render_input(frame, input, state, theme);
}

/// Single-line input; shows the tail of long drafts.
fn render_input(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let editing = state.mode == Mode::Insert;
    let border = if editing { theme.status_mode_insert } else { theme.border_inactive };
    let block = Block::bordered().border_style(Style::default().fg(border));

    let room = area.width.saturating_sub(3) as usize;
    let draft: String = {
        let chars: Vec<char> = state.chat_input.chars().collect();
        chars[chars.len().saturating_sub(room)..].iter().collect()
    };

    let line = if draft.is_empty() && !editing {
        Line::styled("i to ask a question", Style::default().fg(theme.muted))
    } else if editing {
        Line::from(vec![
            Span::styled(draft, Style::default().fg(theme.text)),
            Span::styled("▏", Style::default().fg(theme.accent)),
        ])
    } else {
        Line::styled(draft, Style::default().fg(theme.text))
    };
    frame.render_widget(Paragraph::new(line).block(block), area);
}
