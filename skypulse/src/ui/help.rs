//! Help overlay renderer for skypulse.
//!
//! Draws a centred modal over the panels. `Clear` erases the area first so the
//! overlay sits in the same `terminal.draw()` call as everything else.

use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay, scrolled by `help_scroll` rows.
///
/// Skipped below 60 columns, where the centred rect would have no room.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help  (j/k scroll, ? or Esc to dismiss) ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Monitoring"),
        Line::from("  Enter / s     Start monitoring (retry after a failed start)"),
        Line::from("  Space / p     Pause / resume the live feed"),
        Line::from("  r             Re-analyze the current feed now"),
        Line::from("  [ / ]         Previous / next category"),
        Line::from("  x             Back to the entire network"),
        Line::from("  I             Data integrations"),
        Line::from(""),
        Line::from("Assistant"),
        Line::from("  i             Type a question (Enter sends, Esc leaves)"),
        Line::from("  T             Toggle thinking mode"),
        Line::from(""),
        Line::from("Navigation"),
        Line::from("  j / k         Scroll down / up one line"),
        Line::from("  g / G         Jump to top / bottom"),
        Line::from("  Ctrl-d / u    Scroll half page down / up"),
        Line::from("  Ctrl-f / b    Scroll full page down / up"),
        Line::from("  H / L         Move panel focus left / right"),
        Line::from("  < / >         Shrink / grow the report panel"),
        Line::from(""),
        Line::from("General"),
        Line::from("  v             Show / hide the log strip"),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q / Esc       Quit (confirms if a chat draft or reply is pending)"),
    ])
}
