//! Connector status overlay. Display only; nothing here talks to the network.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

pub struct Connector {
    pub name: &'static str,
    pub detail: &'static str,
    pub connected: bool,
}

pub const CONNECTORS: [Connector; 3] = [
    Connector {
        name: "Google Reviews",
        detail: "Last synced 2m ago",
        connected: true,
    },
    Connector {
        name: "Yelp Business",
        detail: "Not connected",
        connected: false,
    },
    Connector {
        name: "Twitter (X) Mentions",
        detail: "Not connected",
        connected: false,
    },
];

const INTRO: &str =
    "Connect your platforms to enable real-time sentiment tracking and dynamic shift alerts.";
const READY: &str = "✔ Ready for Real-Time Analysis";
const FOOTNOTE: &str = "Connecting a source allows the model to automatically ingest \
and categorize new reviews every 15 minutes.";

pub fn render_integrations(frame: &mut Frame, theme: &Theme) {
    if frame.area().width < 50 {
        return;
    }
    let area = frame
        .area()
        .centered(Constraint::Percentage(60), Constraint::Length(19));
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(" Data Integrations  (I or Esc to close) ")
        .border_style(Style::default().fg(theme.border_active));

    let mut lines = vec![
        Line::styled(INTRO, Style::default().fg(theme.muted)),
        Line::from(""),
    ];
    for connector in &CONNECTORS {
        let (badge, color) = if connector.connected {
            ("● Sync", theme.positive)
        } else {
            ("○ Connect", theme.muted)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<24}", connector.name),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(badge, Style::default().fg(color)),
        ]));
        lines.push(Line::styled(format!("   {}", connector.detail), Style::default().fg(theme.muted)));
        lines.push(Line::from(""));
    }
    lines.push(Line::styled(READY, Style::default().fg(theme.positive)));
    lines.push(Line::styled(FOOTNOTE, Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC)));

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}
