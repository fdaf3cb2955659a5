//! Report panel (centre).
//!
//! Three states: the landing screen before anything has run, a loading
//! screen during the initial analysis, and the report itself. The report is
//! drawn from the monitor's last successful result only; background failures
//! never clear it.
//!
//! Report layout, top to bottom: header, category chips, sentiment trend
//! chart, then a scrollable body with the executive summary, the word cloud,
//! and the action items. Selecting a category only highlights its chip and
//! scopes the next request; the body always shows the whole report.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Wrap},
};
use skypulse_core::report::{score_percent, DashboardReport};

use super::layout::{inner_rect, panel_block, spinner};
use super::wrap_text;
use crate::app::AppState;
use crate::theme::Theme;

const CHART_HEIGHT: u16 = 10;

pub fn render_report(
    frame: &mut Frame,
    area: Rect,
    is_focused: bool,
    state: &mut AppState,
    theme: &Theme,
) {
    let title = Line::from(format!(" {} ", state.monitor.brand().product));
    frame.render_widget(panel_block(title, is_focused, theme), area);

    let inner = inner_rect(area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if state.monitor.report().is_none() {
        state.report_viewport_height = inner.height;
        if state.monitor.is_loading() {
            render_loading(frame, inner, state, theme);
        } else {
            render_landing(frame, inner, state, theme);
        }
        return;
    }

    let [header, chips, chart, body] = inner.layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(CHART_HEIGHT),
        Constraint::Fill(1),
    ]));

    render_header(frame, header, state, theme);
    let lines = match state.monitor.report() {
        Some(report) => {
            render_chips(frame, chips, report, state, theme);
            render_trend(frame, chart, report, theme);
            body_lines(report, theme, body.width as usize)
        }
        None => Vec::new(),
    };

    state.report_viewport_height = body.height;
    let max_scroll = (lines.len() as u16).saturating_sub(body.height);
    state.report_scroll = state.report_scroll.min(max_scroll);
    frame.render_widget(Paragraph::new(lines).scroll((state.report_scroll, 0)), body);
}

fn render_landing(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let brand = state.monitor.brand();
    let accent = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(""),
        Line::styled(brand.product, accent).centered(),
        Line::styled(brand.live_banner, Style::default().fg(theme.muted)).centered(),
        Line::from(""),
        Line::styled(
            "Aggregate reviews from every channel and let the model surface what matters.",
            Style::default().fg(theme.text),
        )
        .centered(),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("Enter", accent),
            Span::raw(" to start monitoring"),
        ])
        .centered(),
    ];
    if let Some(err) = state.monitor.last_error() {
        lines.push(Line::from(""));
        lines.push(
            Line::styled(format!("Initial analysis failed: {err}"), Style::default().fg(theme.status_error))
                .centered(),
        );
        lines.push(Line::styled("Press Enter to retry.", Style::default().fg(theme.muted)).centered());
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_loading(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::styled(
            format!("{} Analyzing {} reviews…", spinner(state), state.monitor.log().len()),
            Style::default().fg(theme.accent),
        )
        .centered(),
        Line::styled("Waiting for the model. This can take a minute.", Style::default().fg(theme.muted))
            .centered(),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let monitor = &state.monitor;
    let mut spans = vec![Span::styled(
        monitor.brand().live_banner,
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    )];
    if let Some(at) = monitor.report_updated_at() {
        spans.push(Span::styled(
            format!("  updated {}", at.format("%H:%M:%S")),
            Style::default().fg(theme.muted),
        ));
    }
    if monitor.is_background_updating() {
        spans.push(Span::styled(
            format!("  {} refreshing", spinner(state)),
            Style::default().fg(theme.accent),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// One chip per category plus "All"; the selected one is reversed.
fn render_chips(frame: &mut Frame, area: Rect, report: &DashboardReport, state: &AppState, theme: &Theme) {
    let selected = state.monitor.selected_category().map(|c| c.name.as_str());
    let chip = |label: String, active: bool, color: Color| {
        let style = Style::default().fg(color);
        if active {
            Span::styled(label, style.add_modifier(Modifier::REVERSED | Modifier::BOLD))
        } else {
            Span::styled(label, style)
        }
    };

    let mut spans = vec![chip(" All ".to_owned(), selected.is_none(), theme.accent), Span::raw(" ")];
    for category in &report.categories {
        let label = format!(" {} {} ", category.name, score_percent(category.sentiment_score));
        let active = selected == Some(category.name.as_str());
        spans.push(chip(label, active, theme.score_color(category.sentiment_score)));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true }), area);
}

/// Trend line over `[-1, 1]` with a dotted zero reference.
fn render_trend(frame: &mut Frame, area: Rect, report: &DashboardReport, theme: &Theme) {
    let points: Vec<(f64, f64)> = report
        .sentiment_trend
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.score))
        .collect();
    let x_max = (points.len().max(2) - 1) as f64;
    let zero = [(0.0, 0.0), (x_max, 0.0)];
    let last_score = points.last().map_or(0.0, |p| p.1);

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.neutral))
            .data(&zero),
        Dataset::default()
            .name("sentiment")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.score_color(last_score)))
            .data(&points),
    ];

    let x_labels: Vec<Line> = match (report.sentiment_trend.first(), report.sentiment_trend.last()) {
        (Some(first), Some(last)) if report.sentiment_trend.len() > 1 => {
            vec![Line::from(first.date.clone()), Line::from(last.date.clone())]
        }
        (Some(only), _) => vec![Line::from(only.date.clone())],
        _ => Vec::new(),
    };

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(x_labels)
                .style(Style::default().fg(theme.muted)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .labels(vec![Line::from("-1"), Line::from("0"), Line::from("1")])
                .style(Style::default().fg(theme.muted)),
        )
        .legend_position(None);
    frame.render_widget(chart, area);
}

fn section(title: &str, theme: &Theme) -> Line<'static> {
    Line::styled(
        title.to_owned(),
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )
}

fn body_lines(report: &DashboardReport, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let text_style = Style::default().fg(theme.text);
    let mut lines = vec![section("Executive summary", theme)];
    lines.extend(
        wrap_text(&report.executive_summary, width)
            .into_iter()
            .map(|l| Line::styled(l, text_style)),
    );

    lines.push(Line::from(""));
    lines.push(section("Word cloud", theme));
    lines.extend(word_cloud_lines(report, theme, width));

    lines.push(Line::from(""));
    lines.push(section("Action items", theme));
    if report.actionable_areas.is_empty() {
        lines.push(Line::styled("Nothing flagged.", Style::default().fg(theme.muted)));
    }
    for area in &report.actionable_areas {
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", area.impact.as_str()),
                Style::default().fg(theme.impact_color(area.impact)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(area.title.clone(), text_style.add_modifier(Modifier::BOLD)),
        ]));
        lines.extend(
            wrap_text(&area.description, width.saturating_sub(2))
                .into_iter()
                .map(|l| Line::styled(format!("  {l}"), Style::default().fg(theme.muted))),
        );
    }
    lines
}

/// Words packed into lines; heavier words are bold, the heaviest also upper-cased.
fn word_cloud_lines(report: &DashboardReport, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    for (item, weight) in report.word_weights() {
        let mut style = Style::default().fg(theme.word_color(item.sentiment));
        let text = if weight >= 0.75 {
            style = style.add_modifier(Modifier::BOLD);
            item.text.to_uppercase()
        } else if weight >= 0.4 {
            style = style.add_modifier(Modifier::BOLD);
            item.text.clone()
        } else if weight < 0.15 {
            style = style.add_modifier(Modifier::DIM);
            item.text.clone()
        } else {
            item.text.clone()
        };
        let len = text.chars().count() + 2;
        if used > 0 && used + len > width {
            out.push(Line::from(std::mem::take(&mut spans)));
            used = 0;
        }
        spans.push(Span::styled(text, style));
        spans.push(Span::raw("  "));
        used += len;
    }
    if !spans.is_empty() {
        out.push(Line::from(spans));
    }
    out
}

#[cfg(test)]
mod tests {
    use skypulse_core::report::{CategoryData, DashboardReport};

    use super::body_lines;
    use crate::app::tests::test_state;
    use crate::theme::Theme;

    fn one_category_report() -> DashboardReport {
        DashboardReport {
            executive_summary: "Network-wide sentiment is steady.".to_owned(),
            actionable_areas: Vec::new(),
            sentiment_trend: Vec::new(),
            word_cloud: Vec::new(),
            categories: vec![CategoryData {
                name: "Crew Performance".to_owned(),
                sentiment_score: 0.5,
                summary: "Cabin crew praised on long-haul routes.".to_owned(),
                keywords: vec!["crew".to_owned()],
            }],
        }
    }

    #[test]
    fn category_selection_does_not_change_report_body() {
        let (mut state, _rx) = test_state();
        let theme = Theme::dark();
        state.monitor.replace_report(one_category_report());

        let before = body_lines(state.monitor.report().unwrap(), &theme, 60);
        state.cycle_category(true);
        assert_eq!(state.monitor.active_category(), Some("Crew Performance"));
        let after = body_lines(state.monitor.report().unwrap(), &theme, 60);

        assert_eq!(before, after);
        assert_eq!(after[1].to_string(), "Network-wide sentiment is steady.");
        assert!(!after.iter().any(|l| l.to_string().contains("Cabin crew")));
    }
}
