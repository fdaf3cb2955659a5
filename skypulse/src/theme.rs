//! Color theme system for skypulse.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI surface
//! skypulse renders. Three built-in themes are provided:
//!
//! - `dark` — ANSI 16 colors only, safe on any terminal including SSH sessions.
//! - `horizon` — warm gold-on-charcoal RGB palette for the Etihad brand.
//! - `catppuccin_mocha` — Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;
use skypulse_core::report::{Impact, WordSentiment};
use skypulse_core::types::Source;

/// All color values used across skypulse's UI surfaces.
///
/// Callers use `theme.field` directly inside `Style::default().fg(theme.accent)`.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the currently focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Branding
    /// Brand accent: header product name, live indicator, selected chip.
    pub accent: Color,
    /// Body text.
    pub text: Color,
    /// Secondary text: timestamps, placeholders, hints.
    pub muted: Color,

    // Sentiment
    /// Positive scores and praise words.
    pub positive: Color,
    /// Negative scores and complaint words.
    pub negative: Color,
    /// Zero reference line on the trend chart.
    pub neutral: Color,

    // Action item badges
    pub impact_high: Color,
    pub impact_medium: Color,
    pub impact_low: Color,

    // Chat
    pub chat_user: Color,
    pub chat_model: Color,
    pub chat_thought: Color,

    // Status bar
    /// Status bar background.
    pub status_bar_bg: Color,
    /// Status bar foreground (general text).
    pub status_bar_fg: Color,
    /// Mode indicator color when in NORMAL mode.
    pub status_mode_normal: Color,
    /// Mode indicator color when in INSERT mode.
    pub status_mode_insert: Color,
    /// LIVE badge color.
    pub status_live: Color,
    /// Error text in the status bar.
    pub status_error: Color,

    // General
    /// Application background (used for clearing areas).
    pub background: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    ///
    /// Works on all terminals: 16-color, 256-color, and truecolor.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            accent: Color::Yellow,
            text: Color::Reset,
            muted: Color::DarkGray,

            positive: Color::Green,
            negative: Color::Red,
            neutral: Color::DarkGray,

            impact_high: Color::Red,
            impact_medium: Color::Yellow,
            impact_low: Color::Blue,

            chat_user: Color::Cyan,
            chat_model: Color::Reset,
            chat_thought: Color::DarkGray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_insert: Color::Green,
            status_live: Color::Green,
            status_error: Color::LightRed,

            background: Color::Reset,
        }
    }

    /// Gold-on-charcoal palette matching the Etihad Horizon branding.
    ///
    /// Requires a truecolor terminal for faithful rendering.
    pub fn horizon() -> Self {
        let gold = Color::Rgb(196, 164, 104);     // #c4a468
        let charcoal = Color::Rgb(45, 41, 38);    // #2d2926
        let sand = Color::Rgb(238, 235, 227);     // #eeebe3
        let stone = Color::Rgb(140, 134, 124);
        let emerald = Color::Rgb(5, 150, 105);
        let rose = Color::Rgb(225, 29, 72);

        Self {
            border_active: gold,
            border_inactive: stone,

            accent: gold,
            text: sand,
            muted: stone,

            positive: emerald,
            negative: rose,
            neutral: stone,

            impact_high: gold,
            impact_medium: sand,
            impact_low: stone,

            chat_user: gold,
            chat_model: sand,
            chat_thought: stone,

            status_bar_bg: charcoal,
            status_bar_fg: sand,
            status_mode_normal: gold,
            status_mode_insert: emerald,
            status_live: gold,
            status_error: rose,

            background: Color::Reset,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let red = Color::Rgb(243, 139, 168);      // #f38ba8
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let blue = Color::Rgb(137, 180, 250);     // #89b4fa
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let base = Color::Rgb(30, 30, 46);        // #1e1e2e
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4
        let peach = Color::Rgb(250, 179, 135);    // #fab387

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            accent: peach,
            text,
            muted: overlay1,

            positive: green,
            negative: red,
            neutral: overlay1,

            impact_high: red,
            impact_medium: yellow,
            impact_low: blue,

            chat_user: lavender,
            chat_model: text,
            chat_thought: overlay1,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_insert: green,
            status_live: green,
            status_error: red,

            background: base,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never prevents
    /// startup. The fallback is logged as a warning.
    pub fn from_name(name: &str) -> Self {
        match name {
            "horizon" => Self::horizon(),
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }

    /// Color for a score in `[-1, 1]`: positive above zero, negative below.
    pub fn score_color(&self, score: f64) -> Color {
        if score > 0.0 {
            self.positive
        } else if score < 0.0 {
            self.negative
        } else {
            self.neutral
        }
    }

    pub fn impact_color(&self, impact: Impact) -> Color {
        match impact {
            Impact::High => self.impact_high,
            Impact::Medium => self.impact_medium,
            Impact::Low => self.impact_low,
        }
    }

    pub fn word_color(&self, sentiment: WordSentiment) -> Color {
        match sentiment {
            WordSentiment::Praise => self.accent,
            WordSentiment::Complaint => self.negative,
        }
    }

    /// Per-channel badge color. Fixed across themes so channels stay recognisable.
    pub fn source_color(&self, source: Source) -> Color {
        match source {
            Source::Twitter => Color::LightCyan,
            Source::Google => Color::LightRed,
            Source::Yelp => Color::Red,
            Source::Facebook => Color::Blue,
            Source::Linkedin => Color::LightBlue,
            Source::Reddit => Color::Rgb(255, 69, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_falls_back_to_dark() {
        assert_eq!(Theme::from_name("nope").border_active, Theme::dark().border_active);
    }

    #[test]
    fn score_color_splits_on_zero() {
        let theme = Theme::dark();
        assert_eq!(theme.score_color(0.4), theme.positive);
        assert_eq!(theme.score_color(-0.1), theme.negative);
        assert_eq!(theme.score_color(0.0), theme.neutral);
    }
}
