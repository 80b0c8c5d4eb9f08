//! Screen palette.
//!
//! Teal chrome on a dark terminal. The two outcome colours come from
//! [`Label::color`] so the result panel and the label agree.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::domain::Label;

/// Styles shared by the form, result and disclaimer panels.
pub struct MedicalTheme;

impl MedicalTheme {
    pub const TEAL: Color = Color::Rgb(13, 148, 136);
    pub const TEAL_LIGHT: Color = Color::Rgb(45, 212, 191);
    pub const SLATE: Color = Color::Rgb(148, 163, 184);
    pub const SLATE_DARK: Color = Color::Rgb(100, 116, 139);
    pub const WHITE: Color = Color::Rgb(248, 250, 252);
    pub const ROSE: Color = Color::Rgb(244, 63, 94);
    pub const BLUE: Color = Color::Rgb(59, 130, 246);

    #[must_use]
    pub fn title() -> Style {
        Style::default().fg(Self::WHITE).add_modifier(Modifier::BOLD)
    }

    /// Panel titles, the focused row and key names.
    #[must_use]
    pub fn accent() -> Style {
        Style::default()
            .fg(Self::TEAL_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::WHITE)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::SLATE)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::SLATE_DARK)
    }

    /// Validation and encoding errors shown in the form footer.
    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::ROSE)
    }

    /// Progress gauge fill.
    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::BLUE)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SLATE)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::TEAL)
    }

    #[must_use]
    pub fn label(label: Label) -> Style {
        let (r, g, b) = label.color();
        Style::default().fg(Color::Rgb(r, g, b))
    }

    /// Footer line of `[key] action` pairs.
    #[must_use]
    pub fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
        let mut spans = Vec::with_capacity(hints.len() * 2);
        for (i, (key, action)) in hints.iter().enumerate() {
            let sep = if i + 1 < hints.len() { " " } else { "" };
            spans.push(Span::styled(format!("[{key}] "), Self::accent()));
            spans.push(Span::styled(format!("{action}{sep}"), Self::text_secondary()));
        }
        Line::from(spans)
    }
}
