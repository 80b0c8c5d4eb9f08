//! UI module: View components for the TUI.

pub mod form;
pub mod result;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::SchemaId;
use crate::tui::styles::MedicalTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect, schema: SchemaId) {
    let text = vec![
        Line::from(vec![Span::styled(
            "DISCLAIMER: This screening tool gives an indicative estimate and does not replace professional medical evaluation.",
            MedicalTheme::text_muted(),
        )]),
        Line::from(vec![
            Span::styled("Feature schema: ", MedicalTheme::text_muted()),
            Span::styled(schema.to_string(), MedicalTheme::text_secondary()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
