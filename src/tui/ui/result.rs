//! Prediction result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::domain::Assessment;
use crate::tui::styles::MedicalTheme;

/// Result screen state
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Prediction made, progress bar still running
    Analyzing {
        assessment: Assessment,
        progress: f64,
    },
    /// Result revealed
    Complete { assessment: Assessment },
}

impl ResultState {
    #[must_use]
    pub fn is_analyzing(&self) -> bool {
        matches!(self, Self::Analyzing { .. })
    }
}

/// Render the result screen
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    match state {
        ResultState::Idle => render_idle(f, chunks[1]),
        ResultState::Analyzing { progress, .. } => render_progress(f, chunks[1], *progress),
        ResultState::Complete { assessment } => render_assessment(f, chunks[1], assessment),
    }
    render_result_footer(f, chunks[2], state);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Prediction", MedicalTheme::title()),
        Span::styled(" │ Diabetes Classifier", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Enter patient data to begin",
            MedicalTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_progress(f: &mut Frame, area: Rect, progress: f64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .margin(2)
        .split(area);

    let stage = Paragraph::new(Line::from(Span::styled(
        "Analyzing patient metrics...",
        MedicalTheme::accent(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(stage, chunks[0]);

    let progress = progress.clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::info())
        .percent((progress * 100.0) as u16)
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, chunks[1]);
}

fn render_assessment(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let block = Block::default()
        .title(Span::styled(" Result ", MedicalTheme::accent()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Message
            Constraint::Length(4), // Probability
            Constraint::Length(2), // Provenance
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let style = MedicalTheme::label(assessment.label);
    let icon = if assessment.is_positive() { "!" } else { "OK" };

    let message = Paragraph::new(Line::from(Span::styled(
        format!("{} {}", icon, assessment.label.message()),
        style.add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(message, chunks[0]);

    if let Some(probability) = assessment.probability {
        let probability = probability.clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(Span::styled(
                        " Model Probability ",
                        MedicalTheme::text_secondary(),
                    ))
                    .borders(Borders::ALL)
                    .border_style(MedicalTheme::border()),
            )
            .gauge_style(style)
            .percent((probability * 100.0) as u16)
            .label(format!("{:.1}%", probability * 100.0));
        f.render_widget(gauge, chunks[1]);
    }

    let provenance = Paragraph::new(Line::from(vec![
        Span::styled("Schema: ", MedicalTheme::text_secondary()),
        Span::styled(assessment.schema.to_string(), MedicalTheme::text()),
        Span::styled("  at ", MedicalTheme::text_secondary()),
        Span::styled(
            assessment.assessed_at.format("%H:%M:%S UTC").to_string(),
            MedicalTheme::text(),
        ),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(provenance, chunks[2]);
}

fn render_result_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    let content = match state {
        ResultState::Analyzing { .. } => Line::from(vec![Span::styled(
            "Processing...",
            MedicalTheme::text_muted(),
        )]),
        _ => MedicalTheme::key_hints(&[("Enter", "Back to Form"), ("Q", "Quit")]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
