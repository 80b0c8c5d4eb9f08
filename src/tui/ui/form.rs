//! Patient data input form.
//!
//! Numeric metrics are sliders bounded by the reference dataset; categorical
//! inputs are selectors whose options come from the active feature schema.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{
    Bounds, BoundsError, BoundsTable, FeatureSchema, Field, FieldKind, PatientRecord,
};
use crate::tui::styles::MedicalTheme;

/// Field order on screen.
const FORM_ORDER: [Field; 8] = [
    Field::Gender,
    Field::Age,
    Field::Hypertension,
    Field::HeartDisease,
    Field::SmokingHistory,
    Field::Bmi,
    Field::HbA1cLevel,
    Field::BloodGlucoseLevel,
];

/// Coarse steps move this many fine steps.
const COARSE_FACTOR: f64 = 10.0;

/// Input widget behind one form row.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Slider {
        bounds: Bounds,
        initial: f64,
        value: f64,
        step: f64,
    },
    Toggle {
        value: bool,
    },
    Select {
        options: Vec<&'static str>,
        selected: usize,
    },
}

/// One row of the form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormControl {
    pub field: Field,
    pub input: Input,
}

impl FormControl {
    fn step(&mut self, direction: f64, coarse: bool) {
        match &mut self.input {
            Input::Slider {
                bounds,
                value,
                step,
                ..
            } => {
                let delta = if coarse { *step * COARSE_FACTOR } else { *step };
                // Snap to the step grid so repeated 0.1 steps do not drift.
                let next = ((*value + direction * delta) / *step).round() * *step;
                *value = bounds.clamp(next);
            }
            Input::Toggle { value } => *value = !*value,
            Input::Select { options, selected } => {
                let len = options.len();
                if len > 0 {
                    *selected = if direction > 0.0 {
                        (*selected + 1) % len
                    } else {
                        (*selected + len - 1) % len
                    };
                }
            }
        }
    }

    fn reset(&mut self) {
        match &mut self.input {
            Input::Slider { initial, value, .. } => *value = *initial,
            Input::Toggle { value } => *value = false,
            Input::Select { selected, .. } => *selected = 0,
        }
    }

    /// Current value as shown on screen.
    #[must_use]
    pub fn display_value(&self) -> String {
        match &self.input {
            Input::Slider {
                bounds: Bounds::Integer { .. },
                value,
                ..
            } => format!("{value:.0}"),
            Input::Slider { value, .. } => format!("{value:.2}"),
            Input::Toggle { value } => {
                if *value {
                    "1 (Yes)".into()
                } else {
                    "0 (No)".into()
                }
            }
            Input::Select { options, selected } => options
                .get(*selected)
                .map_or_else(String::new, |o| (*o).to_string()),
        }
    }
}

/// Patient form state
#[derive(Debug, Clone)]
pub struct FormState {
    pub controls: Vec<FormControl>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl FormState {
    /// Build the form for a schema, seeding sliders from `bounds`.
    ///
    /// Fields the schema does not read get no control.
    ///
    /// # Errors
    /// Returns error if a numeric field the schema reads has no bounds.
    pub fn new(schema: &FeatureSchema, bounds: &BoundsTable) -> Result<Self, BoundsError> {
        let baseline = PatientRecord::baseline("", "");
        let mut controls = Vec::with_capacity(FORM_ORDER.len());

        for field in FORM_ORDER {
            if !schema.uses(field) {
                continue;
            }

            let input = match field.kind() {
                FieldKind::Numeric(_) => {
                    let bounds = bounds.field(field)?;
                    let initial = bounds.clamp(numeric_value(&baseline, field));
                    Input::Slider {
                        bounds,
                        initial,
                        value: initial,
                        step: fine_step(&bounds),
                    }
                }
                FieldKind::Flag => Input::Toggle { value: false },
                FieldKind::Categorical => Input::Select {
                    options: schema.categories(field).to_vec(),
                    selected: 0,
                },
            };
            controls.push(FormControl { field, input });
        }

        Ok(Self {
            controls,
            selected_field: 0,
            error_message: None,
        })
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        if !self.controls.is_empty() {
            self.selected_field = (self.selected_field + 1) % self.controls.len();
        }
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.controls.len().saturating_sub(1);
        } else {
            self.selected_field -= 1;
        }
    }

    /// Step the focused slider or cycle the focused selector.
    pub fn increase(&mut self, coarse: bool) {
        self.step_focused(1.0, coarse);
    }

    pub fn decrease(&mut self, coarse: bool) {
        self.step_focused(-1.0, coarse);
    }

    fn step_focused(&mut self, direction: f64, coarse: bool) {
        if let Some(control) = self.controls.get_mut(self.selected_field) {
            control.step(direction, coarse);
            self.error_message = None;
        }
    }

    /// Restore every control to its initial value.
    pub fn reset(&mut self) {
        for control in &mut self.controls {
            control.reset();
        }
        self.selected_field = 0;
        self.error_message = None;
    }

    #[must_use]
    pub fn control(&self, field: Field) -> Option<&FormControl> {
        self.controls.iter().find(|c| c.field == field)
    }

    /// Collect the current inputs into a record.
    ///
    /// Categorical fields without a control carry an empty label; the schema
    /// does not read them.
    #[must_use]
    pub fn to_record(&self) -> PatientRecord {
        let mut record = PatientRecord::baseline("", "");

        for control in &self.controls {
            match (&control.input, control.field) {
                (Input::Slider { value, .. }, Field::Age) => record.age = value.round() as i64,
                (Input::Slider { value, .. }, Field::Bmi) => record.bmi = *value,
                (Input::Slider { value, .. }, Field::HbA1cLevel) => record.hba1c_level = *value,
                (Input::Slider { value, .. }, Field::BloodGlucoseLevel) => {
                    record.blood_glucose_level = value.round() as i64;
                }
                (Input::Toggle { value }, Field::Hypertension) => record.hypertension = *value,
                (Input::Toggle { value }, Field::HeartDisease) => record.heart_disease = *value,
                (Input::Select { .. }, Field::Gender) => record.gender = control.display_value(),
                (Input::Select { .. }, Field::SmokingHistory) => {
                    record.smoking_history = control.display_value();
                }
                _ => {}
            }
        }

        record
    }
}

fn numeric_value(record: &PatientRecord, field: Field) -> f64 {
    match field {
        Field::Age => record.age as f64,
        Field::Bmi => record.bmi,
        Field::HbA1cLevel => record.hba1c_level,
        Field::BloodGlucoseLevel => record.blood_glucose_level as f64,
        _ => 0.0,
    }
}

fn fine_step(bounds: &Bounds) -> f64 {
    match bounds {
        Bounds::Integer { .. } => 1.0,
        Bounds::Real { .. } => 0.1,
    }
}

/// Render the patient data input form
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Diabetes Risk Screening", MedicalTheme::title()),
        Span::styled(" │ Patient Health Metrics", MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &FormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.controls.len() + 1) / 2;

    render_control_column(f, columns[0], &state.controls[..mid], 0, state.selected_field);
    render_control_column(
        f,
        columns[1],
        &state.controls[mid..],
        mid,
        state.selected_field,
    );
}

fn render_control_column(
    f: &mut Frame,
    area: Rect,
    controls: &[FormControl],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = controls
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, control) in controls.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (MedicalTheme::border_focused(), MedicalTheme::accent())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", control.field.display_name()),
                title_style,
            ))
            .borders(Borders::ALL)
            .border_style(border_style);

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(if is_selected { "◀ " } else { "  " }, MedicalTheme::accent()),
            Span::styled(control.display_value(), MedicalTheme::text()),
            Span::styled(if is_selected { " ▶" } else { "  " }, MedicalTheme::accent()),
        ];
        if let Input::Slider { bounds, .. } = &control.input {
            let range = format!(
                "   {} to {}",
                format_bound(bounds, bounds.min_f64()),
                format_bound(bounds, bounds.max_f64())
            );
            spans.push(Span::styled(range, MedicalTheme::text_muted()));
        }

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[i]);
    }
}

fn format_bound(bounds: &Bounds, value: f64) -> String {
    match bounds {
        Bounds::Integer { .. } => format!("{value:.0}"),
        Bounds::Real { .. } => format!("{value:.2}"),
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &FormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else {
        MedicalTheme::key_hints(&[
            ("↑↓", "Navigate"),
            ("←→", "Adjust"),
            ("PgUp/PgDn", "Coarse"),
            ("Enter", "Predict"),
            ("R", "Reset"),
            ("Q", "Quit"),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
