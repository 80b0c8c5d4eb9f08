//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - One synchronous prediction per request, followed by a cosmetic
//!   progress bar of fixed duration

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::application::AppContext;
use crate::ports::Predictor;
use crate::GlucoscopeError;

use super::ui::{
    form::{render_form, FormState},
    render_disclaimer,
    result::{render_result, ResultState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Result,
}

/// Main application state
pub struct App<P>
where
    P: Predictor + ?Sized,
{
    context: AppContext<P>,

    screen: Screen,

    should_quit: bool,

    form_state: FormState,

    result_state: ResultState,

    /// When the progress bar started
    analyzing_since: Option<Instant>,
}

impl<P> App<P>
where
    P: Predictor + ?Sized,
{
    /// Create the application for a loaded context.
    ///
    /// # Errors
    /// Returns error if the bounds do not cover the schema's numeric fields.
    pub fn new(context: AppContext<P>) -> Result<Self, GlucoscopeError> {
        let form_state = FormState::new(context.schema(), context.bounds())?;

        Ok(Self {
            context,
            screen: Screen::Form,
            should_quit: false,
            form_state,
            result_state: ResultState::default(),
            analyzing_since: None,
        })
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub fn form_state(&self) -> &FormState {
        &self.form_state
    }

    #[must_use]
    pub fn result_state(&self) -> &ResultState {
        &self.result_state
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.tick(Instant::now());

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(4)])
                    .split(f.area());

                match self.screen {
                    Screen::Form => render_form(f, chunks[0], &self.form_state),
                    Screen::Result => render_result(f, chunks[0], &self.result_state),
                }

                render_disclaimer(f, chunks[1], self.context.schema().id());
            })?;

            // Short poll keeps the progress bar moving.
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Advance the fake progress bar; reveal the result once the delay ran out.
    pub fn tick(&mut self, now: Instant) {
        let Some(started_at) = self.analyzing_since else {
            return;
        };
        let ResultState::Analyzing { assessment, .. } = &self.result_state else {
            return;
        };
        let assessment = assessment.clone();

        let delay = self.context.config().result_delay;
        let elapsed = now.saturating_duration_since(started_at);

        if elapsed >= delay {
            self.result_state = ResultState::Complete { assessment };
            self.analyzing_since = None;
        } else {
            let progress = elapsed.as_secs_f64() / delay.as_secs_f64();
            self.result_state = ResultState::Analyzing {
                assessment,
                progress,
            };
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Form => self.handle_form_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => self.form_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form_state.next_field(),
            KeyCode::Right => self.form_state.increase(false),
            KeyCode::Left => self.form_state.decrease(false),
            KeyCode::PageUp => self.form_state.increase(true),
            KeyCode::PageDown => self.form_state.decrease(true),
            KeyCode::Char('r') | KeyCode::Char('R') => self.form_state.reset(),
            KeyCode::Enter => self.submit_form(),
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        if self.result_state.is_analyzing() {
            return;
        }

        match key {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Backspace => {
                self.result_state = ResultState::Idle;
                self.screen = Screen::Form;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let record = self.form_state.to_record();

        match self.context.service().assess(&record) {
            Ok(assessment) => {
                self.form_state.error_message = None;
                self.result_state = ResultState::Analyzing {
                    assessment,
                    progress: 0.0,
                };
                self.analyzing_since = Some(Instant::now());
                self.screen = Screen::Result;
            }
            Err(e) => {
                tracing::warn!("Prediction failed: {}", e);
                self.form_state.error_message = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::{Bounds, BoundsTable, FeatureVector, Field, Label, SchemaVariant};
    use crate::ports::PredictorError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Positive whenever HbA1c (ordinal column 6) reaches 6.5.
    #[derive(Default)]
    struct HbA1cRule {
        calls: AtomicUsize,
    }

    impl Predictor for HbA1cRule {
        fn predict(&self, features: &FeatureVector) -> Result<Label, PredictorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let hba1c = features.to_f64()[6];
            Ok(if hba1c >= 6.5 {
                Label::Positive
            } else {
                Label::Negative
            })
        }
    }

    fn app(delay: Duration) -> App<HbA1cRule> {
        let config = AppConfig {
            result_delay: delay,
            ..AppConfig::default()
        };
        let bounds = BoundsTable::from_entries([
            ("age", Bounds::Integer { min: 0, max: 80 }),
            ("bmi", Bounds::Real { min: 10.0, max: 95.0 }),
            ("HbA1c_level", Bounds::Real { min: 3.5, max: 9.0 }),
            ("blood_glucose_level", Bounds::Integer { min: 80, max: 300 }),
        ]);
        let schema = SchemaVariant::Ordinal.schema().expect("schema");
        let context = AppContext::new(config, schema, Arc::new(HbA1cRule::default()), bounds)
            .expect("context");
        App::new(context).expect("app")
    }

    fn press(app: &mut App<HbA1cRule>, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    #[test]
    fn test_predict_then_reveal_after_delay() {
        let mut app = app(Duration::from_millis(2000));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Result);
        assert!(app.result_state().is_analyzing());
        assert_eq!(app.context.service().predictor().calls.load(Ordering::SeqCst), 1);

        let started = app.analyzing_since.expect("started");
        app.tick(started + Duration::from_millis(1000));
        match app.result_state() {
            ResultState::Analyzing { progress, .. } => assert!((progress - 0.5).abs() < 1e-9),
            other => panic!("unexpected state: {other:?}"),
        }

        // Keys other than the global quit are ignored while analyzing.
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Result);

        app.tick(started + Duration::from_millis(2000));
        match app.result_state() {
            ResultState::Complete { assessment } => {
                assert_eq!(assessment.label, Label::Negative);
                assert_eq!(assessment.label.message(), "No Diabetes Detected");
            }
            other => panic!("unexpected state: {other:?}"),
        }

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Form);
    }

    #[test]
    fn test_form_keys_reach_the_record() {
        let mut app = app(Duration::ZERO);

        while app.form_state().controls[app.form_state().selected_field].field
            != Field::HbA1cLevel
        {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::PageUp);
        assert!((app.form_state().to_record().hba1c_level - 6.7).abs() < 1e-9);

        press(&mut app, KeyCode::Enter);
        app.tick(Instant::now());
        match app.result_state() {
            ResultState::Complete { assessment } => {
                assert!(assessment.is_positive());
                assert_eq!(assessment.label.message(), "Diabetes Found");
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_reset_key() {
        let mut app = app(Duration::ZERO);
        let initial = app.form_state().to_record();

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        assert_ne!(app.form_state().to_record(), initial);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.form_state().to_record(), initial);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(Duration::ZERO);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = app_analyzing();
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit());
    }

    fn app_analyzing() -> App<HbA1cRule> {
        let mut app = app(Duration::from_secs(60));
        press(&mut app, KeyCode::Enter);
        assert!(app.result_state().is_analyzing());
        app
    }
}
