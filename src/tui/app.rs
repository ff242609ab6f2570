//! Main TUI application state machine.
//!
//! Handles:
//! - Wizard step navigation and field editing
//! - Input event handling
//! - Async submission via background worker

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::HttpScoringService;
use crate::application::{Step, Wizard};
use crate::domain::{FieldId, FormPatch, Gender, PhysicalActivity};
use crate::ports::RiskScorer;

use super::ui::{
    form::{field_kind, render_form, FieldKind, FormView},
    render_disclaimer,
    results::render_results,
};
use super::worker::{SubmitProgress, SubmitWorker, SubmitWorkerHandle};

/// Main application state.
///
/// One logical owner for all mutable state: the wizard (step + form +
/// outcome) plus the transient UI concerns (field selection, pending
/// submission, error banner).
pub struct App<S: RiskScorer> {
    /// Wizard state machine
    wizard: Wizard,

    /// Scoring service client
    scorer: Arc<S>,

    /// Selected field index within the current step
    selected_field: usize,

    /// One-line failure notification shown in the footer
    error_message: Option<String>,

    /// Pending submission worker (submit is disabled while set)
    pending_worker: Option<SubmitWorkerHandle>,

    /// Whether the app should quit
    should_quit: bool,
}

impl App<HttpScoringService> {
    /// Create an application against the configured scoring endpoint.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        let scorer = Arc::new(HttpScoringService::from_env()?);
        Ok(Self::with_scorer(scorer))
    }
}

impl<S> App<S>
where
    S: RiskScorer + 'static,
{
    /// Create an application with an injected scoring client.
    #[must_use]
    pub fn with_scorer(scorer: Arc<S>) -> Self {
        Self {
            wizard: Wizard::new(),
            scorer,
            selected_field: 0,
            error_message: None,
            pending_worker: None,
            should_quit: false,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // Pick up any progress from a pending submission
            self.poll_worker();

            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Min(0),
                        Constraint::Length(3),
                    ])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.wizard.step() {
                    Step::Results => {
                        if let Some(outcome) = self.wizard.outcome() {
                            render_results(f, content_area, outcome);
                        }
                    }
                    step => {
                        let view = FormView {
                            step,
                            form: self.wizard.form(),
                            selected: self.selected_field,
                            error: self.error_message.as_deref(),
                            submitting: self.pending_worker.is_some(),
                            can_advance: self.wizard.can_advance(),
                        };
                        render_form(f, content_area, &view);
                    }
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Poll the background worker for progress updates.
    fn poll_worker(&mut self) {
        loop {
            let progress = match self
                .pending_worker
                .as_ref()
                .and_then(|worker| worker.try_recv())
            {
                Some(p) => p,
                None => break,
            };

            match progress {
                SubmitProgress::Sending => {}
                SubmitProgress::Complete(assessment) => {
                    tracing::info!(
                        "Assessment scored: {} ({})",
                        assessment.risk_category,
                        assessment.risk_level
                    );
                    self.wizard.complete(assessment);
                    self.pending_worker = None;
                    self.selected_field = 0;
                    self.error_message = None;
                    break;
                }
                SubmitProgress::Failed(message) => {
                    // One notification; the form stays as entered so the
                    // user can resubmit.
                    self.error_message = Some(message);
                    self.pending_worker = None;
                    break;
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.wizard.step() {
            Step::Results => self.handle_results_key(key),
            _ => self.handle_form_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                if self.wizard.previous() {
                    self.selected_field = 0;
                    self.error_message = None;
                }
            }
            KeyCode::Up => self.select_prev_field(),
            KeyCode::Down | KeyCode::Tab => self.select_next_field(),
            KeyCode::Left => self.cycle_field(false),
            KeyCode::Right | KeyCode::Char(' ') => self.cycle_field(true),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => self.input_char(c),
            KeyCode::Char('s') | KeyCode::Char('S') => self.load_sample_data(),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Delete => self.clear_field(),
            KeyCode::Enter => self.advance(),
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.wizard.reset();
                self.selected_field = 0;
                self.error_message = None;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn current_field(&self) -> FieldId {
        let fields = self.wizard.step().fields();
        fields[self.selected_field.min(fields.len() - 1)]
    }

    fn select_next_field(&mut self) {
        let count = self.wizard.step().fields().len();
        self.selected_field = (self.selected_field + 1) % count;
    }

    fn select_prev_field(&mut self) {
        let count = self.wizard.step().fields().len();
        if self.selected_field == 0 {
            self.selected_field = count - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    fn input_char(&mut self, c: char) {
        let field = self.current_field();
        if let Some(current) = self.wizard.form().text(field) {
            let mut value = current.to_string();
            value.push(c);
            if let Some(patch) = field.text_patch(value) {
                self.wizard.apply(patch);
                self.error_message = None;
            }
        }
    }

    fn delete_char(&mut self) {
        let field = self.current_field();
        if let Some(current) = self.wizard.form().text(field) {
            let mut value = current.to_string();
            value.pop();
            if let Some(patch) = field.text_patch(value) {
                self.wizard.apply(patch);
            }
        }
    }

    fn clear_field(&mut self) {
        let field = self.current_field();
        if let Some(patch) = field.text_patch(String::new()) {
            self.wizard.apply(patch);
        }
    }

    /// Change the value of a choice or toggle field.
    fn cycle_field(&mut self, forward: bool) {
        let field = self.current_field();
        if field_kind(field) == FieldKind::Numeric {
            return;
        }

        let patch = match field {
            FieldId::Gender => {
                let next = self
                    .wizard
                    .form()
                    .gender()
                    .map_or(Gender::Male, Gender::toggled);
                FormPatch::Gender(next)
            }
            FieldId::PhysicalActivity => {
                let next = match (self.wizard.form().physical_activity(), forward) {
                    (None, _) => PhysicalActivity::Sedentary,
                    (Some(a), true) => a.next(),
                    (Some(a), false) => a.prev(),
                };
                FormPatch::PhysicalActivity(next)
            }
            FieldId::Smoker => {
                FormPatch::Smoker(!self.wizard.form().flag(FieldId::Smoker).unwrap_or(false))
            }
            FieldId::Diabetes => {
                FormPatch::Diabetes(!self.wizard.form().flag(FieldId::Diabetes).unwrap_or(false))
            }
            FieldId::FamilyHistory => FormPatch::FamilyHistory(
                !self
                    .wizard
                    .form()
                    .flag(FieldId::FamilyHistory)
                    .unwrap_or(false),
            ),
            _ => return,
        };

        self.wizard.apply(patch);
        self.error_message = None;
    }

    /// Enter on a form step: advance, or submit from the final step.
    fn advance(&mut self) {
        match self.wizard.step() {
            Step::History => self.submit(),
            _ => {
                if self.wizard.next() {
                    self.selected_field = 0;
                    self.error_message = None;
                }
            }
        }
    }

    fn submit(&mut self) {
        // The submit control is disabled while a submission is pending.
        if self.pending_worker.is_some() {
            return;
        }

        match self.wizard.form().to_request() {
            Ok(request) => {
                tracing::info!("Submitting assessment");
                self.error_message = None;
                self.pending_worker = Some(SubmitWorker::spawn(self.scorer.clone(), request));
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Fill the form with a representative patient for demonstration.
    fn load_sample_data(&mut self) {
        // Sample: 55yo male, elevated BP and cholesterol, former desk job
        for patch in [
            FormPatch::Age("55".to_string()),
            FormPatch::Gender(Gender::Male),
            FormPatch::SystolicBp("142".to_string()),
            FormPatch::TotalCholesterol("228".to_string()),
            FormPatch::HdlCholesterol("42".to_string()),
            FormPatch::Bmi("29.1".to_string()),
            FormPatch::PhysicalActivity(PhysicalActivity::Light),
            FormPatch::Smoker(true),
            FormPatch::Diabetes(false),
            FormPatch::FamilyHistory(true),
        ] {
            self.wizard.apply(patch);
        }
        self.error_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssessmentRequest, FormData, RiskAssessment, RiskLevel};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct StubError(String);

    struct StubScorer {
        response: Result<RiskAssessment, String>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl StubScorer {
        fn ok(assessment: RiskAssessment) -> Self {
            Self {
                response: Ok(assessment),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl RiskScorer for StubScorer {
        type Error = StubError;

        fn assess(&self, _request: &AssessmentRequest) -> Result<RiskAssessment, StubError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            self.response.clone().map_err(StubError)
        }
    }

    fn borderline_assessment() -> RiskAssessment {
        RiskAssessment {
            risk_percentage: 8.2,
            risk_level: RiskLevel::Borderline,
            risk_category: "Borderline Risk".to_string(),
            recommendations: vec!["Maintain healthy diet".to_string()],
            assessment_id: None,
        }
    }

    fn fill_golden_form(app: &mut App<StubScorer>) {
        for patch in [
            FormPatch::Age("45".to_string()),
            FormPatch::Gender(Gender::Male),
            FormPatch::SystolicBp("130".to_string()),
            FormPatch::TotalCholesterol("200".to_string()),
            FormPatch::HdlCholesterol("50".to_string()),
            FormPatch::Bmi("24.5".to_string()),
            FormPatch::PhysicalActivity(PhysicalActivity::Moderate),
        ] {
            app.wizard.apply(patch);
        }
    }

    fn drive_to_history(app: &mut App<StubScorer>) {
        assert!(app.wizard.next());
        assert!(app.wizard.next());
        assert!(app.wizard.next());
        assert_eq!(app.wizard.step(), Step::History);
    }

    fn wait_for_worker(app: &mut App<StubScorer>) {
        for _ in 0..200 {
            app.poll_worker();
            if app.pending_worker.is_none() {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("submission worker did not finish");
    }

    #[test]
    fn test_enter_blocked_until_step_complete() {
        let mut app = App::with_scorer(Arc::new(StubScorer::ok(borderline_assessment())));

        app.handle_key(KeyCode::Char('4'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('5'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.wizard.step(), Step::Demographics);

        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        app.handle_key(KeyCode::Char(' '), KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.wizard.step(), Step::Vitals);
        assert_eq!(app.selected_field, 0);
    }

    #[test]
    fn test_golden_submission_reaches_results() {
        let mut app = App::with_scorer(Arc::new(StubScorer::ok(borderline_assessment())));
        fill_golden_form(&mut app);
        drive_to_history(&mut app);

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.pending_worker.is_some());
        wait_for_worker(&mut app);

        assert_eq!(app.wizard.step(), Step::Results);
        let outcome = app.wizard.outcome().expect("outcome");
        assert_eq!(outcome.risk_level, RiskLevel::Borderline);
        assert_eq!(
            crate::tui::ui::results::percent_label(outcome.risk_percentage),
            "8.2%"
        );
    }

    #[test]
    fn test_failed_submission_preserves_form() {
        let mut app = App::with_scorer(Arc::new(StubScorer::failing("service unavailable")));
        fill_golden_form(&mut app);
        drive_to_history(&mut app);
        let snapshot = app.wizard.form().clone();

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        wait_for_worker(&mut app);

        assert_eq!(app.wizard.step(), Step::History);
        assert_eq!(app.wizard.form(), &snapshot);
        assert_eq!(app.error_message.as_deref(), Some("service unavailable"));
    }

    #[test]
    fn test_submit_disabled_while_pending() {
        let scorer = Arc::new(StubScorer {
            response: Ok(borderline_assessment()),
            delay: Duration::from_millis(150),
            calls: AtomicUsize::new(0),
        });
        let mut app = App::with_scorer(scorer.clone());
        fill_golden_form(&mut app);
        drive_to_history(&mut app);

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        wait_for_worker(&mut app);

        assert_eq!(scorer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.wizard.step(), Step::Results);
    }

    #[test]
    fn test_invalid_number_surfaces_without_submitting() {
        let scorer = Arc::new(StubScorer::ok(borderline_assessment()));
        let mut app = App::with_scorer(scorer.clone());
        fill_golden_form(&mut app);
        app.wizard.apply(FormPatch::Bmi("24.5.1".to_string()));
        drive_to_history(&mut app);

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert!(app.pending_worker.is_none());
        assert_eq!(app.error_message.as_deref(), Some("BMI must be a number"));
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reset_from_results() {
        let mut app = App::with_scorer(Arc::new(StubScorer::ok(borderline_assessment())));
        fill_golden_form(&mut app);
        drive_to_history(&mut app);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        wait_for_worker(&mut app);
        assert_eq!(app.wizard.step(), Step::Results);

        app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(app.wizard.step(), Step::Demographics);
        assert!(app.wizard.outcome().is_none());
        assert_eq!(app.wizard.form(), &FormData::default());
    }

    #[test]
    fn test_editing_clears_error_banner() {
        let mut app = App::with_scorer(Arc::new(StubScorer::ok(borderline_assessment())));
        app.error_message = Some("stale".to_string());
        app.handle_key(KeyCode::Char('4'), KeyModifiers::NONE);
        assert!(app.error_message.is_none());
    }
}
