//! Main TUI application state machine.
//!
//! Handles:
//! - Form navigation and editing
//! - Language switching (re-renders everything, keeps the inputs)
//! - Submission through the assessment service

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::adapters::logistic::LogisticModel;
use crate::application::AssessmentService;
use crate::config::AppConfig;
use crate::domain::{Language, MessageKey, ValidationError};
use crate::ports::Classifier;
use crate::ChildriskError;

use super::ui::{
    form::{FormField, FormState},
    render,
    result::OutputState,
};

/// Main application state
pub struct App<C>
where
    C: Classifier,
{
    /// Whether the app should quit
    should_quit: bool,

    service: AssessmentService<C>,

    form: FormState,

    output: OutputState,
}

impl App<LogisticModel> {
    /// Create the application with the model named by `config`.
    ///
    /// # Errors
    /// Returns error if the model is missing, corrupt or fails its integrity
    /// check. The application must not start without a model.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let model = LogisticModel::load(&config.model_path, config.require_manifest)
            .map_err(ChildriskError::from)
            .with_context(|| {
                format!(
                    "Failed to load model from {}. Set CHILDRISK_MODEL_PATH to the model file or its directory.",
                    config.model_path.display()
                )
            })?;

        Ok(Self::with_dependencies(
            AssessmentService::new(Arc::new(model)),
            config.language,
        ))
    }
}

impl<C> App<C>
where
    C: Classifier,
{
    /// Create application with injected dependencies (Composition Root pattern).
    pub fn with_dependencies(service: AssessmentService<C>, language: Language) -> Self {
        Self {
            should_quit: false,
            service,
            form: FormState::new(language),
            output: OutputState::Idle,
        }
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[must_use]
    pub fn output(&self) -> &OutputState {
        &self.output
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
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
            terminal.draw(|f| render(f, &self.form, &self.output))?;

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

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }

        let field = self.form.selected_field();
        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(2) => self.switch_language(),
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Enter => match field {
                FormField::Submit => self.submit(),
                FormField::Symptom(symptom) => {
                    self.form.toggle_symptom(symptom);
                    self.edited();
                }
                _ => self.form.next_field(),
            },
            KeyCode::Left | KeyCode::Right => match field {
                FormField::Language => self.switch_language(),
                FormField::Age => {
                    let delta = if key == KeyCode::Left { -1 } else { 1 };
                    if self.form.adjust_age(delta) {
                        self.edited();
                    }
                }
                _ => {}
            },
            KeyCode::Char(' ') if field != FormField::Name => match field {
                FormField::Language => self.switch_language(),
                FormField::Symptom(symptom) => {
                    self.form.toggle_symptom(symptom);
                    self.edited();
                }
                _ => {}
            },
            KeyCode::Char(c)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if self.form.input_char(c) {
                    self.edited();
                }
            }
            KeyCode::Backspace => {
                if self.form.delete_char() {
                    self.edited();
                }
            }
            _ => {}
        }
    }

    fn switch_language(&mut self) {
        self.form.toggle_language();
        tracing::debug!("Language switched to {}", self.form.language);
    }

    /// A pending error no longer describes the form once it changes.
    fn edited(&mut self) {
        if self.output.is_error() {
            self.output = OutputState::Idle;
        }
    }

    fn submit(&mut self) {
        let result =
            self.service
                .submit(&self.form.name, self.form.age, self.form.checked_symptoms());

        self.output = match result {
            Ok(report) => OutputState::Report(Box::new(report)),
            Err(ChildriskError::Validation(ValidationError::EmptyName)) => {
                self.form.focus(FormField::Name);
                OutputState::Invalid(MessageKey::ErrorName)
            }
            Err(e) => {
                tracing::error!("Assessment failed: {e}");
                OutputState::Failed
            }
        };
    }
}
