//! Application state and core logic

use crate::config::TuiConfig;
use crate::scheduler::{SubmitScheduler, TokioScheduler};
use crate::state::{
    AppState, EngineError, FieldKind, Focus, FormEngine, FormSchema, Notice, SubmitOutcome,
    SubmitTicket,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tokio::sync::mpsc;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Delivers accepted submissions back after the simulated latency
    scheduler: Box<dyn SubmitScheduler>,
    /// Tickets whose delay has elapsed
    completions: Option<mpsc::UnboundedReceiver<SubmitTicket>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance with the built-in schema
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let schema = FormSchema::builtin()?;
        let engine = FormEngine::new(schema, config.default_data_type.as_deref());
        let (scheduler, completions) = TokioScheduler::new(config.submit_delay());

        tracing::info!(
            delay_ms = config.submit_delay().as_millis() as u64,
            "Form engine ready"
        );
        Ok(Self::with_scheduler(
            engine,
            Box::new(scheduler),
            Some(completions),
        ))
    }

    /// Create an App around an existing engine and scheduler
    pub fn with_scheduler(
        engine: FormEngine,
        scheduler: Box<dyn SubmitScheduler>,
        completions: Option<mpsc::UnboundedReceiver<SubmitTicket>>,
    ) -> Self {
        Self {
            state: AppState::new(engine),
            scheduler,
            completions,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Log a refused action and surface it in the status bar
    fn report(&mut self, err: EngineError) {
        tracing::warn!(%err, "Action rejected");
        self.state.status_message = Some(err.to_string());
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Dialogs are modal
        if self.state.engine.current_notice().is_some() {
            self.handle_notice_key(key);
            return;
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        // Submit shortcuts work from anywhere
        let submit_shortcut = (key.code == KeyCode::Char('s')
            && key.modifiers.contains(KeyModifiers::CONTROL))
            || (key.code == KeyCode::Enter
                && key.modifiers.contains(crate::platform::SUBMIT_MODIFIER));
        if submit_shortcut {
            if !self.state.engine.fields().is_empty() {
                self.submit();
            }
            return;
        }

        match key.code {
            KeyCode::Tab => return self.state.next_focus(),
            KeyCode::BackTab => return self.state.prev_focus(),
            KeyCode::Esc => return self.state.set_focus(Focus::FormType),
            _ => {}
        }

        match self.state.focus {
            Focus::FormType => self.handle_form_type_key(key),
            Focus::Field(index) => self.handle_field_key(index, key),
            Focus::Submit => self.handle_submit_key(key),
            Focus::Records => self.handle_records_key(key),
        }
    }

    /// Keys on the form-type selector
    fn handle_form_type_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.cycle_form_type(false),
            KeyCode::Right | KeyCode::Char('l') => self.cycle_form_type(true),
            KeyCode::Enter | KeyCode::Down => self.state.next_focus(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn cycle_form_type(&mut self, forward: bool) {
        let next = self
            .state
            .engine
            .schema()
            .cycle(self.state.engine.active_type(), forward);
        self.select_form_type(next.as_deref());
    }

    /// Switch the active form type and reset focus/selection
    pub fn select_form_type(&mut self, key: Option<&str>) {
        match self.state.engine.select_form_type(key) {
            Ok(()) => {
                self.state.selected_record = 0;
                self.state.normalize();
            }
            Err(err) => self.report(err),
        }
    }

    /// Keys on a field input, dispatched on the field's kind
    fn handle_field_key(&mut self, index: usize, key: KeyEvent) {
        let Some(field) = self.state.engine.fields().get(index) else {
            self.state.normalize();
            return;
        };
        let name = field.name.clone();
        let kind = field.kind.clone();

        let result = match (&kind, key.code) {
            (_, KeyCode::Up) => {
                self.state.prev_focus();
                Ok(())
            }
            (_, KeyCode::Down) => {
                self.state.next_focus();
                Ok(())
            }
            (FieldKind::Dropdown { .. }, KeyCode::Left) => {
                self.state.engine.cycle_option(&name, false)
            }
            (FieldKind::Dropdown { .. }, KeyCode::Right | KeyCode::Char(' ')) => {
                self.state.engine.cycle_option(&name, true)
            }
            (FieldKind::File, KeyCode::Char(c)) if kind.accepts_char(c) => {
                self.state.file_input.push(c);
                Ok(())
            }
            (FieldKind::File, KeyCode::Backspace) => {
                self.state.file_input.pop();
                Ok(())
            }
            (FieldKind::File, KeyCode::Enter) => self.attach_file(&name),
            (_, KeyCode::Char(c)) if kind.is_typed() && kind.accepts_char(c) => {
                self.state.engine.input_char(&name, c)
            }
            (_, KeyCode::Backspace) if kind.is_typed() => self.state.engine.backspace(&name),
            (_, KeyCode::Enter) => {
                self.state.next_focus();
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(err) = result {
            self.report(err);
        }
    }

    fn attach_file(&mut self, name: &str) -> Result<(), EngineError> {
        let path = self.state.file_input.clone();
        self.state.engine.attach_file(name, &path)?;
        self.state.file_input.clear();
        Ok(())
    }

    /// Keys on the submit button
    fn handle_submit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.submit(),
            KeyCode::Up => self.state.prev_focus(),
            KeyCode::Down => self.state.next_focus(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Validate and, when valid, start the simulated latency
    pub fn submit(&mut self) {
        match self.state.engine.begin_submit() {
            Ok(SubmitOutcome::Scheduled(ticket)) => {
                self.state.busy_since = Some(Instant::now());
                self.scheduler.schedule(ticket);
            }
            Ok(SubmitOutcome::Invalid) => {}
            Err(err) => self.report(err),
        }
    }

    /// Keys on the submitted-records table
    fn handle_records_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.state.selected_record == 0 {
                    self.state.prev_focus();
                } else {
                    self.state.move_selection_up();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(),
            KeyCode::Left => self.cycle_data_type(false),
            KeyCode::Right => self.cycle_data_type(true),
            KeyCode::Char('e') | KeyCode::Enter => self.edit_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn cycle_data_type(&mut self, forward: bool) {
        self.state.engine.cycle_data_type(forward);
        self.state.selected_record = 0;
        self.state.normalize();
    }

    /// Load the selected record into the form
    fn edit_selected(&mut self) {
        let Some(id) = self.state.selected_record_id() else {
            return;
        };
        match self.state.engine.edit(id) {
            Ok(()) => {
                self.state.set_focus(Focus::Field(0));
                self.state.status_message = Some("Editing entry".to_string());
            }
            Err(err) => self.report(err),
        }
    }

    /// Ask to delete the selected record
    fn delete_selected(&mut self) {
        let Some(id) = self.state.selected_record_id() else {
            return;
        };
        if let Err(err) = self.state.engine.request_delete(id) {
            self.report(err);
        }
    }

    /// Keys while a dialog is open
    fn handle_notice_key(&mut self, key: KeyEvent) {
        let confirming = matches!(
            self.state.engine.current_notice(),
            Some(Notice::ConfirmDelete(_))
        );

        if confirming {
            let result = match key.code {
                KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                    self.state.engine.toggle_delete_choice();
                    Ok(())
                }
                KeyCode::Enter => self.state.engine.resolve_delete().map(|_| ()),
                KeyCode::Char('y') => self.state.engine.confirm_delete().map(|_| ()),
                KeyCode::Char('n') | KeyCode::Esc => self.state.engine.cancel_delete(),
                _ => Ok(()),
            };
            if let Err(err) = result {
                self.report(err);
            }
            self.state.normalize();
            return;
        }

        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.state.engine.dismiss_notice();
        }
    }

    /// Complete every submission whose delay has elapsed
    pub fn poll_submissions(&mut self) {
        let mut ready = Vec::new();
        if let Some(rx) = self.completions.as_mut() {
            while let Ok(ticket) = rx.try_recv() {
                ready.push(ticket);
            }
        }
        for ticket in ready {
            self.complete_submission(ticket);
        }
    }

    /// Finish one submission
    pub fn complete_submission(&mut self, ticket: SubmitTicket) {
        match self.state.engine.complete_submit(ticket) {
            Ok(_) => {
                self.state.busy_since = None;
                self.state.normalize();
            }
            Err(err) => self.report(err),
        }
    }
}
