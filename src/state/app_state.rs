//! Application state definitions

use super::{FieldDefinition, FormEngine, RecordId};
use std::time::Instant;

/// Spinner frames for the busy submit button
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Which control has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The form-type selector in the header
    #[default]
    FormType,
    /// Input for the field at this index of the active form type
    Field(usize),
    Submit,
    /// The submitted-records table
    Records,
}

/// Main application state
pub struct AppState {
    pub engine: FormEngine,
    pub focus: Focus,
    /// Selected row among the visible records
    pub selected_record: usize,
    /// Path being typed into the focused file field
    pub file_input: String,
    /// When the current submission started, for the spinner
    pub busy_since: Option<Instant>,
    /// One-line feedback shown in the status bar
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(engine: FormEngine) -> Self {
        Self {
            engine,
            focus: Focus::default(),
            selected_record: 0,
            file_input: String::new(),
            busy_since: None,
            status_message: None,
        }
    }

    /// Focus stops in display order
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::FormType];
        let field_count = self.engine.fields().len();
        if field_count > 0 {
            order.extend((0..field_count).map(Focus::Field));
            order.push(Focus::Submit);
        }
        if self.records_visible() {
            order.push(Focus::Records);
        }
        order
    }

    /// Move to the next focus stop (wraps around)
    pub fn next_focus(&mut self) {
        self.step_focus(true);
    }

    /// Move to the previous focus stop (wraps around)
    pub fn prev_focus(&mut self) {
        self.step_focus(false);
    }

    fn step_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let len = order.len();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else if current == 0 {
            len - 1
        } else {
            current - 1
        };
        self.set_focus(order[next]);
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.file_input.clear();
        }
        self.focus = focus;
    }

    /// Pull focus and row selection back in range after the field list or
    /// the record list changed
    pub fn normalize(&mut self) {
        if !self.focus_order().contains(&self.focus) {
            self.set_focus(Focus::FormType);
        }
        let visible = self.engine.visible_records().len();
        if self.selected_record >= visible {
            self.selected_record = visible.saturating_sub(1);
        }
    }

    /// Field definition under focus, if a field is focused
    pub fn focused_field(&self) -> Option<&FieldDefinition> {
        match self.focus {
            Focus::Field(index) => self.engine.fields().get(index),
            _ => None,
        }
    }

    /// Whether the records panel is shown. It stays up while its data-type
    /// selector points at a type with no entries, so the selector can move on.
    pub fn records_visible(&self) -> bool {
        self.engine.data_type().is_some() && !self.engine.records().is_empty()
    }

    pub fn selected_record_id(&self) -> Option<RecordId> {
        self.engine
            .visible_records()
            .get(self.selected_record)
            .map(|r| r.id)
    }

    pub fn move_selection_down(&mut self) {
        let max = self.engine.visible_records().len();
        if max > 0 && self.selected_record < max - 1 {
            self.selected_record += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_record = self.selected_record.saturating_sub(1);
    }

    /// Current spinner frame while a submission is in flight
    pub fn spinner_frame(&self) -> Option<&'static str> {
        let started = self.busy_since?;
        let index = (started.elapsed().as_millis() / 80) as usize % SPINNER_FRAMES.len();
        Some(SPINNER_FRAMES[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FormSchema, SubmitOutcome};

    fn state() -> AppState {
        AppState::new(FormEngine::new(FormSchema::builtin().unwrap(), None))
    }

    fn state_on(form_type: &str) -> AppState {
        let mut state = state();
        state.engine.select_form_type(Some(form_type)).unwrap();
        state
    }

    fn add_user(state: &mut AppState, first: &str) {
        state.engine.set_field("firstName", first).unwrap();
        state.engine.set_field("lastName", "Doe").unwrap();
        if let SubmitOutcome::Scheduled(ticket) = state.engine.begin_submit().unwrap() {
            state.engine.complete_submit(ticket).unwrap();
        }
    }

    mod focus {
        use super::*;

        #[test]
        fn test_placeholder_only_has_selector() {
            let state = state();
            assert_eq!(state.focus_order(), vec![Focus::FormType]);
        }

        #[test]
        fn test_order_covers_fields_then_submit() {
            let state = state_on("userInfo");
            assert_eq!(
                state.focus_order(),
                vec![
                    Focus::FormType,
                    Focus::Field(0),
                    Focus::Field(1),
                    Focus::Field(2),
                    Focus::Field(3),
                    Focus::Submit,
                ]
            );
        }

        #[test]
        fn test_records_join_order_once_visible() {
            let mut state = state_on("userInfo");
            add_user(&mut state, "Jane");
            assert_eq!(state.focus_order().last(), Some(&Focus::Records));
        }

        #[test]
        fn test_next_and_prev_wrap() {
            let mut state = state_on("userInfo");
            state.prev_focus();
            assert_eq!(state.focus, Focus::Submit);
            state.next_focus();
            assert_eq!(state.focus, Focus::FormType);
            state.next_focus();
            assert_eq!(state.focus, Focus::Field(0));
        }

        #[test]
        fn test_leaving_field_clears_file_input() {
            let mut state = state_on("userInfo");
            state.set_focus(Focus::Field(3));
            state.file_input.push_str("/tmp/a");
            state.next_focus();
            assert!(state.file_input.is_empty());
        }

        #[test]
        fn test_normalize_resets_stale_field_focus() {
            let mut state = state_on("paymentInfo");
            state.set_focus(Focus::Field(4));
            state.engine.select_form_type(Some("userInfo")).unwrap();
            state.normalize();
            assert_eq!(state.focus, Focus::FormType);
        }

        #[test]
        fn test_focused_field() {
            let mut state = state_on("addressInfo");
            state.set_focus(Focus::Field(2));
            assert_eq!(state.focused_field().unwrap().name, "state");
            state.set_focus(Focus::Submit);
            assert!(state.focused_field().is_none());
        }
    }

    mod selection {
        use super::*;

        #[test]
        fn test_selection_bounds() {
            let mut state = state_on("userInfo");
            add_user(&mut state, "A");
            add_user(&mut state, "B");
            state.move_selection_up();
            assert_eq!(state.selected_record, 0);
            state.move_selection_down();
            state.move_selection_down();
            assert_eq!(state.selected_record, 1);
        }

        #[test]
        fn test_normalize_clamps_selection() {
            let mut state = state_on("userInfo");
            add_user(&mut state, "A");
            state.selected_record = 5;
            state.normalize();
            assert_eq!(state.selected_record, 0);
        }

        #[test]
        fn test_records_stay_focusable_on_empty_data_type() {
            let mut state = state_on("userInfo");
            add_user(&mut state, "A");
            state.set_focus(Focus::Records);
            state.engine.select_data_type("addressInfo").unwrap();
            state.normalize();
            assert!(state.records_visible());
            assert_eq!(state.focus, Focus::Records);
            assert_eq!(state.focus_order().last(), Some(&Focus::Records));
        }

        #[test]
        fn test_placeholder_hides_records() {
            let mut state = state_on("userInfo");
            add_user(&mut state, "A");
            state.engine.select_form_type(None).unwrap();
            assert!(!state.records_visible());
        }

        #[test]
        fn test_selected_record_id_follows_filter() {
            let mut state = state_on("userInfo");
            add_user(&mut state, "A");
            let id = state.engine.records().at(0).unwrap().id;
            assert_eq!(state.selected_record_id(), Some(id));
            state.engine.select_data_type("addressInfo").unwrap();
            assert_eq!(state.selected_record_id(), None);
        }
    }

    #[test]
    fn test_spinner_only_while_busy() {
        let mut state = state();
        assert!(state.spinner_frame().is_none());
        state.busy_since = Some(Instant::now());
        assert!(state.spinner_frame().is_some());
    }
}
