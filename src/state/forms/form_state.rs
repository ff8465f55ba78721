//! Form engine: schema-driven field state, validation, submit lifecycle and
//! record CRUD, held in one state record with a transition per user action.

use super::error::EngineError;
use super::field::FieldValues;
use super::notice::{Notice, PendingDelete, SuccessKind};
use crate::state::{
    FieldDefinition, FieldKind, FormSchema, RecordId, RecordStore, SubmittedRecord,
};
use std::collections::{HashMap, VecDeque};
use std::path::Path;

/// Field name -> human-readable message, replaced wholesale on each validation
pub type ErrorMap = HashMap<String, String>;

/// Handle for one in-flight submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmitTicket(u64);

impl SubmitTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Submit lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    /// Validated and waiting for the simulated latency to elapse
    Submitting(SubmitTicket),
}

/// Result of pressing submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Required fields missing; errors and a notice were recorded
    Invalid,
    /// Validation passed; complete the ticket once the delay has elapsed
    Scheduled(SubmitTicket),
}

/// What a completed submission did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitCompletion {
    Created(RecordId),
    Updated(RecordId),
}

/// Progress bar color, driven only by required-field completeness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressColor {
    Complete,
    Incomplete,
}

/// The whole form state machine
#[derive(Debug)]
pub struct FormEngine {
    schema: FormSchema,
    /// `None` is the placeholder type
    active_type: Option<String>,
    /// Type whose records the table shows
    data_type: Option<String>,
    values: FieldValues,
    errors: ErrorMap,
    records: RecordStore,
    edit_target: Option<RecordId>,
    submit: SubmitState,
    notices: VecDeque<Notice>,
    next_ticket: u64,
}

impl FormEngine {
    /// Start on the placeholder type. The table defaults to `default_data_type`
    /// when it names a schema entry, otherwise to the first schema entry.
    pub fn new(schema: FormSchema, default_data_type: Option<&str>) -> Self {
        let data_type = default_data_type
            .filter(|k| schema.contains(k))
            .or(schema.first_key())
            .map(str::to_string);

        Self {
            schema,
            active_type: None,
            data_type,
            values: FieldValues::default(),
            errors: ErrorMap::new(),
            records: RecordStore::default(),
            edit_target: None,
            submit: SubmitState::Idle,
            notices: VecDeque::new(),
            next_ticket: 1,
        }
    }

    // Read access

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn active_type(&self) -> Option<&str> {
        self.active_type.as_deref()
    }

    pub fn data_type(&self) -> Option<&str> {
        self.data_type.as_deref()
    }

    /// Fields of the active form type; empty for the placeholder
    pub fn fields(&self) -> &[FieldDefinition] {
        self.schema.fields(self.active_type.as_deref())
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn edit_target(&self) -> Option<RecordId> {
        self.edit_target
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.submit, SubmitState::Submitting(_))
    }

    /// Notice currently on screen
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn notice_count(&self) -> usize {
        self.notices.len()
    }

    // Form-type selection

    /// Switch the active form type. Clears values, errors and edit mode, and
    /// points the records table at the same type.
    pub fn select_form_type(&mut self, key: Option<&str>) -> Result<(), EngineError> {
        self.ensure_idle()?;
        if let Some(k) = key {
            if !self.schema.contains(k) {
                return Err(EngineError::UnknownFormType(k.to_string()));
            }
        }

        tracing::debug!(form_type = ?key, "Selecting form type");
        self.active_type = key.map(str::to_string);
        self.data_type = key.map(str::to_string);
        self.values.clear();
        self.errors.clear();
        self.edit_target = None;
        Ok(())
    }

    /// Point the records table at another type without touching the form
    pub fn select_data_type(&mut self, key: &str) -> Result<(), EngineError> {
        if !self.schema.contains(key) {
            return Err(EngineError::UnknownFormType(key.to_string()));
        }
        self.data_type = Some(key.to_string());
        Ok(())
    }

    pub fn cycle_data_type(&mut self, forward: bool) {
        self.data_type = self
            .schema
            .cycle_data_type(self.data_type.as_deref(), forward);
    }

    // Field updates

    /// Store a raw value. File fields go through [`Self::attach_file`].
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        let kind = self.editable_field(name)?.kind.clone();
        if kind.is_file() {
            self.attach_file(name, value)?;
            return Ok(());
        }
        self.values.set(name, value);
        Ok(())
    }

    /// Append a typed character to a text-like field
    pub fn input_char(&mut self, name: &str, c: char) -> Result<(), EngineError> {
        let field = self.editable_field(name)?;
        if !field.kind.is_typed() {
            return Err(EngineError::WrongFieldKind(name.to_string(), "typed"));
        }
        self.values.push_char(name, c);
        Ok(())
    }

    pub fn backspace(&mut self, name: &str) -> Result<(), EngineError> {
        let field = self.editable_field(name)?;
        if !field.kind.is_typed() {
            return Err(EngineError::WrongFieldKind(name.to_string(), "typed"));
        }
        self.values.pop_char(name);
        Ok(())
    }

    /// Step a dropdown to its next or previous option. An unset dropdown
    /// starts at the first (forward) or last (backward) option.
    pub fn cycle_option(&mut self, name: &str, forward: bool) -> Result<(), EngineError> {
        let options = self.editable_field(name)?.options().to_vec();
        if options.is_empty() {
            return Err(EngineError::WrongFieldKind(name.to_string(), "dropdown"));
        }

        let len = options.len();
        let current = self
            .values
            .get(name)
            .and_then(|v| options.iter().position(|o| o == v));
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(0), false) => len - 1,
            (Some(i), false) => i - 1,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        self.values.set(name, options[next].as_str());
        Ok(())
    }

    /// Record a chosen file by name only. The file is never opened.
    /// Returns the stored file name.
    pub fn attach_file(&mut self, name: &str, path: &str) -> Result<String, EngineError> {
        let field = self.editable_field(name)?;
        if !field.kind.is_file() {
            return Err(EngineError::WrongFieldKind(name.to_string(), "file"));
        }

        let file_name = Path::new(path.trim())
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty())
            .ok_or(EngineError::EmptyFileSelection)?;

        tracing::info!(field = name, file = %file_name, "File accepted");
        self.values.set(name, file_name.as_str());
        self.notices.push_back(Notice::FileAccepted {
            file_name: file_name.clone(),
        });
        Ok(file_name)
    }

    // Progress and validation

    /// Percentage of active fields with a non-empty value, rounded down.
    /// `None` when there are no fields to fill.
    pub fn progress(&self) -> Option<u16> {
        let fields = self.fields();
        if fields.is_empty() {
            return None;
        }
        let filled = fields
            .iter()
            .filter(|f| self.values.is_filled(&f.name))
            .count();
        Some((filled * 100 / fields.len()) as u16)
    }

    pub fn progress_color(&self) -> ProgressColor {
        let required_filled = self
            .fields()
            .iter()
            .all(|f| !f.required || self.values.is_filled(&f.name));
        if required_filled {
            ProgressColor::Complete
        } else {
            ProgressColor::Incomplete
        }
    }

    /// Recompute the error map. File fields are never enforced, even when
    /// marked required.
    pub fn validate(&mut self) -> bool {
        self.errors = self
            .fields()
            .iter()
            .filter(|f| f.required && f.kind != FieldKind::File)
            .filter(|f| !self.values.is_filled(&f.name))
            .map(|f| (f.name.clone(), format!("{} is required.", f.label)))
            .collect();
        self.errors.is_empty()
    }

    // Submit lifecycle

    /// Validate and, if valid, enter the busy state. The caller schedules
    /// [`Self::complete_submit`] after the latency; it cannot be aborted.
    pub fn begin_submit(&mut self) -> Result<SubmitOutcome, EngineError> {
        self.ensure_idle()?;
        if self.active_type.is_none() {
            return Err(EngineError::NoActiveForm);
        }

        if !self.validate() {
            tracing::info!(errors = self.errors.len(), "Submit rejected by validation");
            self.notices.push_back(Notice::ValidationFailed);
            return Ok(SubmitOutcome::Invalid);
        }

        let ticket = SubmitTicket(self.next_ticket);
        self.next_ticket += 1;
        self.submit = SubmitState::Submitting(ticket);
        tracing::info!(ticket = ticket.value(), "Submit accepted");
        Ok(SubmitOutcome::Scheduled(ticket))
    }

    /// Finish a submission: replace the edit target in place or append a new
    /// record, then reset the form.
    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
    ) -> Result<SubmitCompletion, EngineError> {
        if self.submit != SubmitState::Submitting(ticket) {
            return Err(EngineError::UnknownTicket(ticket.value()));
        }
        let form_type = self.active_type.clone().ok_or(EngineError::NoActiveForm)?;
        let data = std::mem::take(&mut self.values);

        let completion = match self.edit_target.take() {
            Some(id) if self.records.get(id).is_some() => {
                self.records.replace(id, form_type, data);
                SubmitCompletion::Updated(id)
            }
            _ => {
                let id = self.records.push(SubmittedRecord::new(form_type, data));
                SubmitCompletion::Created(id)
            }
        };

        let kind = match completion {
            SubmitCompletion::Created(_) => SuccessKind::Created,
            SubmitCompletion::Updated(_) => SuccessKind::Updated,
        };
        tracing::info!(ticket = ticket.value(), ?completion, "Submit completed");
        self.notices.push_back(Notice::Success(kind));
        self.submit = SubmitState::Idle;
        Ok(completion)
    }

    // Edit and delete

    /// Load a record into the form and target it for replacement.
    /// The active form type is not changed.
    pub fn edit(&mut self, id: RecordId) -> Result<(), EngineError> {
        self.ensure_idle()?;
        let record = self.records.get(id).ok_or(EngineError::RecordNotFound(id))?;
        let active = self.active_type.as_deref().ok_or(EngineError::NoActiveForm)?;
        if record.form_type != active {
            return Err(EngineError::FormTypeMismatch {
                record: record.form_type.clone(),
                active: active.to_string(),
            });
        }

        tracing::debug!(record = %id, "Editing record");
        self.values = record.data.clone();
        self.errors.clear();
        self.edit_target = Some(id);
        Ok(())
    }

    /// Ask for confirmation before deleting
    pub fn request_delete(&mut self, id: RecordId) -> Result<(), EngineError> {
        self.ensure_idle()?;
        if self
            .notices
            .iter()
            .any(|n| matches!(n, Notice::ConfirmDelete(_)))
        {
            return Err(EngineError::DeletePending);
        }
        let record = self.records.get(id).ok_or(EngineError::RecordNotFound(id))?;
        let entity_display = self.summarize(record);

        self.notices.push_back(Notice::ConfirmDelete(PendingDelete {
            record_id: id,
            entity_display,
            selected_option: false,
        }));
        Ok(())
    }

    /// Move the highlight in the delete dialog
    pub fn toggle_delete_choice(&mut self) {
        if let Some(Notice::ConfirmDelete(pending)) = self.notices.front_mut() {
            pending.selected_option = !pending.selected_option;
        }
    }

    /// Remove the record awaiting confirmation. Deleting the record under edit
    /// leaves edit mode; the loaded values stay in the form.
    pub fn confirm_delete(&mut self) -> Result<RecordId, EngineError> {
        let id = match self.notices.front() {
            Some(Notice::ConfirmDelete(pending)) => pending.record_id,
            _ => return Err(EngineError::NoPendingDelete),
        };
        self.notices.pop_front();

        self.records
            .remove(id)
            .ok_or(EngineError::RecordNotFound(id))?;
        if self.edit_target == Some(id) {
            self.edit_target = None;
        }

        tracing::info!(record = %id, "Record deleted");
        self.notices.push_back(Notice::Success(SuccessKind::Deleted));
        Ok(id)
    }

    pub fn cancel_delete(&mut self) -> Result<(), EngineError> {
        if !matches!(self.notices.front(), Some(Notice::ConfirmDelete(_))) {
            return Err(EngineError::NoPendingDelete);
        }
        self.notices.pop_front();
        Ok(())
    }

    /// Apply the highlighted choice of the delete dialog
    pub fn resolve_delete(&mut self) -> Result<Option<RecordId>, EngineError> {
        let confirmed = match self.notices.front() {
            Some(Notice::ConfirmDelete(pending)) => pending.selected_option,
            _ => return Err(EngineError::NoPendingDelete),
        };
        if confirmed {
            self.confirm_delete().map(Some)
        } else {
            self.cancel_delete().map(|_| None)
        }
    }

    /// Close the front notice. A pending delete is treated as cancelled.
    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    // Record listing

    /// Records of the selected data type, in insertion order
    pub fn visible_records(&self) -> Vec<&SubmittedRecord> {
        match self.data_type.as_deref() {
            Some(key) => self.records.filtered(key).collect(),
            None => Vec::new(),
        }
    }

    /// Columns for the records table: the displayed type's fields
    pub fn table_fields(&self) -> &[FieldDefinition] {
        self.schema.fields(self.data_type.as_deref())
    }

    // Helpers

    fn ensure_idle(&self) -> Result<(), EngineError> {
        if self.is_busy() {
            Err(EngineError::Busy)
        } else {
            Ok(())
        }
    }

    /// Field of the active type that may be edited right now
    fn editable_field(&self, name: &str) -> Result<&FieldDefinition, EngineError> {
        self.ensure_idle()?;
        let active = self.active_type.as_deref().ok_or(EngineError::NoActiveForm)?;
        self.fields()
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| EngineError::UnknownField {
                form_type: active.to_string(),
                field: name.to_string(),
            })
    }

    /// First filled field of a record, for the delete dialog
    fn summarize(&self, record: &SubmittedRecord) -> String {
        self.schema
            .fields(Some(&record.form_type))
            .iter()
            .find_map(|f| {
                record
                    .data
                    .get(&f.name)
                    .filter(|v| !v.is_empty() && !matches!(f.kind, FieldKind::Password))
                    .map(|v| format!("{}: {}", f.label, v))
            })
            .unwrap_or_else(|| "this entry".to_string())
    }
}
