//! Rejected form-engine transitions

use crate::state::RecordId;

/// Why the engine refused an action.
///
/// None of these are fatal: the app logs them and shows a status message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Unknown form type: {0}")]
    UnknownFormType(String),

    #[error("No form type selected")]
    NoActiveForm,

    #[error("Unknown field {field} in form type {form_type}")]
    UnknownField { form_type: String, field: String },

    #[error("Field {0} is not a {1} field")]
    WrongFieldKind(String, &'static str),

    #[error("No file selected")]
    EmptyFileSelection,

    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("Record belongs to {record} but the active form is {active}")]
    FormTypeMismatch { record: String, active: String },

    #[error("A submission is in progress")]
    Busy,

    #[error("Submission ticket {0} is not pending")]
    UnknownTicket(u64),

    #[error("A deletion is already awaiting confirmation")]
    DeletePending,

    #[error("No deletion awaiting confirmation")]
    NoPendingDelete,
}
