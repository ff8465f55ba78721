//! Form domain layer
//!
//! Schema-driven form state for the active form type:
//! - `field`: raw field values
//! - `form_state`: the form engine and its submit/edit/delete lifecycle
//! - `notice`: modal notifications raised by the engine
//! - `error`: rejected transitions

mod error;
mod field;
mod form_state;
mod notice;

pub use error::EngineError;
pub use field::FieldValues;
pub use form_state::{FormEngine, ProgressColor, SubmitOutcome, SubmitState, SubmitTicket};
pub use notice::{Notice, PendingDelete, SuccessKind};
