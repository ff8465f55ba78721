//! Modal notifications raised by the form engine

use crate::state::RecordId;

/// What a success notice reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessKind {
    Created,
    Updated,
    Deleted,
}

impl SuccessKind {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Created => "Data submitted successfully.",
            Self::Updated => "Entry updated successfully.",
            Self::Deleted => "Entry deleted successfully.",
        }
    }
}

/// A delete waiting for the user's yes/no
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub record_id: RecordId,
    /// Short description of the record shown in the dialog
    pub entity_display: String,
    /// Which option is highlighted (false = Cancel, true = Delete)
    pub selected_option: bool,
}

/// One modal dialog. The engine keeps these in a FIFO queue; the front one is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A file name was stored for a file field
    FileAccepted { file_name: String },
    Success(SuccessKind),
    /// Submit was refused because required fields are empty
    ValidationFailed,
    ConfirmDelete(PendingDelete),
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::FileAccepted { .. } | Notice::Success(_) => "Success!",
            Notice::ValidationFailed => "Error",
            Notice::ConfirmDelete(_) => "Confirm Deletion",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::FileAccepted { file_name } => format!("{file_name} uploaded successfully"),
            Notice::Success(kind) => kind.message().to_string(),
            Notice::ValidationFailed => "Please fill in all required fields.".to_string(),
            Notice::ConfirmDelete(_) => "Are you sure you want to delete this entry?".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_notice_names_the_file() {
        let notice = Notice::FileAccepted {
            file_name: "aadhar.pdf".to_string(),
        };
        assert_eq!(notice.title(), "Success!");
        assert_eq!(notice.message(), "aadhar.pdf uploaded successfully");
    }

    #[test]
    fn test_validation_notice_is_generic() {
        assert_eq!(Notice::ValidationFailed.title(), "Error");
        assert_eq!(
            Notice::ValidationFailed.message(),
            "Please fill in all required fields."
        );
    }

    #[test]
    fn test_success_messages_differ_by_kind() {
        assert_ne!(SuccessKind::Created.message(), SuccessKind::Deleted.message());
        assert_eq!(Notice::Success(SuccessKind::Updated).title(), "Success!");
    }
}
