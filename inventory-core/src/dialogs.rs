//! User-facing prompts
//!
//! Front ends implement [`Dialogs`] to show confirmations and notices in
//! whatever way suits them (modal windows, terminal prompts, test doubles).

use std::fmt;

/// The kind of catalog entity an action applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Part,
    Product,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Part => write!(f, "part"),
            EntityKind::Product => write!(f, "product"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Information,
    Warning,
}

/// A message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub header: String,
    pub message: String,
}

impl Notice {
    /// An action needed a selected part or product and none was selected
    pub fn selection_error(kind: EntityKind) -> Self {
        Self {
            level: NoticeLevel::Error,
            header: "Selection Error".to_string(),
            message: format!("Please select a {}.", kind),
        }
    }

    /// A search found nothing
    pub fn search_not_found(kind: EntityKind) -> Self {
        Self {
            level: NoticeLevel::Information,
            header: "Search Not Found".to_string(),
            message: format!("No such {} exists.", kind),
        }
    }

    /// A product with associated parts was about to be deleted
    pub fn associated_part_delete_error() -> Self {
        Self {
            level: NoticeLevel::Warning,
            header: "Associated Part".to_string(),
            message: "A product cannot be deleted if it contains associated parts.".to_string(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.header, self.message)
    }
}

/// Question asked before anything is deleted
pub fn delete_question(kind: EntityKind) -> String {
    format!("Do you want to delete this {}?", kind)
}

/// Confirmation and notification collaborator
pub trait Dialogs {
    /// Asks a yes/no question; true means the user agreed
    fn confirm(&mut self, question: &str) -> bool;

    /// Shows a notice to the user
    fn notify(&mut self, notice: Notice);
}

/// Dialogs double that answers every question the same way and records
/// everything it was asked and shown
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingDialogs {
    pub answer: bool,
    pub questions: Vec<String>,
    pub notices: Vec<Notice>,
}

#[cfg(test)]
impl RecordingDialogs {
    /// Agrees to every confirmation
    pub fn agreeing() -> Self {
        Self {
            answer: true,
            ..Self::default()
        }
    }

    /// Declines every confirmation
    pub fn declining() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl Dialogs for RecordingDialogs {
    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.answer
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_text() {
        assert_eq!(
            Notice::selection_error(EntityKind::Part).message,
            "Please select a part."
        );
        assert_eq!(
            Notice::search_not_found(EntityKind::Product).message,
            "No such product exists."
        );
        assert_eq!(
            Notice::associated_part_delete_error().to_string(),
            "Associated Part: A product cannot be deleted if it contains associated parts."
        );
        assert_eq!(
            delete_question(EntityKind::Product),
            "Do you want to delete this product?"
        );
    }

    #[test]
    fn test_recording_dialogs() {
        let mut dialogs = RecordingDialogs::declining();
        assert!(!dialogs.confirm("Do you want to delete this part?"));
        dialogs.notify(Notice::selection_error(EntityKind::Product));

        assert_eq!(dialogs.questions, vec!["Do you want to delete this part?"]);
        assert_eq!(
            dialogs.notices,
            vec![Notice::selection_error(EntityKind::Product)]
        );
        assert!(RecordingDialogs::agreeing().confirm("again?"));
    }
}
