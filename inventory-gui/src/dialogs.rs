use inventory_core::{Dialogs, Notice};

/// Dialogs for an immediate-mode UI
///
/// A confirmation cannot block the frame, so the first time an action asks
/// a question the question is recorded and the action backs out. Once the
/// user answers in the modal window the action is run again with the answer
/// preloaded.
#[derive(Debug, Default)]
pub struct GuiDialogs {
    answer: Option<bool>,
    asked: Option<String>,
    notices: Vec<Notice>,
}

impl GuiDialogs {
    /// Preloads the answer to the next confirmation
    pub fn answer_next(&mut self, answer: bool) {
        self.answer = Some(answer);
    }

    /// Takes the question the last action wanted answered, if any
    pub fn take_question(&mut self) -> Option<String> {
        self.asked.take()
    }

    /// Notice the user has not acknowledged yet
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.first()
    }

    pub fn dismiss_notice(&mut self) {
        if !self.notices.is_empty() {
            self.notices.remove(0);
        }
    }

    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }
}

impl Dialogs for GuiDialogs {
    fn confirm(&mut self, question: &str) -> bool {
        match self.answer.take() {
            Some(answer) => answer,
            None => {
                self.asked = Some(question.to_string());
                false
            }
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::{actions, sample_inventory, EntityKind};

    #[test]
    fn test_first_confirmation_is_deferred() {
        let mut inventory = sample_inventory();
        let mut dialogs = GuiDialogs::default();

        assert!(!actions::delete_part(&mut inventory, Some(4), &mut dialogs));
        assert_eq!(
            dialogs.take_question().as_deref(),
            Some("Do you want to delete this part?")
        );
        assert!(inventory.lookup_part(4).is_some());

        dialogs.answer_next(true);
        assert!(actions::delete_part(&mut inventory, Some(4), &mut dialogs));
        assert!(dialogs.take_question().is_none());
        assert!(inventory.lookup_part(4).is_none());
    }

    #[test]
    fn test_answer_is_used_once() {
        let mut dialogs = GuiDialogs::default();
        dialogs.answer_next(true);
        assert!(dialogs.confirm("first?"));
        assert!(!dialogs.confirm("second?"));
        assert_eq!(dialogs.take_question().as_deref(), Some("second?"));
    }

    #[test]
    fn test_notices_queue_in_order() {
        let mut dialogs = GuiDialogs::default();
        dialogs.notify(Notice::selection_error(EntityKind::Part));
        dialogs.notify(Notice::search_not_found(EntityKind::Product));

        assert_eq!(
            dialogs.current_notice(),
            Some(&Notice::selection_error(EntityKind::Part))
        );
        dialogs.dismiss_notice();
        assert_eq!(
            dialogs.current_notice(),
            Some(&Notice::search_not_found(EntityKind::Product))
        );
        dialogs.dismiss_notice();
        assert!(!dialogs.has_notices());
    }
}
