//! Edit state machine for the mission and tactics text fields.

/// Lifecycle of one editable text field.
///
/// The draft is purely local until an update call succeeds; cancelling
/// throws it away without touching the store. Mission and tactics each own
/// one of these, and the app keeps at most one of them past `Viewing`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldEditor {
    #[default]
    Viewing,
    Editing {
        draft: String,
    },
    Submitting {
        draft: String,
    },
}

impl FieldEditor {
    /// Open the editor seeded with the canonical value. Ignored unless the
    /// field is currently viewing.
    pub fn begin(&mut self, canonical: &str) {
        if matches!(self, FieldEditor::Viewing) {
            *self = FieldEditor::Editing {
                draft: canonical.to_string(),
            };
        }
    }

    /// Drop the draft and return to viewing. Ignored mid-submit.
    pub fn cancel(&mut self) {
        if matches!(self, FieldEditor::Editing { .. }) {
            *self = FieldEditor::Viewing;
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let FieldEditor::Editing { draft } = self {
            draft.push(c);
        }
    }

    pub fn push_newline(&mut self) {
        self.push_char('\n');
    }

    pub fn backspace(&mut self) {
        if let FieldEditor::Editing { draft } = self {
            draft.pop();
        }
    }

    /// Move to `Submitting` and hand back the draft to send. `None` when the
    /// field is not in `Editing`.
    pub fn take_submission(&mut self) -> Option<String> {
        if let FieldEditor::Editing { draft } = self {
            let draft = std::mem::take(draft);
            *self = FieldEditor::Submitting {
                draft: draft.clone(),
            };
            Some(draft)
        } else {
            None
        }
    }

    /// Resolve an in-flight submission: success lands back in `Viewing` (the
    /// caller refetches the canonical value), failure reopens the editor
    /// with the draft intact.
    pub fn finish_submission(&mut self, ok: bool) {
        if let FieldEditor::Submitting { draft } = self {
            *self = if ok {
                FieldEditor::Viewing
            } else {
                FieldEditor::Editing {
                    draft: std::mem::take(draft),
                }
            };
        }
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self, FieldEditor::Viewing)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, FieldEditor::Editing { .. })
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FieldEditor::Submitting { .. })
    }

    /// Draft text while editing or submitting.
    pub fn draft(&self) -> Option<&str> {
        match self {
            FieldEditor::Viewing => None,
            FieldEditor::Editing { draft } | FieldEditor::Submitting { draft } => Some(draft),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_seeds_draft_from_canonical() {
        let mut editor = FieldEditor::default();
        editor.begin("M1");
        assert_eq!(editor.draft(), Some("M1"));
        assert!(editor.is_editing());
    }

    #[test]
    fn begin_is_ignored_while_editing() {
        let mut editor = FieldEditor::default();
        editor.begin("M1");
        editor.push_char('!');
        editor.begin("other");
        assert_eq!(editor.draft(), Some("M1!"));
    }

    #[test]
    fn cancel_discards_the_draft() {
        let mut editor = FieldEditor::default();
        editor.begin("M1");
        editor.backspace();
        editor.push_char('2');
        assert_eq!(editor.draft(), Some("M2"));
        editor.cancel();
        assert!(editor.is_viewing());
        assert_eq!(editor.draft(), None);
    }

    #[test]
    fn submission_round_trip_on_success() {
        let mut editor = FieldEditor::default();
        editor.begin("M1");
        editor.backspace();
        editor.push_char('2');
        let sent = editor.take_submission();
        assert_eq!(sent.as_deref(), Some("M2"));
        assert!(editor.is_submitting());
        editor.finish_submission(true);
        assert!(editor.is_viewing());
    }

    #[test]
    fn failed_submission_reopens_with_draft() {
        let mut editor = FieldEditor::default();
        editor.begin("M1");
        editor.push_char('x');
        editor.take_submission();
        editor.finish_submission(false);
        assert!(editor.is_editing());
        assert_eq!(editor.draft(), Some("M1x"));
    }

    #[test]
    fn take_submission_requires_editing() {
        let mut editor = FieldEditor::default();
        assert_eq!(editor.take_submission(), None);
        assert!(editor.is_viewing());
    }

    #[test]
    fn typing_is_ignored_outside_editing() {
        let mut editor = FieldEditor::default();
        editor.push_char('x');
        editor.backspace();
        assert!(editor.is_viewing());
        editor.begin("a");
        editor.take_submission();
        editor.push_char('x');
        assert_eq!(editor.draft(), Some("a"));
    }
}
