//! Inline label editing.
//!
//! A session moves `Idle -> Editing -> {Committed, Cancelled} -> Idle`. At
//! most one session is open; beginning another commits the open one first.

use std::fmt;

use log::debug;

use sketchflow_core::identifier::Id;

/// The entity whose label is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelTarget {
    Node(Id),
    Edge(Id),
}

impl LabelTarget {
    pub fn id(self) -> Id {
        match self {
            Self::Node(id) | Self::Edge(id) => id,
        }
    }
}

impl fmt::Display for LabelTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => write!(f, "node `{id}`"),
            Self::Edge(id) => write!(f, "edge `{id}`"),
        }
    }
}

/// A request to store `text` as the label of `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCommit {
    target: LabelTarget,
    text: String,
}

impl LabelCommit {
    pub fn new(target: LabelTarget, text: impl Into<String>) -> Self {
        Self {
            target,
            text: text.into(),
        }
    }

    pub fn target(&self) -> LabelTarget {
        self.target
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelEditOutcome {
    /// The trimmed buffer is ready to be applied.
    Committed(LabelCommit),
    /// The buffer was empty after trimming; the old label stays.
    Discarded(LabelTarget),
    /// Escape was pressed; the old label stays.
    Cancelled(LabelTarget),
    /// No session was open.
    Idle,
}

/// An open editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSession {
    target: LabelTarget,
    original: String,
    buffer: String,
}

impl LabelSession {
    pub fn target(&self) -> LabelTarget {
        self.target
    }

    /// The label at the moment editing started
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The in-progress text
    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

/// Holds at most one [`LabelSession`].
#[derive(Debug, Clone, Default)]
pub struct LabelEditor {
    session: Option<LabelSession>,
}

impl LabelEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&LabelSession> {
        self.session.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Opens a session on `target`, seeding the buffer with `current_label`.
    ///
    /// An already open session is committed first and its outcome returned;
    /// otherwise the result is [`LabelEditOutcome::Idle`].
    pub fn begin(&mut self, target: LabelTarget, current_label: &str) -> LabelEditOutcome {
        // Re-opening the same target keeps the in-progress buffer
        if self.session.as_ref().is_some_and(|s| s.target == target) {
            return LabelEditOutcome::Idle;
        }
        let previous = self.commit();

        debug!(label_target:% = target; "Label editing started");
        self.session = Some(LabelSession {
            target,
            original: current_label.to_string(),
            buffer: current_label.to_string(),
        });
        previous
    }

    /// Replaces the buffer. Ignored when no session is open.
    pub fn set_text(&mut self, text: &str) {
        if let Some(session) = &mut self.session {
            session.buffer = text.to_string();
        }
    }

    /// Appends to the buffer. Ignored when no session is open.
    pub fn push_str(&mut self, text: &str) {
        if let Some(session) = &mut self.session {
            session.buffer.push_str(text);
        }
    }

    /// Removes the last character of the buffer.
    pub fn pop_char(&mut self) {
        if let Some(session) = &mut self.session {
            session.buffer.pop();
        }
    }

    /// Closes the session, producing a commit when the trimmed buffer is
    /// not empty. Used for Enter and for loss of focus.
    pub fn commit(&mut self) -> LabelEditOutcome {
        let Some(session) = self.session.take() else {
            return LabelEditOutcome::Idle;
        };
        let text = session.buffer.trim();
        if text.is_empty() {
            debug!(label_target:% = session.target; "Label edit discarded");
            LabelEditOutcome::Discarded(session.target)
        } else {
            debug!(label_target:% = session.target; "Label edit committed");
            LabelEditOutcome::Committed(LabelCommit::new(session.target, text))
        }
    }

    /// Closes the session without producing a commit. Used for Escape.
    pub fn cancel(&mut self) -> LabelEditOutcome {
        match self.session.take() {
            Some(session) => {
                debug!(label_target:% = session.target; "Label edit cancelled");
                LabelEditOutcome::Cancelled(session.target)
            }
            None => LabelEditOutcome::Idle,
        }
    }

    /// Cancels the session if it edits one of `removed`.
    pub(crate) fn forget(&mut self, removed: impl Fn(LabelTarget) -> bool) {
        if self.session.as_ref().is_some_and(|s| removed(s.target)) {
            self.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> LabelTarget {
        LabelTarget::Node(Id::new(id))
    }

    #[test]
    fn test_enter_commits_trimmed_text() {
        let mut editor = LabelEditor::new();
        editor.begin(node("1"), "Start");
        editor.set_text("  Begin  ");
        assert_eq!(
            editor.commit(),
            LabelEditOutcome::Committed(LabelCommit::new(node("1"), "Begin"))
        );
        assert!(!editor.is_editing());
    }

    #[test]
    fn test_escape_cancels() {
        let mut editor = LabelEditor::new();
        editor.begin(node("1"), "Start");
        editor.set_text("Begin");
        assert_eq!(editor.cancel(), LabelEditOutcome::Cancelled(node("1")));
        assert_eq!(editor.commit(), LabelEditOutcome::Idle);
    }

    #[test]
    fn test_empty_buffer_is_discarded() {
        let mut editor = LabelEditor::new();
        editor.begin(node("1"), "Start");
        editor.set_text("   ");
        assert_eq!(editor.commit(), LabelEditOutcome::Discarded(node("1")));
    }

    #[test]
    fn test_second_session_commits_first() {
        let mut editor = LabelEditor::new();
        editor.begin(node("1"), "Start");
        editor.push_str("ed");

        let forced = editor.begin(LabelTarget::Edge(Id::new("e")), "");
        assert_eq!(
            forced,
            LabelEditOutcome::Committed(LabelCommit::new(node("1"), "Started"))
        );
        assert_eq!(
            editor.session().map(LabelSession::target),
            Some(LabelTarget::Edge(Id::new("e")))
        );
    }

    #[test]
    fn test_reopening_same_target_keeps_buffer() {
        let mut editor = LabelEditor::new();
        editor.begin(node("1"), "Start");
        editor.pop_char();
        assert_eq!(editor.begin(node("1"), "Start"), LabelEditOutcome::Idle);
        assert_eq!(editor.session().unwrap().buffer(), "Star");
        assert_eq!(editor.session().unwrap().original(), "Start");
    }

    #[test]
    fn test_edits_without_session_are_ignored() {
        let mut editor = LabelEditor::new();
        editor.set_text("x");
        editor.push_str("y");
        assert_eq!(editor.cancel(), LabelEditOutcome::Idle);
    }
}
