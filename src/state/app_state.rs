//! Application state definitions

use super::editor::EditorBuffer;
use super::preview::{PreviewState, RetentionPolicy};
use crate::schema::validate;
use std::collections::VecDeque;

/// Which pane receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Editor,
    Preview,
}

impl Focus {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Editor => Self::Preview,
            Self::Preview => Self::Editor,
        };
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Editor => "Editor",
            Self::Preview => "Preview",
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub focus: Focus,
    pub editor: EditorBuffer,
    pub preview: PreviewState,

    /// Receipt text shown after a successful submission
    pub receipt: Option<String>,

    /// Queue of error messages shown one at a time
    errors: VecDeque<String>,
}

impl AppState {
    /// State with the editor loaded and validated once
    pub fn new(initial_text: &str, policy: RetentionPolicy) -> Self {
        let mut state = Self {
            editor: EditorBuffer::from_text(initial_text),
            preview: PreviewState::new(policy),
            ..Default::default()
        };
        state.revalidate();
        state
    }

    /// Feed the current editor snapshot through the validator
    pub fn revalidate(&mut self) {
        let outcome = validate(&self.editor.text());
        self.preview.apply(self.editor.revision(), outcome);
    }

    /// Apply an editor mutation and revalidate if the text changed
    pub fn edit(&mut self, f: impl FnOnce(&mut EditorBuffer)) {
        let before = self.editor.revision();
        f(&mut self.editor);
        if self.editor.revision() != before {
            self.revalidate();
        }
    }

    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SAMPLE_SCHEMA;
    use crate::state::Phase;

    #[test]
    fn test_new_validates_initial_text() {
        let state = AppState::new(SAMPLE_SCHEMA, RetentionPolicy::Retain);
        assert_eq!(state.preview.phase(), Phase::DraftValidSchema);
        assert_eq!(state.focus, Focus::Editor);
    }

    #[test]
    fn test_new_with_empty_text_is_invalid() {
        let state = AppState::new("", RetentionPolicy::Retain);
        assert_eq!(state.preview.phase(), Phase::DraftInvalidSchema);
    }

    #[test]
    fn test_edit_revalidates_on_change() {
        let mut state = AppState::new(SAMPLE_SCHEMA, RetentionPolicy::Retain);
        state.edit(|e| e.insert_char('x'));
        assert_eq!(state.preview.phase(), Phase::DraftInvalidSchema);
        state.edit(|e| e.backspace());
        assert_eq!(state.preview.phase(), Phase::DraftValidSchema);
    }

    #[test]
    fn test_cursor_move_does_not_revalidate() {
        let mut state = AppState::new(SAMPLE_SCHEMA, RetentionPolicy::Retain);
        let revision = state.preview.last_revision();
        state.edit(|e| e.move_down());
        assert_eq!(state.preview.last_revision(), revision);
    }

    #[test]
    fn test_focus_toggle() {
        let mut focus = Focus::default();
        focus.toggle();
        assert_eq!(focus, Focus::Preview);
        assert_eq!(focus.label(), "Preview");
        focus.toggle();
        assert_eq!(focus, Focus::Editor);
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        assert!(!state.has_errors());
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }
}
