//! Application state and core logic

use crate::config::TuiConfig;
use crate::platform::SHORTCUT_MODIFIER;
use crate::sink::{SubmissionRecord, SubmissionSink};
use crate::state::{AppState, EditorBuffer, Focus, Form, FormError};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Receiver of valid submissions
    sink: Box<dyn SubmissionSink>,
    /// Whether the app should quit
    quit: bool,
    /// Status bar feedback, cleared on the next key press
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &TuiConfig, initial_text: &str, sink: Box<dyn SubmissionSink>) -> Self {
        let state = AppState::new(initial_text, config.retention_policy());
        tracing::info!(
            sink = %sink.describe(),
            policy = ?config.retention_policy(),
            "App started"
        );
        Self {
            state,
            sink,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Name of the submission sink for the status bar
    pub fn sink_name(&self) -> String {
        self.sink.describe()
    }

    fn is_shortcut(key: &KeyEvent, c: char) -> bool {
        key.code == KeyCode::Char(c)
            && (key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(SHORTCUT_MODIFIER))
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Ctrl+C quits from anywhere, dialogs included
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.request_quit();
            return Ok(());
        }

        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Receipt dialog (modal)
        if self.state.receipt.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.receipt = None;
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        if key.code == KeyCode::F(2) || Self::is_shortcut(&key, 'o') {
            self.state.focus.toggle();
            return Ok(());
        }

        // Submit works from either pane
        if Self::is_shortcut(&key, 's') {
            self.submit().await;
            return Ok(());
        }

        match self.state.focus {
            Focus::Editor => self.handle_editor_key(key),
            Focus::Preview => self.handle_preview_key(key).await?,
        }

        Ok(())
    }

    /// Handle keys in the schema editor
    fn handle_editor_key(&mut self, key: KeyEvent) {
        // Unbound chords (Ctrl, or Cmd on macOS) never insert text
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | SHORTCUT_MODIFIER)
        {
            return;
        }

        match key.code {
            KeyCode::Char(c) => self.state.edit(|e| e.insert_char(c)),
            KeyCode::Enter => self.state.edit(EditorBuffer::insert_newline),
            KeyCode::Tab => self.state.edit(|e| e.insert_str("  ")),
            KeyCode::Backspace => self.state.edit(EditorBuffer::backspace),
            KeyCode::Delete => self.state.edit(EditorBuffer::delete),
            KeyCode::Left => self.state.edit(EditorBuffer::move_left),
            KeyCode::Right => self.state.edit(EditorBuffer::move_right),
            KeyCode::Up => self.state.edit(EditorBuffer::move_up),
            KeyCode::Down => self.state.edit(EditorBuffer::move_down),
            KeyCode::Home => self.state.edit(EditorBuffer::move_home),
            KeyCode::End => self.state.edit(EditorBuffer::move_end),
            _ => {}
        }
    }

    /// Handle keys in the form preview
    async fn handle_preview_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Esc {
            self.state.focus = Focus::Editor;
            return Ok(());
        }

        let retained = self.state.preview.is_retained();
        let Some(form) = self.state.preview.editable_form_mut() else {
            if retained {
                self.status_message =
                    Some("Preview is read-only until the schema is valid again".to_string());
            }
            return Ok(());
        };

        let on_submit_row = form.is_submit_row_active();
        let mut submit = false;
        let mut advance = false;

        match key.code {
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Enter if on_submit_row => submit = true,
            _ => {
                if let Some(field) = form.active_form_field_mut() {
                    match key.code {
                        KeyCode::Left | KeyCode::Char('h') if field.is_choice() => {
                            field.prev_choice()
                        }
                        KeyCode::Right | KeyCode::Char('l' | ' ') if field.is_choice() => {
                            field.next_choice()
                        }
                        KeyCode::Enter if field.is_choice() => field.next_choice(),
                        KeyCode::Enter if field.is_multiline() => field.push_char('\n'),
                        KeyCode::Enter => advance = true,
                        KeyCode::Char(c) => field.push_char(c),
                        KeyCode::Backspace if field.is_choice() => field.clear(),
                        KeyCode::Backspace => field.pop_char(),
                        KeyCode::Delete => field.clear(),
                        _ => {}
                    }
                }
                if advance {
                    form.next_field();
                }
            }
        }

        if submit {
            self.submit().await;
        }
        Ok(())
    }

    /// Submit the live form and hand the result to the sink
    pub async fn submit(&mut self) {
        let title = self
            .state
            .preview
            .form()
            .map(|f| f.title.clone())
            .unwrap_or_default();

        match self.state.preview.submit() {
            Ok(values) => {
                let record = SubmissionRecord::new(&title, values);
                match self.sink.submit(&record).await {
                    Ok(()) => {
                        tracing::info!(id = %record.id, fields = record.values.len(), "Submission accepted");
                        self.state.receipt = Some(receipt_text(&record));
                        self.status_message = Some(format!("Submitted to {}", self.sink.describe()));
                    }
                    Err(e) => self.state.push_error(format!("Submission failed: {e:#}")),
                }
            }
            Err(FormError::Invalid(errors)) => {
                tracing::debug!(count = errors.len(), "Submission blocked by field errors");
                self.state.focus = Focus::Preview;
                self.status_message = Some(format!("{} field(s) need attention", errors.len()));
            }
            Err(FormError::NoValidSchema) => {
                self.status_message = Some("Fix the schema before submitting".to_string());
            }
            Err(e) => self.state.push_error(e.to_string()),
        }
    }
}

/// Dialog text for a delivered submission
fn receipt_text(record: &SubmissionRecord) -> String {
    let values = serde_json::to_string_pretty(&record.values)
        .unwrap_or_else(|_| format!("{} value(s)", record.values.len()));
    format!("Submission {}\n\n{values}", record.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MockSubmissionSink;
    use crate::state::{FieldStatus, Phase};

    const EMAIL_FORM: &str = r#"{"formTitle":"T","formDescription":"D","fields":[{"id":"email1","type":"email","required":true,"label":"Email"}]}"#;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn quiet_sink() -> MockSubmissionSink {
        let mut sink = MockSubmissionSink::new();
        sink.expect_describe().return_const("mock".to_string());
        sink
    }

    fn app_with(text: &str, sink: MockSubmissionSink) -> App {
        App::new(&TuiConfig::default(), text, Box::new(sink))
    }

    async fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn test_valid_submission_reaches_sink() {
            let mut sink = quiet_sink();
            sink.expect_submit()
                .withf(|r| r.form_title == "T" && r.values.get("email1") == Some("a@b.com"))
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(EMAIL_FORM, sink);

            app.handle_key(key(KeyCode::F(2))).await.unwrap();
            type_str(&mut app, "a@b.com").await;
            app.handle_key(ctrl('s')).await.unwrap();

            assert!(app.state.receipt.as_deref().unwrap().contains("\"email1\": \"a@b.com\""));
            assert_eq!(app.status_message.as_deref(), Some("Submitted to mock"));
            assert_eq!(app.state.preview.phase(), Phase::DraftValidSchema);
        }

        #[tokio::test]
        async fn test_invalid_submission_never_reaches_sink() {
            let mut sink = quiet_sink();
            sink.expect_submit().times(0);
            let mut app = app_with(EMAIL_FORM, sink);

            app.handle_key(ctrl('s')).await.unwrap();

            let form = app.state.preview.form().unwrap();
            assert_eq!(form.field("email1").unwrap().error(), Some("Email is required"));
            assert_eq!(app.state.focus, Focus::Preview);
            assert!(app.state.receipt.is_none());
        }

        #[tokio::test]
        async fn test_sink_failure_is_reported_and_form_stays_editable() {
            let mut sink = quiet_sink();
            sink.expect_submit()
                .times(1)
                .returning(|_| Err(anyhow::anyhow!("disk full")));
            let mut app = app_with(EMAIL_FORM, sink);

            app.handle_key(key(KeyCode::F(2))).await.unwrap();
            type_str(&mut app, "a@b.com").await;
            app.handle_key(ctrl('s')).await.unwrap();

            assert_eq!(app.state.current_error(), Some("Submission failed: disk full"));
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(!app.state.has_errors());
            assert!(app.state.preview.editable_form_mut().is_some());
        }

        #[tokio::test]
        async fn test_submit_with_broken_schema_is_refused() {
            let mut sink = quiet_sink();
            sink.expect_submit().times(0);
            let mut app = app_with("{", sink);

            app.handle_key(ctrl('s')).await.unwrap();

            assert_eq!(
                app.status_message.as_deref(),
                Some("Fix the schema before submitting")
            );
        }

        #[tokio::test]
        async fn test_enter_on_submit_row_submits() {
            let mut sink = quiet_sink();
            sink.expect_submit().times(1).returning(|_| Ok(()));
            let text = r#"{"formTitle":"T","fields":[{"id":"a","type":"text","label":"A"}]}"#;
            let mut app = app_with(text, sink);

            app.handle_key(key(KeyCode::F(2))).await.unwrap();
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert!(app.state.receipt.is_some());
            // Receipt is modal until dismissed
            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            assert!(app.state.receipt.is_some());
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(app.state.receipt.is_none());
        }
    }

    mod editor {
        use super::*;

        #[tokio::test]
        async fn test_typing_in_editor_updates_preview() {
            let mut app = app_with(EMAIL_FORM, quiet_sink());
            assert_eq!(app.state.preview.phase(), Phase::DraftValidSchema);

            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            assert_eq!(app.state.preview.phase(), Phase::DraftInvalidSchema);
            assert!(app.state.preview.is_retained());

            app.handle_key(key(KeyCode::Backspace)).await.unwrap();
            assert_eq!(app.state.preview.phase(), Phase::DraftValidSchema);
        }

        #[tokio::test]
        async fn test_enter_and_tab_edit_text() {
            let mut app = app_with("", quiet_sink());
            app.handle_key(key(KeyCode::Char('{'))).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            assert_eq!(app.state.editor.text(), "{\n  ");
        }

        #[tokio::test]
        async fn test_control_chords_do_not_insert() {
            let mut app = app_with("", quiet_sink());
            app.handle_key(ctrl('x')).await.unwrap();
            assert_eq!(app.state.editor.text(), "");
        }

        #[tokio::test]
        async fn test_platform_shortcut_chords_do_not_insert() {
            let mut app = app_with("", quiet_sink());
            for c in ['z', 'x', 'a'] {
                app.handle_key(KeyEvent::new(KeyCode::Char(c), SHORTCUT_MODIFIER))
                    .await
                    .unwrap();
            }
            assert_eq!(app.state.editor.text(), "");
            assert_eq!(app.state.editor.revision(), 1);
        }
    }

    mod preview {
        use super::*;

        const CHOICE_FORM: &str = r#"{"formTitle":"T","fields":[
            {"id":"size","type":"radio","label":"Size","required":true,"options":[{"value":"s","label":"S"},{"value":"m","label":"M"}]},
            {"id":"notes","type":"textarea","label":"Notes"}
        ]}"#;

        #[tokio::test]
        async fn test_focus_toggles_with_f2_and_esc() {
            let mut app = app_with(EMAIL_FORM, quiet_sink());
            app.handle_key(key(KeyCode::F(2))).await.unwrap();
            assert_eq!(app.state.focus, Focus::Preview);
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert_eq!(app.state.focus, Focus::Editor);
            app.handle_key(ctrl('o')).await.unwrap();
            assert_eq!(app.state.focus, Focus::Preview);
        }

        #[tokio::test]
        async fn test_choice_keys_cycle_options() {
            let mut app = app_with(CHOICE_FORM, quiet_sink());
            app.handle_key(key(KeyCode::F(2))).await.unwrap();
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            let form = app.state.preview.form().unwrap();
            assert_eq!(form.field("size").unwrap().value.as_str(), "m");
            assert_eq!(form.field("size").unwrap().status, FieldStatus::Valid);
        }

        #[tokio::test]
        async fn test_textarea_enter_inserts_newline() {
            let mut app = app_with(CHOICE_FORM, quiet_sink());
            app.handle_key(key(KeyCode::F(2))).await.unwrap();
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_str(&mut app, "a").await;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            type_str(&mut app, "b").await;
            let form = app.state.preview.form().unwrap();
            assert_eq!(form.field("notes").unwrap().value.as_str(), "a\nb");
        }

        #[tokio::test]
        async fn test_retained_preview_is_read_only() {
            let mut app = app_with(EMAIL_FORM, quiet_sink());
            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            app.handle_key(key(KeyCode::F(2))).await.unwrap();
            type_str(&mut app, "a").await;

            let form = app.state.preview.form().unwrap();
            assert_eq!(form.field("email1").unwrap().value.as_str(), "");
            assert_eq!(
                app.status_message.as_deref(),
                Some("Preview is read-only until the schema is valid again")
            );
        }
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_even_with_dialog_open() {
        let mut app = app_with(EMAIL_FORM, quiet_sink());
        app.state.push_error("boom".to_string());
        assert!(!app.should_quit());
        app.handle_key(ctrl('c')).await.unwrap();
        assert!(app.should_quit());
        assert_eq!(app.sink_name(), "mock");
    }
}
