use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::form::{FormState, RequestBodyDraft};

use super::{
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
    view::{self, FormView},
};

const HELP_TEXT: &str =
    "Tab/Shift+Tab navigate • Space toggles booleans • Del clears a value • Ctrl+S send • Esc/Ctrl+Q cancel";

/// Full-screen form for one operation's request body.
pub(crate) struct FormApp {
    title: String,
    form: FormState,
    options: UiOptions,
    status: StatusLine,
    exit_armed: bool,
    should_quit: bool,
    result: Option<RequestBodyDraft>,
}

impl FormApp {
    pub fn new(title: impl Into<String>, form: FormState, options: UiOptions) -> Self {
        Self {
            title: title.into(),
            form,
            options,
            status: StatusLine::default(),
            exit_armed: false,
            should_quit: false,
            result: None,
        }
    }

    /// Returns `None` when the user cancels.
    pub fn run(mut self, terminal: &mut TerminalGuard) -> Result<Option<RequestBodyDraft>> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            match terminal.next_event(self.options.tick_rate)? {
                Some(Event::Key(key)) => self.handle_key(key),
                Some(Event::Paste(text)) => self.handle_paste(&text),
                Some(_) | None => {}
            }
        }
        Ok(self.result.take())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let help = if self.options.show_help {
            Some(HELP_TEXT)
        } else {
            None
        };
        view::draw_form(
            frame,
            FormView {
                title: &self.title,
                form: &self.form,
                status_message: self.status.message(),
                dirty: self.form.is_dirty(),
                help,
            },
        );
    }

    fn focused_label(&self) -> Option<String> {
        self.form
            .focused_field()
            .map(|field| field.schema.display_label())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        if control {
            match key.code {
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    self.disarm_exit();
                    self.on_send();
                    return;
                }
                KeyCode::Char('q')
                | KeyCode::Char('Q')
                | KeyCode::Char('c')
                | KeyCode::Char('C') => {
                    self.on_exit();
                    return;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => self.on_exit(),
            KeyCode::Tab | KeyCode::Down => {
                self.form.focus_next_field();
                self.disarm_exit();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.focus_prev_field();
                self.disarm_exit();
            }
            KeyCode::Enter
                if self
                    .form
                    .focused_field()
                    .is_some_and(|field| !field.is_compound()) =>
            {
                self.form.focus_next_field();
                self.disarm_exit();
            }
            _ => {
                let Some(label) = self.focused_label() else {
                    return;
                };
                if self.form.handle_key(&key) {
                    self.disarm_exit();
                    self.status.editing(&label);
                } else if matches!(key.code, KeyCode::Char(_)) && !control {
                    self.status.rejected(&label);
                }
            }
        }
    }

    fn handle_paste(&mut self, text: &str) {
        let Some(label) = self.focused_label() else {
            return;
        };
        if self.form.paste(text) {
            self.disarm_exit();
            self.status.editing(&label);
        } else {
            self.status.rejected(&label);
        }
    }

    fn on_send(&mut self) {
        match self.form.commit() {
            Ok(draft) => {
                debug!(fields = draft.len(), "request body committed");
                self.status.set_raw("Request body ready");
                self.result = Some(draft);
                self.should_quit = true;
            }
            Err(err) => {
                debug!(errors = err.len(), "request body rejected");
                if let Some(first) = err.first() {
                    self.status.issues_remaining(err.len(), &first.to_string());
                }
            }
        }
    }

    fn disarm_exit(&mut self) {
        if self.exit_armed {
            self.exit_armed = false;
            self.status.ready();
        }
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.form.is_dirty() && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::ObjectSchema, form::FieldOrder};
    use serde_json::json;

    fn app(options: UiOptions) -> FormApp {
        let schema = ObjectSchema::from_value(&json!({
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer"},
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        }));
        FormApp::new(
            "POST    /users",
            FormState::from_schema(&schema, FieldOrder::Document),
            options,
        )
    }

    fn press(app: &mut FormApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut FormApp, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut FormApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn send_commits_filled_form() {
        let mut app = app(UiOptions::default());
        type_text(&mut app, "Ann");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "30");
        press(&mut app, KeyCode::Tab);
        app.handle_paste("[\"x\",\"y\"]");
        ctrl(&mut app, 's');

        assert!(app.should_quit);
        let draft = app.result.take().expect("draft");
        assert_eq!(draft.to_json(), r#"{"name":"Ann","age":30,"tags":["x","y"]}"#);
    }

    #[test]
    fn failed_send_keeps_form_open_and_reports_first_error() {
        let mut app = app(UiOptions::default());
        type_text(&mut app, "Ann");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "not json");
        ctrl(&mut app, 's');

        assert!(!app.should_quit);
        assert!(app.result.is_none());
        assert_eq!(app.form.field_index(), 1);
        assert!(app.status.message().starts_with("2 issue(s): age:"));
    }

    #[test]
    fn rejected_keystroke_is_reported() {
        let mut app = app(UiOptions::default());
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "x");
        assert_eq!(app.form.fields()[1].text, "");
        assert_eq!(app.status.message(), "Input rejected for age (integer)");
    }

    #[test]
    fn enter_adds_newline_inside_compound_field() {
        let mut app = app(UiOptions::default());
        press(&mut app, KeyCode::BackTab);
        type_text(&mut app, "[");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "]");
        assert_eq!(app.form.field_index(), 2);
        assert_eq!(app.form.fields()[2].text, "[\n]");
    }

    #[test]
    fn dirty_form_requires_confirmation_to_cancel() {
        let mut app = app(UiOptions::default());
        type_text(&mut app, "A");
        press(&mut app, KeyCode::Esc);
        assert!(!app.should_quit);
        assert!(app.exit_armed);
        ctrl(&mut app, 'q');
        assert!(app.should_quit);
        assert!(app.result.is_none());
    }

    #[test]
    fn clean_form_cancels_immediately() {
        let mut clean = app(UiOptions::default());
        press(&mut clean, KeyCode::Esc);
        assert!(clean.should_quit);

        let mut unconfirmed = app(UiOptions::default().with_confirm_exit(false));
        type_text(&mut unconfirmed, "A");
        ctrl(&mut unconfirmed, 'c');
        assert!(unconfirmed.should_quit);
    }
}
