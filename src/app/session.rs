use anyhow::{Result, anyhow, bail};
use crossterm::event::Event;
use tracing::{debug, info};

use crate::{
    command::{RenderedCommand, TargetHost, render_command},
    domain::{Operation, OperationSelector, UnsupportedContentType},
    form::{FieldOrder, FormState, RequestBodyDraft},
    openapi::{ApiDocument, LoadedSpec},
};

use super::{
    options::UiOptions,
    picker::{OperationPicker, PickerAction},
    runtime::FormApp,
    terminal::TerminalGuard,
    view::{self, PickerView},
};

const PICKER_HELP: &str = "Type to filter • ↑/↓ move • Enter select • Esc quit";

/// How an interactive session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rendered(RenderedCommand),
    Cancelled,
}

/// One pick-fill-render session over an API description.
#[derive(Debug)]
pub struct ApiForm {
    document: ApiDocument,
    origin: Option<String>,
    options: UiOptions,
}

impl ApiForm {
    pub fn new(document: ApiDocument) -> Self {
        Self {
            document,
            origin: None,
            options: UiOptions::default(),
        }
    }

    pub fn from_loaded(loaded: LoadedSpec) -> Self {
        Self::new(loaded.document).with_origin(loaded.origin)
    }

    /// Host the command targets; `None` leaves the placeholder in place.
    pub fn with_origin(mut self, origin: Option<String>) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    pub fn document(&self) -> &ApiDocument {
        &self.document
    }

    fn title(&self) -> String {
        match (&self.document.title, &self.document.version) {
            (Some(title), Some(version)) => format!("{title} {version}"),
            (Some(title), None) => title.clone(),
            _ => "API".to_string(),
        }
    }

    pub fn find(&self, selector: &OperationSelector) -> Result<&Operation> {
        self.document
            .find(selector.method, &selector.path)
            .ok_or_else(|| anyhow!("operation `{selector}` not found in {}", self.title()))
    }

    pub fn run(self, selector: Option<&OperationSelector>) -> Result<Outcome> {
        let mut terminal = None;
        let operation = match selector {
            Some(selector) => self.find(selector)?,
            None => {
                let candidates: Vec<&Operation> = self.document.operations_with_body().collect();
                if candidates.is_empty() {
                    bail!("{} declares no operations with a request body", self.title());
                }
                let guard = terminal.insert(TerminalGuard::new()?);
                match self.pick(guard, &candidates)? {
                    Some(operation) => operation,
                    None => return Ok(Outcome::Cancelled),
                }
            }
        };
        info!(operation = %operation.label(), "operation selected");

        let body = match body_form(operation, self.options.field_order)? {
            None => {
                debug!("no properties to fill, sending an empty object");
                RequestBodyDraft::new()
            }
            Some(form) => {
                let mut guard = match terminal.take() {
                    Some(guard) => guard,
                    None => TerminalGuard::new()?,
                };
                let app = FormApp::new(operation.label(), form, self.options.clone());
                match app.run(&mut guard)? {
                    Some(draft) => draft,
                    None => return Ok(Outcome::Cancelled),
                }
            }
        };
        drop(terminal);

        Ok(Outcome::Rendered(self.render(operation, &body)))
    }

    fn pick<'a>(
        &self,
        terminal: &mut TerminalGuard,
        candidates: &[&'a Operation],
    ) -> Result<Option<&'a Operation>> {
        let title = self.title();
        let mut picker = OperationPicker::new(candidates.iter().copied().enumerate());
        loop {
            terminal.draw(|frame| {
                view::draw_picker(
                    frame,
                    PickerView {
                        title: &title,
                        picker: &picker,
                        help: self.options.show_help.then_some(PICKER_HELP),
                    },
                )
            })?;
            let Some(Event::Key(key)) = terminal.next_event(self.options.tick_rate)? else {
                continue;
            };
            match picker.handle_key(&key) {
                PickerAction::Continue => {}
                PickerAction::Selected(index) => return Ok(candidates.get(index).copied()),
                PickerAction::Cancelled => return Ok(None),
            }
        }
    }

    /// Build the curl line for `operation` with an already assembled body.
    pub fn render(&self, operation: &Operation, body: &RequestBodyDraft) -> RenderedCommand {
        let host = TargetHost::resolve(self.origin.clone(), &self.options.placeholder);
        render_command(operation.method, &operation.path, &host, body)
    }
}

/// The form to show for `operation`, or `None` when there is nothing to
/// fill in (no request body, or a body schema without properties).
pub fn body_form(
    operation: &Operation,
    order: FieldOrder,
) -> Result<Option<FormState>, UnsupportedContentType> {
    let form = operation
        .body_schema()?
        .filter(|schema| !schema.is_empty())
        .map(|schema| FormState::from_schema(&schema, order));
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HttpMethod;
    use serde_json::json;

    fn document() -> ApiDocument {
        ApiDocument::from_value(&json!({
            "openapi": "3.0.0",
            "info": {"title": "Users", "version": "1.0"},
            "paths": {
                "/users": {
                    "get": {"summary": "List users"},
                    "post": {
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "properties": {
                                            "name": {"type": "string"},
                                            "age": {"type": "integer"}
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/upload": {
                    "post": {
                        "requestBody": {
                            "content": {"multipart/form-data": {"schema": {"type": "object"}}}
                        }
                    }
                }
            }
        }))
        .expect("document")
    }

    fn selector(text: &str) -> OperationSelector {
        text.parse().expect("selector")
    }

    #[test]
    fn finds_selected_operation() {
        let session = ApiForm::new(document());
        let op = session.find(&selector("POST /users")).expect("operation");
        assert_eq!(op.method, HttpMethod::Post);

        let err = session.find(&selector("DELETE /users")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "operation `DELETE /users` not found in Users 1.0"
        );
    }

    #[test]
    fn body_form_depends_on_the_request_body() {
        let session = ApiForm::new(document());
        let post = session.find(&selector("POST /users")).unwrap();
        let form = body_form(post, FieldOrder::Sorted).unwrap().expect("form");
        assert_eq!(form.fields()[0].name(), "age");

        let get = session.find(&selector("GET /users")).unwrap();
        assert!(body_form(get, FieldOrder::Document).unwrap().is_none());

        let upload = session.find(&selector("POST /upload")).unwrap();
        assert!(body_form(upload, FieldOrder::Document).is_err());
    }

    #[test]
    fn operation_without_body_runs_without_terminal() {
        let session = ApiForm::new(document());
        let outcome = session.run(Some(&selector("GET /users"))).unwrap();
        let Outcome::Rendered(command) = outcome else {
            panic!("expected a rendered command");
        };
        assert_eq!(
            command.line,
            "curl -v -X GET $TARGET/users -H 'Content-Type: application/json' -d '{}'"
        );
    }

    #[test]
    fn unsupported_content_type_is_an_error() {
        let session = ApiForm::new(document());
        let err = session.run(Some(&selector("POST /upload"))).unwrap_err();
        assert!(err.downcast_ref::<UnsupportedContentType>().is_some());
    }

    #[test]
    fn render_uses_origin_when_known() {
        let session = ApiForm::new(document())
            .with_origin(Some("https://api.example.com".into()))
            .with_options(UiOptions::default().with_placeholder("$HOST"));
        let op = session.find(&selector("POST /users")).unwrap();
        let mut body = RequestBodyDraft::new();
        body.insert("name", json!("O'Brien"));
        let command = session.render(op, &body);
        assert!(command.host.is_resolved());
        assert_eq!(
            command.line,
            r#"curl -v -X POST https://api.example.com/users -H 'Content-Type: application/json' -d '{"name":"O'\''Brien"}'"#
        );
    }
}
