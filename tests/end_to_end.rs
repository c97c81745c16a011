use std::path::Path;

use apiform::{
    ApiForm, body_form,
    command::{CommandExecutor, ExecutionError, deliver},
    domain::{HttpMethod, OperationSelector},
    form::{FieldError, FieldOrder, FormState},
    openapi::load_file,
};

fn fixture_session() -> ApiForm {
    let loaded = load_file(Path::new("tests/fixtures/users.json")).expect("fixture loads");
    ApiForm::from_loaded(loaded)
}

fn create_user_form(session: &ApiForm) -> FormState {
    let selector: OperationSelector = "POST /users".parse().expect("selector");
    let operation = session.find(&selector).expect("operation");
    body_form(operation, FieldOrder::Document)
        .expect("json body")
        .expect("fields")
}

#[test]
fn filled_form_renders_curl_command() {
    let session = fixture_session();
    let mut form = create_user_form(&session);
    assert!(form.set_text("name", "Ann"));
    assert!(form.set_text("age", "30"));
    assert!(form.set_text("tags", r#"["x","y"]"#));

    let body = form.commit().expect("body assembles");
    let operation = session
        .document()
        .find(HttpMethod::Post, "/users")
        .expect("operation");
    let command = session.render(operation, &body);

    assert_eq!(
        command.line,
        r#"curl -v -X POST $TARGET/users -H 'Content-Type: application/json' -d '{"name":"Ann","age":30,"tags":["x","y"]}'"#
    );
    assert!(!command.host.is_resolved());
}

#[test]
fn invalid_compound_text_blocks_rendering() {
    let session = fixture_session();
    let mut form = create_user_form(&session);
    form.set_text("name", "Ann");
    form.set_text("age", "30");
    form.set_text("tags", "not json");

    let err = form.commit().unwrap_err();
    assert_eq!(err.len(), 1);
    assert!(matches!(
        err.first(),
        Some(FieldError::CompoundParse { field, .. }) if field == "tags"
    ));
    assert_eq!(form.fields()[form.field_index()].name(), "tags");
}

#[test]
fn picker_candidates_cover_operations_with_bodies() {
    let session = fixture_session();
    let labels: Vec<String> = session
        .document()
        .operations_with_body()
        .map(|op| op.label())
        .collect();
    assert_eq!(labels, ["POST    /users", "PUT     /users/{id}/avatar"]);
}

#[test]
fn non_json_body_is_refused() {
    let session = fixture_session();
    let selector: OperationSelector = "PUT /users/{id}/avatar".parse().expect("selector");
    let err = session.run(Some(&selector)).unwrap_err();
    assert!(err.to_string().contains("image/png"));
}

struct Refusing;

impl CommandExecutor for Refusing {
    fn execute(&self, _line: &str) -> Result<(), ExecutionError> {
        panic!("placeholder commands must not run");
    }
}

#[test]
fn placeholder_command_is_printed_but_not_run() {
    let session = fixture_session();
    let mut form = create_user_form(&session);
    form.set_text("age", "1");
    form.set_text("tags", "[]");
    let body = form.commit().expect("body assembles");
    let operation = session
        .document()
        .find(HttpMethod::Post, "/users")
        .expect("operation");
    let command = session.render(operation, &body);

    let mut out = Vec::new();
    let warning = deliver(&command, Some(&Refusing), &mut out).expect("write");
    assert!(warning.is_none());
    let printed = String::from_utf8(out).expect("utf8");
    assert!(printed.contains(r#"'{"name":"","age":1,"tags":[]}'"#));
}
