use serde_json::{Map, Value};
use tracing::debug;

use crate::schema::reflow;

use super::{
    coerce::{Coerced, coerce},
    error::{FieldError, FormError},
    field::Field,
};

/// Ordered property name to value mapping sent as the request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBodyDraft {
    values: Map<String, Value>,
}

impl RequestBodyDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Compact JSON text, keys in insertion order.
    pub fn to_json(&self) -> String {
        Value::Object(self.values.clone()).to_string()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

/// Coerce every field and collect the results into one body.
///
/// Fails if any field cannot be coerced or holds malformed JSON; every
/// failing field is reported, not just the first.
pub fn assemble(fields: &[Field]) -> Result<RequestBodyDraft, FormError> {
    let mut draft = RequestBodyDraft::new();
    let mut errors = Vec::new();

    for field in fields {
        let value = match coerce(field) {
            Ok(Coerced::Value(value)) => value,
            Ok(Coerced::Raw(text)) => match reflow::parse(&text) {
                Ok(value) => value,
                Err(err) => {
                    errors.push(FieldError::CompoundParse {
                        field: field.name().to_string(),
                        message: format!(
                            "{} at line {}, column {}",
                            err.message, err.line, err.column
                        ),
                    });
                    continue;
                }
            },
            Err(err) => {
                errors.push(err);
                continue;
            }
        };
        draft.insert(field.name(), value);
    }

    if !errors.is_empty() {
        debug!(failed = errors.len(), "request body rejected");
        return Err(FormError { errors });
    }
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::ObjectSchema,
        form::{FieldOrder, build_fields},
    };
    use serde_json::json;

    fn users_fields() -> Vec<Field> {
        build_fields(
            &ObjectSchema::from_value(&json!({
                "properties": {
                    "name": {"type": "string"},
                    "age": {"type": "integer"},
                    "tags": {"type": "array", "items": {"type": "string"}}
                }
            })),
            FieldOrder::Document,
        )
    }

    fn fill(fields: &mut [Field], values: &[(&str, &str)]) {
        for (name, text) in values {
            let field = fields
                .iter_mut()
                .find(|field| field.name() == *name)
                .expect("field exists");
            field.text = text.to_string();
        }
    }

    #[test]
    fn one_key_per_property_in_schema_order() {
        let mut fields = users_fields();
        fill(
            &mut fields,
            &[("name", "Ann"), ("age", "30"), ("tags", r#"["x","y"]"#)],
        );
        let draft = assemble(&fields).unwrap();
        assert_eq!(draft.keys().collect::<Vec<_>>(), ["name", "age", "tags"]);
        assert_eq!(draft.get("tags"), Some(&json!(["x", "y"])));
        assert_eq!(draft.to_json(), r#"{"name":"Ann","age":30,"tags":["x","y"]}"#);
    }

    #[test]
    fn nested_objects_are_parsed_not_stringified() {
        let mut fields = build_fields(
            &ObjectSchema::from_value(&json!({
                "properties": {"meta": {"type": "object"}}
            })),
            FieldOrder::Document,
        );
        fill(&mut fields, &[("meta", "{\n  \"b\": 1,\n  \"a\": [true]\n}")]);
        let draft = assemble(&fields).unwrap();
        assert_eq!(draft.into_value(), json!({"meta": {"b": 1, "a": [true]}}));
    }

    #[test]
    fn malformed_compound_text_rejects_the_body() {
        let mut fields = users_fields();
        fill(
            &mut fields,
            &[("name", "Ann"), ("age", "30"), ("tags", "not json")],
        );
        let err = assemble(&fields).unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(matches!(
            err.first(),
            Some(FieldError::CompoundParse { field, .. }) if field == "tags"
        ));
    }

    #[test]
    fn every_failing_field_is_reported() {
        let mut fields = users_fields();
        fill(&mut fields, &[("age", "4.2")]);
        let err = assemble(&fields).unwrap_err();
        let failed: Vec<&str> = err.errors.iter().map(FieldError::field).collect();
        assert_eq!(failed, ["age", "tags"]);
    }

    #[test]
    fn empty_property_set_gives_empty_object() {
        let draft = assemble(&[]).unwrap();
        assert!(draft.is_empty());
        assert_eq!(draft.to_json(), "{}");
    }
}
