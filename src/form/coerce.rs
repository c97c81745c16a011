use serde_json::{Number, Value};

use crate::schema::{Classification, PrimitiveKind};

use super::{error::FieldError, field::Field};

/// A field's value at commit time.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Value(Value),
    /// Compound text, parsed later by the assembler.
    Raw(String),
}

pub fn coerce(field: &Field) -> Result<Coerced, FieldError> {
    match field.descriptor {
        Classification::Compound => Ok(Coerced::Raw(field.text.clone())),
        Classification::Primitive { kind, .. } => {
            coerce_primitive(field.name(), kind, &field.text).map(Coerced::Value)
        }
    }
}

pub fn coerce_primitive(name: &str, kind: PrimitiveKind, text: &str) -> Result<Value, FieldError> {
    let invalid = || FieldError::Coercion {
        field: name.to_string(),
        kind,
        text: text.to_string(),
    };
    match kind {
        PrimitiveKind::String => Ok(Value::String(text.to_string())),
        // Anything but the literal `true` is false, including empty text.
        PrimitiveKind::Boolean => Ok(Value::Bool(text == "true")),
        PrimitiveKind::Integer => text.parse::<i64>().map(Value::from).map_err(|_| invalid()),
        PrimitiveKind::Number => text
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(invalid),
    }
}
