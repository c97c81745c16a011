use std::fmt;

use crate::schema::PrimitiveKind;

/// A single field whose text could not become part of the request body.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("{field}: expected {kind}, got {text:?}")]
    Coercion {
        field: String,
        kind: PrimitiveKind,
        text: String,
    },
    #[error("{field}: invalid JSON ({message})")]
    CompoundParse { field: String, message: String },
}

impl FieldError {
    pub fn field(&self) -> &str {
        match self {
            FieldError::Coercion { field, .. } | FieldError::CompoundParse { field, .. } => field,
        }
    }

    /// Message shown next to the field, without the field name prefix.
    pub fn inline_message(&self) -> String {
        match self {
            FieldError::Coercion { kind, text, .. } if text.is_empty() => {
                format!("expected {kind}, field is empty")
            }
            FieldError::Coercion { kind, text, .. } => format!("'{text}' is not a valid {kind}"),
            FieldError::CompoundParse { message, .. } => format!("invalid JSON: {message}"),
        }
    }
}

/// Every field error found while assembling a request body.
#[derive(Debug, Clone, PartialEq)]
pub struct FormError {
    pub errors: Vec<FieldError>,
}

impl FormError {
    pub fn first(&self) -> Option<&FieldError> {
        self.errors.first()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<FieldError> for FormError {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => f.write_str("request body could not be assembled"),
            [single] => write!(f, "{single}"),
            [first, rest @ ..] => write!(f, "{first} (and {} more)", rest.len()),
        }
    }
}

impl std::error::Error for FormError {}
