use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    domain::PropertySchema,
    schema::{AcceptRule, Classification, PrimitiveKind, classify},
};

/// Editable counterpart of one request-body property.
#[derive(Debug, Clone)]
pub struct Field {
    pub schema: PropertySchema,
    pub descriptor: Classification,
    pub text: String,
    /// Read-only, reflowed schema of a compound property.
    pub preview: Option<String>,
    pub dirty: bool,
    pub error: Option<String>,
}

impl Field {
    pub fn new(schema: PropertySchema) -> Self {
        let descriptor = classify(&schema);
        Self {
            schema,
            descriptor,
            text: String::new(),
            preview: None,
            dirty: false,
            error: None,
        }
    }

    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.preview = Some(preview.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn is_compound(&self) -> bool {
        self.descriptor.is_compound()
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.descriptor {
            Classification::Primitive { kind, .. } => Some(kind),
            Classification::Compound => None,
        }
    }

    fn rule(&self) -> AcceptRule {
        match self.descriptor {
            Classification::Primitive { rule, .. } => rule,
            Classification::Compound => AcceptRule::Any,
        }
    }

    /// Replace the whole text if the field's input filter lets it through.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if !self.rule().allows_while_typing(&text) {
            return false;
        }
        if self.text != text {
            self.text = text;
            self.after_edit();
        }
        true
    }

    /// Append pasted or typed text, subject to the input filter.
    pub fn insert_str(&mut self, input: &str) -> bool {
        let input = if self.is_compound() {
            input.replace("\r\n", "\n")
        } else {
            input.replace(['\r', '\n'], "")
        };
        if input.is_empty() {
            return false;
        }
        let mut candidate = self.text.clone();
        candidate.push_str(&input);
        self.set_text(candidate)
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match key.code {
            KeyCode::Char(' ') if self.primitive_kind() == Some(PrimitiveKind::Boolean) => {
                let next = if self.text == "true" { "false" } else { "true" };
                self.set_text(next)
            }
            KeyCode::Char(c) => {
                let mut buffer = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut buffer))
            }
            KeyCode::Enter if self.is_compound() => self.insert_str("\n"),
            KeyCode::Backspace => {
                if self.text.is_empty() {
                    return false;
                }
                if self.primitive_kind() == Some(PrimitiveKind::Boolean) {
                    self.text.clear();
                } else {
                    self.text.pop();
                }
                self.after_edit();
                true
            }
            KeyCode::Delete if !self.is_compound() => {
                if self.text.is_empty() {
                    return false;
                }
                self.text.clear();
                self.after_edit();
                true
            }
            _ => false,
        }
    }

    pub fn display_value(&self) -> String {
        if self.text.is_empty() {
            match self.descriptor {
                Classification::Compound => "<empty: type or paste JSON>".to_string(),
                Classification::Primitive { .. } => String::new(),
            }
        } else {
            self.text.clone()
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    fn after_edit(&mut self) {
        self.dirty = true;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(kind: &str) -> Field {
        Field::new(PropertySchema::from_value(
            "value",
            &json!({ "type": kind }),
            false,
        ))
    }

    fn press(field: &mut Field, code: KeyCode) -> bool {
        field.handle_key(&KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(field: &mut Field, text: &str) {
        for c in text.chars() {
            press(field, KeyCode::Char(c));
        }
    }

    #[test]
    fn integer_field_filters_keystrokes() {
        let mut field = field("integer");
        type_text(&mut field, "-4a2.");
        assert_eq!(field.text, "-42");
        assert!(field.dirty);
    }

    #[test]
    fn number_field_accepts_exponent_while_typing() {
        let mut field = field("number");
        type_text(&mut field, "6.02e-x23");
        assert_eq!(field.text, "6.02e-23");
    }

    #[test]
    fn boolean_field_rejects_partial_literals_but_toggles() {
        let mut field = field("boolean");
        assert!(!press(&mut field, KeyCode::Char('t')));
        assert_eq!(field.text, "");
        assert!(field.insert_str("false"));
        assert_eq!(field.text, "false");
        press(&mut field, KeyCode::Char(' '));
        assert_eq!(field.text, "true");
        press(&mut field, KeyCode::Backspace);
        assert_eq!(field.text, "");
    }

    #[test]
    fn compound_field_keeps_newlines() {
        let mut field = field("object");
        field.insert_str("{\r\n");
        press(&mut field, KeyCode::Char('}'));
        press(&mut field, KeyCode::Enter);
        assert_eq!(field.text, "{\n}\n");
    }

    #[test]
    fn primitive_field_drops_pasted_newlines() {
        let mut field = field("string");
        field.insert_str("Ann\n");
        assert_eq!(field.text, "Ann");
        assert!(!press(&mut field, KeyCode::Enter));
    }

    #[test]
    fn delete_clears_primitives_but_keeps_compound_text() {
        let mut number = field("integer");
        type_text(&mut number, "123");
        assert!(press(&mut number, KeyCode::Delete));
        assert_eq!(number.text, "");

        let mut tags = field("array");
        tags.insert_str("[\n  \"x\",\n  \"y\"\n]");
        assert!(!press(&mut tags, KeyCode::Delete));
        assert_eq!(tags.text, "[\n  \"x\",\n  \"y\"\n]");
    }

    #[test]
    fn editing_clears_previous_error() {
        let mut field = field("string");
        field.set_error("boom".into());
        type_text(&mut field, "x");
        assert!(field.error.is_none());
    }

    #[test]
    fn control_chords_are_left_to_the_runtime() {
        let mut field = field("string");
        let handled = field.handle_key(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(!handled);
        assert!(field.text.is_empty());
    }
}
