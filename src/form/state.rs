use crossterm::event::KeyEvent;

use crate::domain::ObjectSchema;

use super::{
    assemble::{RequestBodyDraft, assemble},
    builder::{FieldOrder, build_fields},
    error::FormError,
    field::Field,
};

/// Field list plus focus for one open form.
#[derive(Debug, Clone)]
pub struct FormState {
    fields: Vec<Field>,
    field_index: usize,
}

impl FormState {
    pub fn from_schema(schema: &ObjectSchema, order: FieldOrder) -> Self {
        Self::from_fields(build_fields(schema, order))
    }

    pub fn from_fields(fields: Vec<Field>) -> Self {
        Self {
            fields,
            field_index: 0,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_index(&self) -> usize {
        self.field_index
    }

    pub fn focused_field(&self) -> Option<&Field> {
        self.fields.get(self.field_index)
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut Field> {
        self.fields.get_mut(self.field_index)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|field| field.name() == name)
    }

    pub fn focus_next_field(&mut self) {
        if !self.fields.is_empty() {
            self.field_index = (self.field_index + 1) % self.fields.len();
        }
    }

    pub fn focus_prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.field_index = self
                .field_index
                .checked_sub(1)
                .unwrap_or(self.fields.len() - 1);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.fields.iter().any(|field| field.dirty)
    }

    /// Route a key to the focused field. Returns whether the text changed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        self.focused_field_mut()
            .is_some_and(|field| field.handle_key(key))
    }

    pub fn paste(&mut self, text: &str) -> bool {
        self.focused_field_mut()
            .is_some_and(|field| field.insert_str(text))
    }

    /// Set a field's text by name, through its input filter.
    pub fn set_text(&mut self, name: &str, text: &str) -> bool {
        self.field_mut(name)
            .is_some_and(|field| field.set_text(text))
    }

    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.clear_error();
        }
    }

    /// Assemble the request body. On failure each offending field keeps an
    /// inline message and focus moves to the first of them.
    pub fn commit(&mut self) -> Result<RequestBodyDraft, FormError> {
        self.clear_errors();
        let error = match assemble(&self.fields) {
            Ok(draft) => return Ok(draft),
            Err(error) => error,
        };
        for field_error in &error.errors {
            if let Some(field) = self.field_mut(field_error.field()) {
                field.set_error(field_error.inline_message());
            }
        }
        if let Some(index) = error.first().and_then(|first| {
            self.fields
                .iter()
                .position(|field| field.name() == first.field())
        }) {
            self.field_index = index;
        }
        Err(error)
    }
}
