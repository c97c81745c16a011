use tracing::debug;

use crate::{domain::ObjectSchema, schema::reflow};

use super::field::Field;

/// Order in which a property set becomes form fields (and body keys).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldOrder {
    /// As the properties appear in the API description.
    #[default]
    Document,
    /// Lexicographic by property name.
    Sorted,
}

/// One field per property. Compound fields start empty; their schema is
/// attached as a reflowed, read-only preview.
pub fn build_fields(schema: &ObjectSchema, order: FieldOrder) -> Vec<Field> {
    let mut properties: Vec<_> = schema.properties.values().collect();
    if order == FieldOrder::Sorted {
        properties.sort_by(|a, b| a.name.cmp(&b.name));
    }

    let fields: Vec<Field> = properties
        .into_iter()
        .map(|property| {
            let field = Field::new(property.clone());
            if field.is_compound() {
                field.with_preview(reflow::render(&property.raw))
            } else {
                field
            }
        })
        .collect();

    debug!(count = fields.len(), ?order, "built form fields");
    fields
}
