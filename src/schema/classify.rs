use std::fmt;

use crate::domain::{PropertySchema, PropertyType};

/// Scalar types that are edited as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl PrimitiveKind {
    pub fn rule(self) -> AcceptRule {
        match self {
            PrimitiveKind::String => AcceptRule::Any,
            PrimitiveKind::Integer => AcceptRule::Integer,
            PrimitiveKind::Number => AcceptRule::Float,
            PrimitiveKind::Boolean => AcceptRule::BoolLiteral,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
        })
    }
}

/// Input filter applied to a primitive field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptRule {
    Any,
    /// Only the literals `true` and `false`.
    BoolLiteral,
    Integer,
    Float,
}

impl AcceptRule {
    /// Whether `text` is a complete, valid value under this rule.
    pub fn accepts(self, text: &str) -> bool {
        match self {
            AcceptRule::Any => true,
            AcceptRule::BoolLiteral => text == "true" || text == "false",
            AcceptRule::Integer => text.parse::<i64>().is_ok(),
            AcceptRule::Float => is_float_literal(text),
        }
    }

    /// Whether `text` may stay in the editor while the user is typing.
    ///
    /// Numeric rules let intermediate states through (`-`, `1.`, `2e-`);
    /// the boolean rule is strict at every keystroke.
    pub fn allows_while_typing(self, text: &str) -> bool {
        if text.is_empty() || self.accepts(text) {
            return true;
        }
        match self {
            AcceptRule::Any => true,
            AcceptRule::BoolLiteral => false,
            AcceptRule::Integer => text == "-" || text == "+",
            AcceptRule::Float => is_partial_float(text),
        }
    }
}

fn is_float_literal(text: &str) -> bool {
    // `f64::from_str` also takes `inf` and `NaN`, which JSON cannot carry.
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        && text.parse::<f64>().is_ok()
}

fn is_partial_float(text: &str) -> bool {
    if matches!(text, "-" | "+" | "." | "-." | "+.") {
        return true;
    }
    let trimmed = text
        .strip_suffix(['-', '+'])
        .filter(|rest| rest.ends_with(['e', 'E']))
        .unwrap_or(text);
    match trimmed.strip_suffix(['e', 'E']) {
        Some(mantissa) => !mantissa.contains(['e', 'E']) && is_float_literal(mantissa),
        None => false,
    }
}

/// Outcome of classifying one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Primitive { kind: PrimitiveKind, rule: AcceptRule },
    /// Objects, arrays and anything unrecognised; edited as raw JSON.
    Compound,
}

impl Classification {
    pub fn is_compound(&self) -> bool {
        matches!(self, Classification::Compound)
    }
}

pub fn classify(property: &PropertySchema) -> Classification {
    classify_type(&property.declared_type)
}

pub fn classify_type(declared: &PropertyType) -> Classification {
    let kind = match declared {
        PropertyType::String => PrimitiveKind::String,
        PropertyType::Integer => PrimitiveKind::Integer,
        PropertyType::Number => PrimitiveKind::Number,
        PropertyType::Boolean => PrimitiveKind::Boolean,
        PropertyType::Object | PropertyType::Array | PropertyType::Other(_) => {
            return Classification::Compound;
        }
    };
    Classification::Primitive {
        kind,
        rule: kind.rule(),
    }
}
