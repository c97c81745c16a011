mod assemble;
mod builder;
mod coerce;
mod error;
mod field;
mod state;

pub use assemble::{RequestBodyDraft, assemble};
pub use builder::{FieldOrder, build_fields};
pub use coerce::{Coerced, coerce, coerce_primitive};
pub use error::{FieldError, FormError};
pub use field::Field;
pub use state::FormState;
