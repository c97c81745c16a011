//! Interactive layer: operation picker, request-body form and the session
//! that ties them to command rendering.

mod options;
mod picker;
mod runtime;
mod session;
mod status;
mod terminal;
mod view;

pub use options::UiOptions;
pub use session::{ApiForm, Outcome, body_form};
