#![deny(rust_2018_idioms)]
//! Pick an OpenAPI operation, fill in its JSON request body in a terminal
//! form, and get back a ready-to-run `curl` command.

mod app;
pub mod command;
pub mod domain;
pub mod form;
pub mod openapi;
pub mod schema;

pub use app::{ApiForm, Outcome, UiOptions, body_form};

pub mod prelude {
    pub use super::{
        ApiForm, Outcome, UiOptions,
        command::{RenderedCommand, ShellExecutor, deliver},
        domain::{HttpMethod, OperationSelector},
        openapi::{LoaderOptions, load_spec},
    };
}
