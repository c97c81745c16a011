//! Obtaining an OpenAPI description and listing its operations.

mod document;
mod error;
mod format;
mod loader;
mod probe;

pub use document::{ApiDocument, resolve_ref};
pub use error::LoadError;
pub use format::{DocumentFormat, parse_any, parse_document_str};
pub use loader::{
    LoadedSpec, LoaderOptions, document_url, load_file, load_spec, origin_of, resolve_location,
};
pub use probe::{DEFAULT_PROBE_TIMEOUT, HttpProbe, Probe, discover_scheme};
