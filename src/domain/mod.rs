mod operation;
mod schema;

pub use operation::{
    HttpMethod, InvalidSelector, MediaType, Operation, OperationSelector, RequestBody,
    UnknownMethod, UnsupportedContentType,
};
pub use schema::{ObjectSchema, PropertySchema, PropertyType};
