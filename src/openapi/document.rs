use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{HttpMethod, MediaType, Operation, RequestBody};

use super::error::LoadError;

const MAX_REF_HOPS: usize = 32;

/// The parts of an OpenAPI 3 description needed to build request bodies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiDocument {
    pub title: Option<String>,
    pub version: Option<String>,
    operations: Vec<Operation>,
}

impl ApiDocument {
    pub fn from_value(doc: &Value) -> Result<Self, LoadError> {
        let root = doc
            .as_object()
            .ok_or_else(|| LoadError::Invalid("document root must be an object".into()))?;
        let paths = root
            .get("paths")
            .and_then(Value::as_object)
            .ok_or_else(|| LoadError::Invalid("missing `paths` object".into()))?;

        let mut operations = Vec::new();
        for (path, item) in paths {
            let Some(item) = resolve_ref(doc, item).as_object() else {
                continue;
            };
            for method in HttpMethod::ALL {
                let Some(op) = item.get(method.path_item_key()).and_then(Value::as_object)
                else {
                    continue;
                };
                operations.push(parse_operation(doc, method, path, op));
            }
        }
        operations.sort_by(|a, b| a.path.cmp(&b.path).then(a.method.cmp(&b.method)));
        debug!(count = operations.len(), "parsed operations");

        let info = root.get("info");
        Ok(Self {
            title: info
                .and_then(|info| info.get("title"))
                .and_then(Value::as_str)
                .map(str::to_string),
            version: info
                .and_then(|info| info.get("version"))
                .and_then(Value::as_str)
                .map(str::to_string),
            operations,
        })
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Operations that define a request body, whatever its content type.
    pub fn operations_with_body(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter().filter(|op| op.has_request_body())
    }

    pub fn find(&self, method: HttpMethod, path: &str) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| op.method == method && op.path == path)
    }
}

fn parse_operation(
    doc: &Value,
    method: HttpMethod,
    path: &str,
    op: &Map<String, Value>,
) -> Operation {
    let summary = op
        .get("summary")
        .or_else(|| op.get("operationId"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let request_body = op
        .get("requestBody")
        .map(|body| resolve_ref(doc, body))
        .and_then(Value::as_object)
        .map(|body| parse_request_body(doc, body));

    Operation {
        method,
        path: path.to_string(),
        summary,
        request_body,
    }
}

fn parse_request_body(doc: &Value, body: &Map<String, Value>) -> RequestBody {
    let content = body
        .get("content")
        .and_then(Value::as_object)
        .map(|content| {
            content
                .iter()
                .map(|(content_type, media)| MediaType {
                    content_type: content_type.clone(),
                    schema: media.get("schema").map(|schema| resolve_schema(doc, schema)),
                })
                .collect()
        })
        .unwrap_or_default();

    RequestBody {
        required: body
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        content,
    }
}

/// Follow local `$ref`s (`#/components/...`) until a concrete node is found.
/// Unresolvable or cyclic references yield the last node reached.
pub fn resolve_ref<'a>(doc: &'a Value, mut node: &'a Value) -> &'a Value {
    for _ in 0..MAX_REF_HOPS {
        let Some(reference) = node.get("$ref").and_then(Value::as_str) else {
            return node;
        };
        let Some(target) = reference
            .strip_prefix('#')
            .and_then(|pointer| doc.pointer(pointer))
        else {
            debug!(reference, "unresolved $ref");
            return node;
        };
        node = target;
    }
    debug!("giving up on $ref chain after {MAX_REF_HOPS} hops");
    node
}

/// Resolve a body schema and its direct properties so each property's
/// `type` is visible.
fn resolve_schema(doc: &Value, schema: &Value) -> Value {
    let mut resolved = resolve_ref(doc, schema).clone();
    if let Some(properties) = resolved
        .get_mut("properties")
        .and_then(Value::as_object_mut)
    {
        for property in properties.values_mut() {
            let target = resolve_ref(doc, property).clone();
            *property = target;
        }
    }
    resolved
}
