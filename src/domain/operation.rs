use std::{fmt, str::FromStr};

use serde_json::Value;

use super::schema::ObjectSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Methods in the order an OpenAPI path item declares them.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Key used for this method inside an OpenAPI path item.
    pub fn path_item_key(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown HTTP method '{0}'")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// `METHOD /path`, as given on the command line to skip the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSelector {
    pub method: HttpMethod,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSelector {
    #[error("expected \"METHOD /path\", got {0:?}")]
    Shape(String),
    #[error(transparent)]
    Method(#[from] UnknownMethod),
}

impl FromStr for OperationSelector {
    type Err = InvalidSelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(method), Some(path), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(InvalidSelector::Shape(s.to_string()));
        };
        if !path.starts_with('/') {
            return Err(InvalidSelector::Shape(s.to_string()));
        }
        Ok(Self {
            method: method.parse()?,
            path: path.to_string(),
        })
    }
}

impl fmt::Display for OperationSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// One content entry of a request body (`requestBody.content.<type>`).
#[derive(Debug, Clone, PartialEq)]
pub struct MediaType {
    pub content_type: String,
    pub schema: Option<Value>,
}

impl MediaType {
    pub fn is_json(&self) -> bool {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        essence == "application/json" || essence.ends_with("+json")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody {
    pub required: bool,
    pub content: Vec<MediaType>,
}

impl RequestBody {
    /// `application/json` when offered, otherwise the first `+json` type.
    pub fn json_media(&self) -> Option<&MediaType> {
        self.content
            .iter()
            .find(|media| media.content_type.eq_ignore_ascii_case("application/json"))
            .or_else(|| self.content.iter().find(|media| media.is_json()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{method} {path} does not accept 'application/json' (offers: {})", display_offered(.offered))]
pub struct UnsupportedContentType {
    pub method: HttpMethod,
    pub path: String,
    pub offered: Vec<String>,
}

fn display_offered(offered: &[String]) -> String {
    if offered.is_empty() {
        "nothing".to_string()
    } else {
        offered.join(", ")
    }
}

/// One HTTP method bound to one path of the API description.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub method: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub request_body: Option<RequestBody>,
}

impl Operation {
    pub fn label(&self) -> String {
        format!("{:<8}{}", self.method, self.path)
    }

    pub fn has_request_body(&self) -> bool {
        self.request_body.is_some()
    }

    /// Property set of the JSON request body.
    ///
    /// `Ok(None)` when the operation declares no body at all; an error when
    /// it declares one without a JSON representation.
    pub fn body_schema(&self) -> Result<Option<ObjectSchema>, UnsupportedContentType> {
        let Some(body) = &self.request_body else {
            return Ok(None);
        };
        let Some(media) = body.json_media() else {
            return Err(UnsupportedContentType {
                method: self.method,
                path: self.path.clone(),
                offered: body
                    .content
                    .iter()
                    .map(|media| media.content_type.clone())
                    .collect(),
            });
        };
        Ok(Some(
            media
                .schema
                .as_ref()
                .map(ObjectSchema::from_value)
                .unwrap_or_default(),
        ))
    }
}
