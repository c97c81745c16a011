use std::{fs, path::Path, time::Duration};

use reqwest::blocking::Client;
use tracing::{debug, info};
use url::Url;

use super::{
    document::ApiDocument,
    error::LoadError,
    format::{DocumentFormat, parse_any},
    probe::{DEFAULT_PROBE_TIMEOUT, HttpProbe, Probe, discover_scheme, http_client},
};

const DEFAULT_DOCUMENT_NAME: &str = "openapi.json";

#[derive(Debug, Clone)]
pub struct LoaderOptions {
    pub timeout: Duration,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl LoaderOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A parsed API description and, when it came over the network, the origin
/// (`scheme://host[:port]`) requests should go to.
#[derive(Debug, Clone)]
pub struct LoadedSpec {
    pub document: ApiDocument,
    pub origin: Option<String>,
}

/// Load from an existing file, otherwise treat `spec` as a host or URL.
pub fn load_spec(spec: &str, options: &LoaderOptions) -> Result<LoadedSpec, LoadError> {
    let path = Path::new(spec);
    if path.is_file() {
        return load_file(path);
    }

    let client = http_client(options.timeout).map_err(|source| LoadError::Fetch {
        url: spec.to_string(),
        source,
    })?;
    let location = resolve_location(spec, &HttpProbe::new(client.clone()))?;
    load_url(&client, &location)
}

pub fn load_file(path: &Path) -> Result<LoadedSpec, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let location = path.display().to_string();
    let document = parse_document(&contents, &location)?;
    debug!(%location, "loaded API description from file");
    Ok(LoadedSpec {
        document,
        origin: None,
    })
}

/// Turn a host or URL into the URL of the API description, probing the
/// scheme when none is given.
pub fn resolve_location(spec: &str, probe: &dyn Probe) -> Result<String, LoadError> {
    let base = if spec.starts_with("http://") || spec.starts_with("https://") {
        spec.to_string()
    } else {
        let found = discover_scheme(spec, probe).ok_or_else(|| LoadError::Unreachable {
            host: spec.to_string(),
        })?;
        info!(url = %found, "protocol discovered");
        found
    };
    Ok(document_url(&base))
}

/// Append `/openapi.json` unless the location already names a document.
pub fn document_url(base: &str) -> String {
    let lower = base.to_ascii_lowercase();
    if [".json", ".yaml", ".yml"]
        .iter()
        .any(|ext| lower.ends_with(ext))
    {
        base.to_string()
    } else {
        format!("{}/{DEFAULT_DOCUMENT_NAME}", base.trim_end_matches('/'))
    }
}

/// `scheme://host[:port]` of a URL.
pub fn origin_of(url: &Url) -> Option<String> {
    let origin = url.origin();
    origin
        .is_tuple()
        .then(|| origin.ascii_serialization())
}

fn load_url(client: &Client, location: &str) -> Result<LoadedSpec, LoadError> {
    let url = Url::parse(location).map_err(|source| LoadError::Url {
        url: location.to_string(),
        source,
    })?;
    let fetch_error = |source| LoadError::Fetch {
        url: location.to_string(),
        source,
    };
    let contents = client
        .get(url.clone())
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(fetch_error)?;

    let document = parse_document(&contents, location)?;
    debug!(%location, "loaded API description over HTTP");
    Ok(LoadedSpec {
        document,
        origin: origin_of(&url),
    })
}

fn parse_document(contents: &str, location: &str) -> Result<ApiDocument, LoadError> {
    let value = parse_any(contents, DocumentFormat::from_location(location)).map_err(|message| {
        LoadError::Parse {
            location: location.to_string(),
            message,
        }
    })?;
    ApiDocument::from_value(&value)
}
