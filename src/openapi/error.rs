use std::{io, path::PathBuf};

/// The API description could not be obtained or understood.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not reach {host} over https or http")]
    Unreachable { host: String },
    #[error("failed to parse API description from {location}: {message}")]
    Parse { location: String, message: String },
    #[error("invalid API description: {0}")]
    Invalid(String),
}
