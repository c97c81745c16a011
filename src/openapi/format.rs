use std::fmt;

use serde_json::Value;

/// Serialization formats an API description may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    #[cfg(feature = "yaml")]
    Yaml,
}

impl DocumentFormat {
    pub fn available_formats() -> Vec<DocumentFormat> {
        #[cfg_attr(not(feature = "yaml"), allow(unused_mut))]
        let mut formats = vec![DocumentFormat::Json];
        #[cfg(feature = "yaml")]
        formats.push(DocumentFormat::Yaml);
        formats
    }

    /// Guess the format from a file name or URL path.
    pub fn from_location(location: &str) -> DocumentFormat {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::available_formats()
            .into_iter()
            .find(|format| format.extensions().iter().any(|ext| path.ends_with(ext)))
            .unwrap_or_default()
    }

    fn extensions(self) -> &'static [&'static str] {
        match self {
            DocumentFormat::Json => &[".json"],
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml => &[".yaml", ".yml"],
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml => write!(f, "yaml"),
        }
    }
}

pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value, String> {
    match format {
        DocumentFormat::Json => serde_json::from_str(contents).map_err(|err| err.to_string()),
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::from_str(contents).map_err(|err| err.to_string()),
    }
}

/// Parse with the preferred format first, then every other available one.
pub fn parse_any(contents: &str, preferred: DocumentFormat) -> Result<Value, String> {
    let primary = match parse_document_str(contents, preferred) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };
    DocumentFormat::available_formats()
        .into_iter()
        .filter(|candidate| *candidate != preferred)
        .find_map(|candidate| parse_document_str(contents, candidate).ok())
        .ok_or_else(|| format!("{preferred}: {primary}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_is_the_default_guess() {
        assert_eq!(
            DocumentFormat::from_location("http://h/openapi.json"),
            DocumentFormat::Json
        );
        assert_eq!(DocumentFormat::from_location("spec"), DocumentFormat::Json);
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_extensions_are_detected_and_parsed() {
        assert_eq!(
            DocumentFormat::from_location("api/openapi.YML?raw=1"),
            DocumentFormat::Yaml
        );
        let value = parse_any("openapi: 3.0.0\npaths: {}\n", DocumentFormat::Json).unwrap();
        assert_eq!(value["openapi"], "3.0.0");
    }

    #[test]
    fn json_is_always_available_and_listed_first() {
        let formats = DocumentFormat::available_formats();
        assert_eq!(formats.first(), Some(&DocumentFormat::Json));
        assert_eq!(formats.len(), if cfg!(feature = "yaml") { 2 } else { 1 });
    }

    #[test]
    fn reports_the_preferred_format_error() {
        let err = parse_any("{{{", DocumentFormat::Json).unwrap_err();
        assert!(err.starts_with("json: "));
    }
}
