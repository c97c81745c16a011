use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::{domain::HttpMethod, form::RequestBodyDraft};

pub const DEFAULT_PLACEHOLDER: &str = "$TARGET";

static SHELL_SAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_./:@%+=,-]*$").expect("valid shell-safe pattern"));

/// Where the rendered command points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetHost {
    /// Origin the API description was fetched from, e.g. `https://api.example.com`.
    Resolved(String),
    /// Token left for the operator to supply, e.g. `$TARGET`.
    Placeholder(String),
}

impl TargetHost {
    pub fn resolve(origin: Option<String>, placeholder: &str) -> Self {
        match origin {
            Some(origin) if !origin.trim().is_empty() => {
                TargetHost::Resolved(origin.trim_end_matches('/').to_string())
            }
            _ => TargetHost::Placeholder(placeholder.to_string()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, TargetHost::Resolved(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            TargetHost::Resolved(origin) => origin,
            TargetHost::Placeholder(token) => token,
        }
    }
}

impl Default for TargetHost {
    fn default() -> Self {
        TargetHost::Placeholder(DEFAULT_PLACEHOLDER.to_string())
    }
}

impl fmt::Display for TargetHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-line curl invocation ready to print or run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCommand {
    pub line: String,
    pub host: TargetHost,
}

impl fmt::Display for RenderedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

pub fn render_command(
    method: HttpMethod,
    path: &str,
    host: &TargetHost,
    body: &RequestBodyDraft,
) -> RenderedCommand {
    let line = format!(
        "curl -v -X {method} {url} -H 'Content-Type: application/json' -d {body}",
        url = url_word(host, path),
        body = single_quote(&body.to_json()),
    );
    RenderedCommand {
        line,
        host: host.clone(),
    }
}

/// Wrap `text` in single quotes; embedded quotes become `'\''`.
pub fn single_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

fn quote_if_needed(text: &str) -> String {
    if SHELL_SAFE.is_match(text) {
        text.to_string()
    } else {
        single_quote(text)
    }
}

fn url_word(host: &TargetHost, path: &str) -> String {
    match host {
        // The placeholder must stay unquoted so the shell expands it.
        TargetHost::Placeholder(token) => format!("{token}{}", quote_if_needed(path)),
        TargetHost::Resolved(origin) => quote_if_needed(&format!("{origin}{path}")),
    }
}
