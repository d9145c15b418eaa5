//! Remote project-list seed source and tolerant response parsing.
//!
//! # Responsibility
//! - Fetch the one-time project seed from the backend.
//! - Survive proxy layers that wrap the JSON body in markup or banners by
//!   parsing only the outermost `{...}` span.
//!
//! # Invariants
//! - A body with no parseable JSON span is a fetch failure, not a panic.
//! - Seed entries missing label/value fields are mapped with synthesized
//!   fallbacks, never dropped.

use crate::model::project::{generated_project_value, Project};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

static MARKUP_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid markup tag regex"));

/// Seed fetch/parse failure. The registry degrades silently on any of these.
#[derive(Debug)]
pub enum SeedError {
    /// Remote endpoint unreachable or the body could not be read.
    Transport(String),
    /// Non-2xx HTTP status.
    Status(u16),
    /// No `{...}` span found after markup stripping.
    NoJsonSpan,
    /// Span found but not parseable as the seed response shape.
    Parse(serde_json::Error),
    /// Backend answered `success: false`.
    Rejected,
    /// Backend answered success without a `projects` array.
    MissingProjects,
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(detail) => write!(f, "project seed transport failure: {detail}"),
            Self::Status(code) => write!(f, "project seed returned HTTP {code}"),
            Self::NoJsonSpan => write!(f, "project seed body carries no JSON object span"),
            Self::Parse(err) => write!(f, "project seed body is not valid JSON: {err}"),
            Self::Rejected => write!(f, "project seed reported success=false"),
            Self::MissingProjects => write!(f, "project seed response has no projects array"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

/// Remote seed seam: returns the raw response body text.
pub trait ProjectSeedSource {
    fn fetch(&self) -> Result<String, SeedError>;
}

/// One backend seed entry; every identifying field is optional on the wire.
#[derive(Debug, Deserialize)]
struct SeedEntry {
    label: Option<String>,
    name: Option<String>,
    id: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeedResponse {
    success: bool,
    #[serde(default)]
    projects: Option<Vec<SeedEntry>>,
}

/// Extracts the outermost `{...}` span after stripping markup tags.
///
/// Proxying layers are known to prepend HTML warnings or append banners
/// around the JSON body; only the span between the first `{` and the last
/// `}` is trusted.
pub(crate) fn clean_response_text(body: &str) -> Option<String> {
    let stripped = MARKUP_TAG_RE.replace_all(body, "");
    let start = stripped.find('{')?;
    let end = stripped.rfind('}')?;
    if end < start {
        return None;
    }
    Some(stripped[start..=end].trim().to_string())
}

/// Parses a raw seed body into projects, applying per-entry fallbacks.
pub fn parse_seed_projects(body: &str) -> Result<Vec<Project>, SeedError> {
    let span = clean_response_text(body).ok_or(SeedError::NoJsonSpan)?;
    let response: SeedResponse = serde_json::from_str(&span).map_err(SeedError::Parse)?;

    if !response.success {
        return Err(SeedError::Rejected);
    }
    let entries = response.projects.ok_or(SeedError::MissingProjects)?;
    Ok(entries.into_iter().map(project_from_entry).collect())
}

fn project_from_entry(entry: SeedEntry) -> Project {
    let label = entry
        .label
        .or(entry.name)
        .unwrap_or_else(|| format!("项目{}", entry.id.clone().unwrap_or_default()));
    let value = entry
        .value
        .or(entry.id)
        .unwrap_or_else(generated_project_value);
    Project::new(label, value)
}

/// Blocking HTTP seed source for `GET {base}/api/get-project-list`.
pub struct HttpProjectSeed {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpProjectSeed {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            url: format!("{}/api/get-project-list", base_url.trim_end_matches('/')),
        }
    }
}

impl ProjectSeedSource for HttpProjectSeed {
    fn fetch(&self) -> Result<String, SeedError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            // The backend is fronted by an ngrok tunnel whose interstitial
            // page this header bypasses.
            .header("ngrok-skip-browser-warning", "true")
            .send()
            .map_err(|err| SeedError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::Status(status.as_u16()));
        }
        response
            .text()
            .map_err(|err| SeedError::Transport(err.to_string()))
    }
}
