//! Configuration schema
//!
//! Every section and field has a default, so an empty file (or no file at
//! all) yields a working configuration.

use crate::error::Fat2FshError;
use crate::result::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Production FAT API
pub const DEFAULT_BASE_URL: &str = "https://fat.kote.helsedirektoratet.no";

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Fat2FshConfig {
    pub api: RegistryConfig,
    pub notation: NotationTemplate,
    pub output: OutputConfig,
}

/// Transport settings for the registry client
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Base URL; the code list path is appended to it
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Ask the registry to include inactive codes
    pub include_inactive: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("fat2fsh/{}", crate::VERSION),
            timeout_secs: 30,
            include_inactive: false,
        }
    }
}

/// Naming and URL templates for generated CodeSystems
///
/// `{id}` is replaced by the code system identifier in every template, and
/// `{title}` by the normalized title in `title`. An empty `canonical_url` or
/// `oid` leaves the corresponding lines out.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotationTemplate {
    /// `CodeSystem:` name
    pub name: String,
    /// `Id:` value
    pub id: String,
    /// `Title:` value
    pub title: String,
    pub canonical_url: String,
    pub oid: String,
    /// Emit definitions trimmed of surrounding whitespace
    pub trim_definitions: bool,
    /// Also emit `^version`, `^experimental` and `^caseSensitive`
    pub baseline_metadata: bool,
}

impl Default for NotationTemplate {
    fn default() -> Self {
        Self {
            name: "FAT{id}".to_string(),
            id: "fat-{id}.codesystem".to_string(),
            title: "{id} {title}".to_string(),
            canonical_url: "http://helsedirektoratet.no/fhir/CodeSystem/fat-{id}".to_string(),
            oid: "urn:oid:2.16.578.1.12.4.1.1.{id}".to_string(),
            trim_definitions: true,
            baseline_metadata: false,
        }
    }
}

impl NotationTemplate {
    /// Bare header keyed on the identifier, with version and case metadata
    /// and no canonical URL or OID
    pub fn baseline() -> Self {
        Self {
            name: "{id}".to_string(),
            id: "{id}".to_string(),
            title: "{title}".to_string(),
            canonical_url: String::new(),
            oid: String::new(),
            trim_definitions: false,
            baseline_metadata: true,
        }
    }

    pub fn name_for(&self, id: &str) -> String {
        self.name.replace("{id}", id)
    }

    pub fn id_for(&self, id: &str) -> String {
        self.id.replace("{id}", id)
    }

    pub fn title_for(&self, id: &str, title: &str) -> String {
        self.title.replace("{id}", id).replace("{title}", title)
    }

    pub fn canonical_url_for(&self, id: &str) -> Option<String> {
        expand(&self.canonical_url, id)
    }

    pub fn oid_for(&self, id: &str) -> Option<String> {
        expand(&self.oid, id)
    }
}

fn expand(template: &str, id: &str) -> Option<String> {
    (!template.is_empty()).then(|| template.replace("{id}", id))
}

/// Output directory layout, relative to the chosen output directory
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputConfig {
    /// Directory for normalized JSON
    pub raw_dir: String,
    /// Directory for generated FSH
    pub fsh_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            raw_dir: "fat".to_string(),
            fsh_dir: "fsh".to_string(),
        }
    }
}

impl Fat2FshConfig {
    /// Load configuration from a file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Fat2FshError::io_error(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str());

        let parsed: std::result::Result<Self, String> = match ext {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| e.to_string())
            }
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
            _ => Err(
                "Unsupported file extension (expected .yaml, .yml, .json, or .toml)".to_string(),
            ),
        };

        parsed.map_err(|message| {
            Fat2FshError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                message
            ))
        })
    }
}
