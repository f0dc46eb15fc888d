//! Normalized code system model
//!
//! Every FAT payload shape is reduced to these two types before rendering.
//! They are also the raw-data artifact written next to each FSH file.

use serde::{Deserialize, Serialize};

/// Version assumed when the registry does not report one
pub const DEFAULT_VERSION: &str = "1.0.0";

/// One entry in a code system's enumeration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Concept {
    pub code: String,
    pub display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

impl Concept {
    /// A concept is emitted only when both code and display are non-empty
    pub fn is_emittable(&self) -> bool {
        !self.code.is_empty() && !self.display.is_empty()
    }

    /// Definition text, if it has any non-whitespace content
    pub fn meaningful_definition(&self) -> Option<&str> {
        self.definition
            .as_deref()
            .filter(|definition| !definition.trim().is_empty())
    }
}

/// A code list fetched from the FAT registry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSystem {
    pub id: String,
    pub name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_last_changed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default)]
    pub concepts: Vec<Concept>,
}

impl CodeSystem {
    /// Create a code system with only the identifier known
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            title: id.clone(),
            id,
            description: None,
            version: DEFAULT_VERSION.to_string(),
            status: None,
            status_last_changed: None,
            owner: None,
            valid_from: None,
            active: None,
            concepts: Vec::new(),
        }
    }

    /// Date part of `statusLastChanged` (everything before the first `T`),
    /// unset when that part is empty
    pub fn last_changed_date(&self) -> Option<&str> {
        self.status_last_changed
            .as_deref()
            .and_then(|changed| changed.split('T').next())
            .filter(|date| !date.is_empty())
    }

    /// Number of concepts that will appear in the rendered notation
    pub fn emittable_count(&self) -> usize {
        self.concepts.iter().filter(|c| c.is_emittable()).count()
    }
}
