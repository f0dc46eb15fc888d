//! Exportable CodeSystem type

use super::rules::{CaretValueRule, LocalCodeRule, rule_lines};
use super::{Exportable, escape_string};

/// Exportable CodeSystem
///
/// Renders as a header, the metadata caret rules, a blank separator and
/// then one block per local code.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportableCodeSystem {
    pub name: String,
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub metadata: Vec<CaretValueRule>,
    pub codes: Vec<LocalCodeRule>,
}

impl Exportable for ExportableCodeSystem {
    fn to_fsh_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(6 + self.metadata.len() + self.codes.len() * 2);

        lines.push(format!("CodeSystem: {}", self.name));
        lines.push(format!("Id: {}", self.id));

        if let Some(title) = &self.title {
            lines.push(format!("Title: \"{}\"", escape_string(title)));
        }

        if let Some(desc) = self.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("Description: \"{}\"", escape_string(desc)));
        }

        for rule in &self.metadata {
            rule_lines(rule, 0, &mut lines);
        }

        lines.push(String::new());

        for code in &self.codes {
            rule_lines(code, 0, &mut lines);
        }

        lines
    }
}

impl ExportableCodeSystem {
    /// Create a new ExportableCodeSystem
    pub fn new(name: String, id: String) -> Self {
        Self {
            name,
            id,
            title: None,
            description: None,
            metadata: Vec::new(),
            codes: Vec::new(),
        }
    }

    /// Add a metadata caret rule
    pub fn add_metadata(&mut self, rule: CaretValueRule) {
        self.metadata.push(rule);
    }

    /// Add a local code
    pub fn add_code(&mut self, rule: LocalCodeRule) {
        self.codes.push(rule);
    }

    /// Set the title
    pub fn with_title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }
}
