//! CodeSystem to FSH generation
//!
//! [`NotationGenerator`] is the single renderer for every code list. All
//! naming and URL choices come from its [`NotationTemplate`]; rendering is
//! pure and never fails. Concepts missing a code or display are dropped.

use crate::exportable::{
    CaretValueRule, Exportable, ExportableCodeSystem, FshValue, LocalCodeRule,
};
use fat2fsh_core::{CodeSystem, Concept, NotationTemplate};

/// Identifier system for OID values
pub const OID_IDENTIFIER_SYSTEM: &str = "urn:ietf:rfc:3986";

/// Builds FSH CodeSystems from normalized code lists
#[derive(Debug, Clone, Default)]
pub struct NotationGenerator {
    template: NotationTemplate,
}

impl NotationGenerator {
    pub fn new(template: NotationTemplate) -> Self {
        Self { template }
    }

    /// Build the exportable representation of a code system
    pub fn build(&self, code_system: &CodeSystem) -> ExportableCodeSystem {
        let template = &self.template;
        let id = code_system.id.as_str();
        let mut exportable = ExportableCodeSystem::new(template.name_for(id), template.id_for(id))
            .with_title(template.title_for(id, &code_system.title));

        if let Some(description) = code_system.description.as_deref().filter(|d| !d.is_empty()) {
            exportable = exportable.with_description(description.to_string());
        }

        if let Some(url) = template.canonical_url_for(id) {
            exportable.add_metadata(CaretValueRule::new("url", FshValue::string(url)));
        }

        if let Some(oid) = template.oid_for(id) {
            exportable.add_metadata(CaretValueRule::new(
                "identifier[0].system",
                FshValue::string(OID_IDENTIFIER_SYSTEM),
            ));
            exportable.add_metadata(CaretValueRule::new(
                "identifier[0].value",
                FshValue::string(oid),
            ));
        }

        if template.baseline_metadata {
            exportable.add_metadata(CaretValueRule::new(
                "version",
                FshValue::string(code_system.version.as_str()),
            ));
        }

        exportable.add_metadata(CaretValueRule::new("status", FshValue::code("active")));

        if template.baseline_metadata {
            exportable.add_metadata(CaretValueRule::new("experimental", FshValue::boolean(false)));
            exportable.add_metadata(CaretValueRule::new("caseSensitive", FshValue::boolean(true)));
        }

        if let Some(date) = code_system.last_changed_date() {
            exportable.add_metadata(CaretValueRule::new("date", FshValue::string(date)));
        }

        if let Some(owner) = code_system.owner.as_deref().filter(|o| !o.is_empty()) {
            exportable.add_metadata(CaretValueRule::new("publisher", FshValue::string(owner)));
        }

        exportable.add_metadata(CaretValueRule::new("content", FshValue::code("complete")));

        for concept in &code_system.concepts {
            if let Some(rule) = self.concept_rule(concept) {
                exportable.add_code(rule);
            }
        }

        let skipped = code_system.concepts.len() - exportable.codes.len();
        if skipped > 0 {
            tracing::debug!(
                "Skipped {} concepts without code or display in {}",
                skipped,
                id
            );
        }

        exportable
    }

    /// Render a code system as FSH lines
    pub fn render(&self, code_system: &CodeSystem) -> Vec<String> {
        self.build(code_system).to_fsh_lines()
    }

    fn concept_rule(&self, concept: &Concept) -> Option<LocalCodeRule> {
        if !concept.is_emittable() {
            return None;
        }

        let rule = LocalCodeRule::new(concept.code.as_str(), concept.display.as_str());
        Some(match concept.meaningful_definition() {
            Some(definition) if self.template.trim_definitions => {
                rule.with_definition(definition.trim())
            }
            Some(definition) => rule.with_definition(definition),
            None => rule,
        })
    }
}
