//! Normalization of FAT payloads into [`CodeSystem`]
//!
//! The registry has shipped several JSON shapes over time. Concept lists are
//! located through [`CONCEPT_LIST_RULES`], an ordered table where the first
//! rule whose field holds an array wins and every later field is ignored.

use crate::error::Fat2FshError;
use crate::model::{CodeSystem, Concept};
use crate::result::Result;
use serde_json::{Map, Value};

type Object = Map<String, Value>;

/// One way of locating a concept list in a payload
#[derive(Debug, Clone, Copy)]
pub struct ConceptListRule {
    /// Top-level field holding the list
    pub field: &'static str,
    /// Maps one raw list item to a concept
    pub to_concept: fn(&Value) -> Concept,
}

impl ConceptListRule {
    /// Apply this rule, returning `None` when the field is absent or not an array
    pub fn extract(&self, document: &Object) -> Option<Vec<Concept>> {
        document
            .get(self.field)
            .and_then(Value::as_array)
            .map(|items| items.iter().map(self.to_concept).collect())
    }
}

/// Concept list shapes in priority order
pub const CONCEPT_LIST_RULES: &[ConceptListRule] = &[
    ConceptListRule {
        field: "codeValues",
        to_concept: code_value_concept,
    },
    ConceptListRule {
        field: "codes",
        to_concept: code_concept,
    },
    ConceptListRule {
        field: "concepts",
        to_concept: code_concept,
    },
];

/// `codeValues` items: `value`/`id`, `name`, `description`
fn code_value_concept(item: &Value) -> Concept {
    Concept {
        code: first_string(item, &["value", "id"]).unwrap_or_default(),
        display: first_string(item, &["name"]).unwrap_or_default(),
        definition: first_string(item, &["description"]),
    }
}

/// `codes` and `concepts` items: `code`, `display`/`name`, `definition`/`description`
fn code_concept(item: &Value) -> Concept {
    Concept {
        code: first_string(item, &["code"]).unwrap_or_default(),
        display: first_string(item, &["display", "name"]).unwrap_or_default(),
        definition: first_string(item, &["definition", "description"]),
    }
}

/// Scalar field as a string; numbers are stringified, anything else is missing
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First of `keys` present on `item` with a usable scalar value
fn first_string(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| item.get(*key).and_then(scalar_string))
}

/// Locate the concept list using [`CONCEPT_LIST_RULES`]
pub fn extract_concepts(document: &Object) -> Vec<Concept> {
    CONCEPT_LIST_RULES
        .iter()
        .find_map(|rule| {
            let concepts = rule.extract(document)?;
            tracing::debug!(
                "Resolved {} concepts from '{}'",
                concepts.len(),
                rule.field
            );
            Some(concepts)
        })
        .unwrap_or_default()
}

/// Build a [`CodeSystem`] from a decoded registry response
///
/// `null`, non-object and empty-object documents are decode errors rather
/// than empty code systems.
pub fn normalize(identifier: &str, document: &Value) -> Result<CodeSystem> {
    let object = match document {
        Value::Object(object) if !object.is_empty() => object,
        Value::Object(_) => {
            return Err(Fat2FshError::decode(identifier, "empty JSON document"));
        }
        Value::Null => return Err(Fat2FshError::decode(identifier, "null JSON document")),
        _ => {
            return Err(Fat2FshError::decode(
                identifier,
                "expected a JSON object at the top level",
            ));
        }
    };

    let mut code_system = CodeSystem::new(identifier);

    if let Some(name) = first_string(document, &["name"]) {
        code_system.name = name;
    }
    code_system.title =
        first_string(document, &["title"]).unwrap_or_else(|| code_system.name.clone());
    code_system.description = first_string(document, &["description"]);
    if let Some(version) = first_string(document, &["version"]) {
        code_system.version = version;
    }
    code_system.status = first_string(document, &["status"]);
    code_system.status_last_changed = first_string(document, &["statusLastChanged"]);
    code_system.owner = object
        .get("owner")
        .and_then(|owner| owner.get("name"))
        .and_then(scalar_string);
    code_system.valid_from = first_string(document, &["validFrom"]);
    code_system.active = object.get("active").and_then(Value::as_bool);
    code_system.concepts = extract_concepts(object);

    Ok(code_system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_codes_shape() {
        let doc = json!({
            "name": "X",
            "title": "X Title",
            "codes": [
                {"code": "A", "display": "Alpha", "definition": "First letter"},
                {"code": "", "display": "Beta"}
            ]
        });

        let cs = normalize("sys1", &doc).unwrap();
        assert_eq!(cs.id, "sys1");
        assert_eq!(cs.name, "X");
        assert_eq!(cs.title, "X Title");
        assert_eq!(cs.version, "1.0.0");
        assert_eq!(cs.concepts.len(), 2);
        assert_eq!(cs.concepts[0].definition.as_deref(), Some("First letter"));
        assert_eq!(cs.concepts[1].code, "");
        assert_eq!(cs.concepts[1].definition, None);
    }

    #[test]
    fn test_code_values_shape() {
        let doc = json!({
            "name": "Kjønn",
            "codeValues": [
                {"value": "1", "name": "Mann", "description": "Mannlig kjønn"},
                {"id": 2, "name": "Kvinne"},
                {"name": "Uten kode"}
            ]
        });

        let cs = normalize("3101", &doc).unwrap();
        assert_eq!(cs.concepts[0].code, "1");
        assert_eq!(cs.concepts[0].display, "Mann");
        assert_eq!(cs.concepts[0].definition.as_deref(), Some("Mannlig kjønn"));
        assert_eq!(cs.concepts[1].code, "2");
        assert_eq!(cs.concepts[2].code, "");
    }

    #[test]
    fn test_concepts_shape_uses_fallback_fields() {
        let doc = json!({
            "name": "X",
            "concepts": [{"code": "A", "name": "Alpha", "description": "From description"}]
        });

        let cs = normalize("sys1", &doc).unwrap();
        assert_eq!(cs.concepts[0].display, "Alpha");
        assert_eq!(cs.concepts[0].definition.as_deref(), Some("From description"));
    }

    #[test]
    fn test_code_values_take_priority_over_codes() {
        let doc = json!({
            "name": "X",
            "codes": [{"code": "FROM-CODES", "display": "Codes"}],
            "codeValues": [{"value": "FROM-CODE-VALUES", "name": "Code values"}],
            "concepts": [{"code": "FROM-CONCEPTS", "display": "Concepts"}]
        });

        let cs = normalize("sys1", &doc).unwrap();
        assert_eq!(cs.concepts.len(), 1);
        assert_eq!(cs.concepts[0].code, "FROM-CODE-VALUES");
    }

    #[test]
    fn test_codes_take_priority_over_concepts() {
        let doc = json!({
            "concepts": [{"code": "FROM-CONCEPTS", "display": "Concepts"}],
            "codes": []
        });

        let cs = normalize("sys1", &doc).unwrap();
        assert!(cs.concepts.is_empty());
    }

    #[test]
    fn test_non_array_field_does_not_match() {
        let doc = json!({
            "codeValues": null,
            "codes": [{"code": "A", "display": "Alpha"}]
        });

        let cs = normalize("sys1", &doc).unwrap();
        assert_eq!(cs.concepts.len(), 1);
        assert_eq!(cs.concepts[0].code, "A");
    }

    #[test]
    fn test_no_concept_field_is_empty_list() {
        let cs = normalize("sys1", &json!({"name": "X"})).unwrap();
        assert!(cs.concepts.is_empty());
    }

    #[test]
    fn test_title_and_name_fallback_chain() {
        let cs = normalize("sys1", &json!({"name": "Only name"})).unwrap();
        assert_eq!(cs.title, "Only name");

        let cs = normalize("sys1", &json!({"version": "2.1"})).unwrap();
        assert_eq!(cs.name, "sys1");
        assert_eq!(cs.title, "sys1");
        assert_eq!(cs.version, "2.1");
    }

    #[test]
    fn test_extended_metadata() {
        let doc = json!({
            "name": "X",
            "status": "Aktiv",
            "statusLastChanged": "2023-05-17T08:30:00",
            "owner": {"name": "Helsedirektoratet", "id": 9},
            "validFrom": "2020-01-01",
            "active": true
        });

        let cs = normalize("sys1", &doc).unwrap();
        assert_eq!(cs.status.as_deref(), Some("Aktiv"));
        assert_eq!(cs.owner.as_deref(), Some("Helsedirektoratet"));
        assert_eq!(cs.valid_from.as_deref(), Some("2020-01-01"));
        assert_eq!(cs.active, Some(true));
    }

    #[test]
    fn test_owner_without_name_is_unset() {
        let cs = normalize("sys1", &json!({"owner": {"id": 1}})).unwrap();
        assert_eq!(cs.owner, None);

        let cs = normalize("sys1", &json!({"owner": "Helsedirektoratet"})).unwrap();
        assert_eq!(cs.owner, None);
    }

    #[test]
    fn test_non_object_items_yield_empty_concepts() {
        let cs = normalize("sys1", &json!({"codes": ["A", 3, null]})).unwrap();
        assert_eq!(cs.concepts.len(), 3);
        assert!(cs.concepts.iter().all(|c| !c.is_emittable()));
    }

    #[test]
    fn test_empty_and_null_documents_are_decode_errors() {
        for doc in [json!({}), Value::Null, json!([]), json!("text")] {
            let err = normalize("sys1", &doc).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Decode);
        }
    }

    #[test]
    fn test_concept_order_is_preserved() {
        let doc = json!({
            "codes": [
                {"code": "C", "display": "Gamma"},
                {"code": "A", "display": "Alpha"},
                {"code": "B", "display": "Beta"}
            ]
        });

        let cs = normalize("sys1", &doc).unwrap();
        let codes: Vec<&str> = cs.concepts.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["C", "A", "B"]);
    }
}
