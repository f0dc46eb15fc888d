//! FSH rule types used in code systems

use super::{FshValue, code_token, escape_string};

/// Trait for rules that can be exported to FSH
pub trait ExportableRule: std::fmt::Debug + Send + Sync {
    /// Convert this rule to FSH syntax, without the leading `* `
    fn to_fsh(&self) -> String;

    /// Rules nested below this one, rendered one level deeper
    fn children(&self) -> Vec<&dyn ExportableRule> {
        Vec::new()
    }
}

/// Caret Value Rule: * ^path = value
#[derive(Debug, Clone, PartialEq)]
pub struct CaretValueRule {
    pub caret_path: String,
    pub value: FshValue,
}

impl CaretValueRule {
    pub fn new(caret_path: impl Into<String>, value: FshValue) -> Self {
        Self {
            caret_path: caret_path.into(),
            value,
        }
    }
}

impl ExportableRule for CaretValueRule {
    fn to_fsh(&self) -> String {
        format!("^{} = {}", self.caret_path, self.value.to_fsh())
    }
}

/// Local Code Rule: * #code "display", with an optional nested definition
#[derive(Debug, Clone, PartialEq)]
pub struct LocalCodeRule {
    pub code: String,
    pub display: String,
    pub definition: Option<CaretValueRule>,
}

impl LocalCodeRule {
    pub fn new(code: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display: display.into(),
            definition: None,
        }
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(CaretValueRule::new(
            "definition",
            FshValue::String(definition.into()),
        ));
        self
    }
}

impl ExportableRule for LocalCodeRule {
    fn to_fsh(&self) -> String {
        format!("{} \"{}\"", code_token(&self.code), escape_string(&self.display))
    }

    fn children(&self) -> Vec<&dyn ExportableRule> {
        self.definition
            .iter()
            .map(|rule| rule as &dyn ExportableRule)
            .collect()
    }
}

/// Render a rule and its children as `* ` lines, indenting two spaces per level
pub fn rule_lines(rule: &dyn ExportableRule, depth: usize, lines: &mut Vec<String>) {
    lines.push(format!("{}* {}", "  ".repeat(depth), rule.to_fsh()));
    for child in rule.children() {
        rule_lines(child, depth + 1, lines);
    }
}
