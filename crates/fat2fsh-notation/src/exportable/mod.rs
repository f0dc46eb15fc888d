//! Exportable types for FSH output generation
//!
//! This module contains types that represent FSH constructs in memory.
//! Each Exportable knows how to convert itself to FSH text via `to_fsh()`.

pub mod code_system;
pub mod rules;

pub use code_system::*;
pub use rules::*;

/// Core trait for types that can be exported to FSH
pub trait Exportable: Send + Sync {
    /// FSH text as individual lines, without trailing newlines
    fn to_fsh_lines(&self) -> Vec<String>;

    /// Convert this exportable to FSH text
    fn to_fsh(&self) -> String {
        self.to_fsh_lines().join("\n")
    }
}

/// FSH value types that can appear in caret rules
#[derive(Debug, Clone, PartialEq)]
pub enum FshValue {
    String(String),
    Boolean(bool),
    Code(String),
}

impl FshValue {
    /// Convert the value to FSH syntax
    pub fn to_fsh(&self) -> String {
        match self {
            FshValue::String(s) => format!("\"{}\"", escape_string(s)),
            FshValue::Boolean(b) => b.to_string(),
            FshValue::Code(code) => code_token(code),
        }
    }

    pub fn string(s: impl Into<String>) -> Self {
        FshValue::String(s.into())
    }

    pub fn boolean(b: bool) -> Self {
        FshValue::Boolean(b)
    }

    pub fn code(code: impl Into<String>) -> Self {
        FshValue::Code(code.into())
    }
}

/// `#code`, or `#"code"` when the code would otherwise end early or break the line
pub fn code_token(code: &str) -> String {
    if code.chars().any(|c| c.is_whitespace() || c == '"' || c == '\\') {
        format!("#\"{}\"", escape_string(code))
    } else {
        format!("#{}", code)
    }
}

/// Escape special characters in FSH strings
pub fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fsh_value_string() {
        assert_eq!(FshValue::string("hello").to_fsh(), "\"hello\"");
        assert_eq!(
            FshValue::string("with \"quotes\"").to_fsh(),
            "\"with \\\"quotes\\\"\""
        );
    }

    #[test]
    fn test_fsh_code_and_boolean() {
        assert_eq!(FshValue::code("active").to_fsh(), "#active");
        assert_eq!(FshValue::boolean(false).to_fsh(), "false");
        assert_eq!(FshValue::boolean(true).to_fsh(), "true");
    }

    #[test]
    fn test_code_token_quotes_when_needed() {
        assert_eq!(code_token("7010"), "#7010");
        assert_eq!(code_token("A.1-b"), "#A.1-b");
        assert_eq!(code_token("A B"), "#\"A B\"");
        assert_eq!(code_token("Q\""), "#\"Q\\\"\"");
        assert_eq!(code_token("a\\b"), "#\"a\\\\b\"");
        assert_eq!(code_token("tab\there"), "#\"tab\\there\"");
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("hello"), "hello");
        assert_eq!(escape_string("hello \"world\""), "hello \\\"world\\\"");
        assert_eq!(escape_string("line1\nline2"), "line1\\nline2");
        assert_eq!(escape_string("back\\slash"), "back\\\\slash");
        assert_eq!(escape_string("tab\there"), "tab\\there");
    }
}
