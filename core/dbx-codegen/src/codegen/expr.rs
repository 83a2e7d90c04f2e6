//! Generated expressions
//!
//! 아직 계산되지 않은 값: 실행할 코드 + 결과/NULL 여부를 가리키는 항(term).

use crate::types::{LogicalType, ScalarValue};

/// Null term of a value that can never be null.
pub const NEVER_NULL: &str = "false";
/// Null term of a value that is always null.
pub const ALWAYS_NULL: &str = "true";

/// A value materialised by generated code.
///
/// `result_term` and `null_term` are valid expressions once `code` has run.
/// Instances are never mutated; the `with_*` helpers return copies.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedExpression {
    code: String,
    result_term: String,
    null_term: String,
    result_type: LogicalType,
    literal: bool,
    literal_value: Option<ScalarValue>,
}

impl GeneratedExpression {
    pub fn new(
        result_term: impl Into<String>,
        null_term: impl Into<String>,
        code: impl Into<String>,
        result_type: LogicalType,
    ) -> Self {
        Self {
            code: code.into(),
            result_term: result_term.into(),
            null_term: null_term.into(),
            result_type,
            literal: false,
            literal_value: None,
        }
    }

    /// Compile-time constant. `None` (or `ScalarValue::Null`) is the null literal.
    pub fn literal(
        result_term: impl Into<String>,
        result_type: LogicalType,
        value: Option<ScalarValue>,
    ) -> Self {
        let value = value.filter(|v| !v.is_null());
        let null_term = if value.is_some() {
            NEVER_NULL
        } else {
            ALWAYS_NULL
        };
        Self {
            code: String::new(),
            result_term: result_term.into(),
            null_term: null_term.to_string(),
            result_type,
            literal: true,
            literal_value: value,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn result_term(&self) -> &str {
        &self.result_term
    }

    pub fn null_term(&self) -> &str {
        &self.null_term
    }

    pub fn result_type(&self) -> &LogicalType {
        &self.result_type
    }

    pub fn is_literal(&self) -> bool {
        self.literal
    }

    /// `None` for non-literals and for the null literal.
    pub fn literal_value(&self) -> Option<&ScalarValue> {
        self.literal_value.as_ref()
    }

    /// Statically known to be non-null.
    pub fn is_never_null(&self) -> bool {
        self.null_term == NEVER_NULL
    }

    pub fn with_result_term(&self, result_term: impl Into<String>) -> Self {
        Self {
            result_term: result_term.into(),
            ..self.clone()
        }
    }

    pub fn with_code(&self, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..self.clone()
        }
    }
}

/// Join code fragments in execution order, skipping empty ones.
pub fn concat_code<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    fragments
        .into_iter()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_null_terms() {
        let five = GeneratedExpression::literal(
            "5",
            LogicalType::int().not_null(),
            Some(ScalarValue::Int32(5)),
        );
        assert!(five.is_literal());
        assert!(five.is_never_null());
        assert_eq!(five.literal_value(), Some(&ScalarValue::Int32(5)));

        let null = GeneratedExpression::literal("null", LogicalType::int(), Some(ScalarValue::Null));
        assert_eq!(null.null_term(), ALWAYS_NULL);
        assert_eq!(null.literal_value(), None);
    }

    #[test]
    fn with_result_term_copies() {
        let expr = GeneratedExpression::new("field$1", "isNull$1", "int field$1 = 1;", LogicalType::int());
        let copy = expr.with_result_term("field$1 + 1");
        assert_eq!(copy.result_term(), "field$1 + 1");
        assert_eq!(copy.code(), expr.code());
        assert_eq!(copy.null_term(), expr.null_term());
        assert_eq!(expr.result_term(), "field$1");
    }

    #[test]
    fn concat_skips_empty() {
        assert_eq!(concat_code(["a;", "", "  ", "b;\n"]), "a;\nb;");
    }
}
