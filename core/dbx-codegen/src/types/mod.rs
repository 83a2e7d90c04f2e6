//! Type system bridge
//!
//! - [`LogicalType`]: engine-internal type descriptors
//! - [`ExternalClass`]: runtime classes of UDF signatures
//! - [`DataType`]: logical type bridged to a conversion class
//! - [`ScalarValue`] / [`ExternalValue`]: literal values on both sides

pub mod arrow_bridge;
pub mod data_type;
pub mod external;
pub mod logical;
pub mod value;

pub use data_type::DataType;
pub use external::{ExternalClass, PrimitiveKind, classes};
pub use logical::{LogicalType, LogicalTypeKind, LogicalTypeRoot, MAX_LENGTH, RowField};
pub use value::{ExternalValue, ScalarValue};

/// Type term of a variable holding the internal representation.
///
/// Primitive-backed types use the primitive (`int`, `long`, ...).
pub fn primitive_type_term(logical_type: &LogicalType) -> String {
    logical_type.internal_class().type_term().to_string()
}

/// Type term of a nullable variable holding the internal representation.
///
/// Primitive-backed types use the wrapper (`java.lang.Integer`, ...).
pub fn boxed_type_term(logical_type: &LogicalType) -> String {
    logical_type.internal_class().boxed().type_term().to_string()
}

/// Placeholder value of a result variable before its null check.
pub fn primitive_default_value(logical_type: &LogicalType) -> &'static str {
    match logical_type.internal_primitive() {
        Some(primitive) => primitive.default_value(),
        None => "null",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_terms() {
        assert_eq!(primitive_type_term(&LogicalType::int()), "int");
        assert_eq!(boxed_type_term(&LogicalType::int()), "java.lang.Integer");
        assert_eq!(primitive_type_term(&LogicalType::string()), "StringData");
        assert_eq!(boxed_type_term(&LogicalType::string()), "StringData");
        assert_eq!(boxed_type_term(&LogicalType::date()), "java.lang.Integer");
    }

    #[test]
    fn default_values() {
        assert_eq!(primitive_default_value(&LogicalType::bigint()), "-1L");
        assert_eq!(primitive_default_value(&LogicalType::boolean()), "false");
        assert_eq!(primitive_default_value(&LogicalType::string()), "null");
    }
}
