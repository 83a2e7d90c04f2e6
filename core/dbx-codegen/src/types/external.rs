//! Runtime classes of the generated code
//!
//! UDF eval 메서드 시그니처에 등장하는 클래스 (primitive / boxed / object).

use std::fmt;

/// Well-known class names used by the generated code.
pub mod classes {
    // External representations
    pub const OBJECT: &str = "java.lang.Object";
    pub const STRING: &str = "java.lang.String";
    pub const BIG_DECIMAL: &str = "java.math.BigDecimal";
    pub const BYTE_ARRAY: &str = "byte[]";
    pub const LOCAL_DATE: &str = "java.time.LocalDate";
    pub const LOCAL_TIME: &str = "java.time.LocalTime";
    pub const LOCAL_DATE_TIME: &str = "java.time.LocalDateTime";
    pub const INSTANT: &str = "java.time.Instant";
    pub const SQL_DATE: &str = "java.sql.Date";
    pub const SQL_TIME: &str = "java.sql.Time";
    pub const SQL_TIMESTAMP: &str = "java.sql.Timestamp";
    pub const LIST: &str = "java.util.List";
    pub const MAP: &str = "java.util.Map";
    pub const ROW: &str = "dbx.types.Row";

    // Internal representations
    pub const STRING_DATA: &str = "StringData";
    pub const DECIMAL_DATA: &str = "DecimalData";
    pub const TIMESTAMP_DATA: &str = "TimestampData";
    pub const ARRAY_DATA: &str = "ArrayData";
    pub const MAP_DATA: &str = "MapData";
    pub const ROW_DATA: &str = "RowData";
    pub const RAW_VALUE_DATA: &str = "RawValueData";

    // Runtime helpers
    pub const DATE_TIME_UTILS: &str = "DateTimeUtils";
    pub const DATA_STRUCTURE_CONVERTER: &str = "DataStructureConverter";
}

/// Primitive value kinds. They can never be null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::Char,
    ];

    pub fn type_term(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Char => "char",
        }
    }

    pub fn boxed_type_term(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "java.lang.Boolean",
            PrimitiveKind::Byte => "java.lang.Byte",
            PrimitiveKind::Short => "java.lang.Short",
            PrimitiveKind::Int => "java.lang.Integer",
            PrimitiveKind::Long => "java.lang.Long",
            PrimitiveKind::Float => "java.lang.Float",
            PrimitiveKind::Double => "java.lang.Double",
            PrimitiveKind::Char => "java.lang.Character",
        }
    }

    /// Accessor unwrapping the boxed form, e.g. `intValue()`.
    pub fn unbox_method(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "booleanValue()",
            PrimitiveKind::Byte => "byteValue()",
            PrimitiveKind::Short => "shortValue()",
            PrimitiveKind::Int => "intValue()",
            PrimitiveKind::Long => "longValue()",
            PrimitiveKind::Float => "floatValue()",
            PrimitiveKind::Double => "doubleValue()",
            PrimitiveKind::Char => "charValue()",
        }
    }

    /// Placeholder written into a result variable before a null check.
    pub fn default_value(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "false",
            PrimitiveKind::Byte => "(byte) -1",
            PrimitiveKind::Short => "(short) -1",
            PrimitiveKind::Int => "-1",
            PrimitiveKind::Long => "-1L",
            PrimitiveKind::Float => "-1.0f",
            PrimitiveKind::Double => "-1.0d",
            PrimitiveKind::Char => "'\\0'",
        }
    }
}

/// A runtime class as it appears in an eval method signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExternalClass {
    /// `int`, `long`, ...
    Primitive(PrimitiveKind),
    /// `java.lang.Integer`, `java.lang.Long`, ...
    Boxed(PrimitiveKind),
    /// Any other class, by canonical name (arrays end with `[]`)
    Object(String),
}

impl ExternalClass {
    pub fn object(name: impl Into<String>) -> Self {
        ExternalClass::Object(name.into())
    }

    /// Parse a canonical class name, recognising primitives and their wrappers.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        for kind in PrimitiveKind::ALL {
            if name == kind.type_term() {
                return ExternalClass::Primitive(kind);
            }
            if name == kind.boxed_type_term() {
                return ExternalClass::Boxed(kind);
            }
        }
        ExternalClass::Object(name.to_string())
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, ExternalClass::Primitive(_))
    }

    /// Primitive `long`. The boxed wrapper does not count.
    pub fn is_primitive_long(&self) -> bool {
        *self == ExternalClass::Primitive(PrimitiveKind::Long)
    }

    /// Primitive kind of a primitive or of a boxed wrapper.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            ExternalClass::Primitive(kind) | ExternalClass::Boxed(kind) => Some(*kind),
            ExternalClass::Object(_) => None,
        }
    }

    /// Boxed form of a primitive; other classes are returned as-is.
    pub fn boxed(&self) -> ExternalClass {
        match self {
            ExternalClass::Primitive(kind) => ExternalClass::Boxed(*kind),
            other => other.clone(),
        }
    }

    /// Element class of an array class.
    pub fn component_type(&self) -> Option<ExternalClass> {
        match self {
            ExternalClass::Object(name) => name.strip_suffix("[]").map(ExternalClass::parse),
            _ => None,
        }
    }

    /// Name of the class as written in generated source.
    pub fn type_term(&self) -> &str {
        match self {
            ExternalClass::Primitive(kind) => kind.type_term(),
            ExternalClass::Boxed(kind) => kind.boxed_type_term(),
            ExternalClass::Object(name) => name,
        }
    }
}

impl fmt::Display for ExternalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_term())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_primitives_and_wrappers() {
        assert_eq!(
            ExternalClass::parse("int"),
            ExternalClass::Primitive(PrimitiveKind::Int)
        );
        assert_eq!(
            ExternalClass::parse("java.lang.Long"),
            ExternalClass::Boxed(PrimitiveKind::Long)
        );
        assert_eq!(
            ExternalClass::parse("java.lang.String"),
            ExternalClass::object("java.lang.String")
        );
    }

    #[test]
    fn primitive_long_excludes_boxed() {
        assert!(ExternalClass::Primitive(PrimitiveKind::Long).is_primitive_long());
        assert!(!ExternalClass::Boxed(PrimitiveKind::Long).is_primitive_long());
        assert!(!ExternalClass::Primitive(PrimitiveKind::Int).is_primitive_long());
    }

    #[test]
    fn component_types() {
        assert_eq!(
            ExternalClass::object("int[]").component_type(),
            Some(ExternalClass::Primitive(PrimitiveKind::Int))
        );
        assert_eq!(
            ExternalClass::object("java.lang.String[]").component_type(),
            Some(ExternalClass::object("java.lang.String"))
        );
        assert_eq!(ExternalClass::object("java.lang.String").component_type(), None);
    }

    #[test]
    fn boxing() {
        let int = ExternalClass::Primitive(PrimitiveKind::Int);
        assert_eq!(int.boxed().type_term(), "java.lang.Integer");
        assert_eq!(int.to_string(), "int");
        let string = ExternalClass::object(classes::STRING);
        assert_eq!(string.boxed(), string);
    }
}
