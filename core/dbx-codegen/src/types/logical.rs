//! Logical types: the engine-side type descriptors
//!
//! 엔진 내부 타입 시스템. 연산자/피연산자/반환 타입에 모두 사용됩니다.

use std::fmt;

use super::external::{ExternalClass, PrimitiveKind, classes};

/// Maximum length of a variable-length string/binary (`STRING`, `BYTES`).
pub const MAX_LENGTH: u32 = i32::MAX as u32;

/// Type root without parameters, used for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalTypeRoot {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Double,
    Decimal,
    Char,
    VarChar,
    Binary,
    VarBinary,
    Date,
    TimeWithoutTimeZone,
    TimestampWithoutTimeZone,
    TimestampWithLocalTimeZone,
    Array,
    Map,
    Row,
    Raw,
    Null,
}

/// Named field of a `ROW` type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowField {
    pub name: String,
    pub field_type: LogicalType,
}

impl RowField {
    pub fn new(name: impl Into<String>, field_type: LogicalType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Type kind with its parameters (precision, length, element types).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogicalTypeKind {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Double,
    Decimal { precision: u8, scale: u8 },
    Char(u32),
    VarChar(u32),
    Binary(u32),
    VarBinary(u32),
    Date,
    /// TIME(p)
    Time(u8),
    /// TIMESTAMP(p)
    Timestamp(u8),
    /// TIMESTAMP(p) WITH LOCAL TIME ZONE
    TimestampLtz(u8),
    Array(Box<LogicalType>),
    Map(Box<LogicalType>, Box<LogicalType>),
    Row(Vec<RowField>),
    /// Opaque value of an arbitrary runtime class
    Raw(String),
    Null,
}

/// 논리 타입: nullability + kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalType {
    kind: LogicalTypeKind,
    nullable: bool,
}

impl LogicalType {
    /// Nullable type of the given kind. `NULL` is always nullable.
    pub fn new(kind: LogicalTypeKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }

    pub fn boolean() -> Self {
        Self::new(LogicalTypeKind::Boolean)
    }

    pub fn tinyint() -> Self {
        Self::new(LogicalTypeKind::TinyInt)
    }

    pub fn smallint() -> Self {
        Self::new(LogicalTypeKind::SmallInt)
    }

    pub fn int() -> Self {
        Self::new(LogicalTypeKind::Integer)
    }

    pub fn bigint() -> Self {
        Self::new(LogicalTypeKind::BigInt)
    }

    pub fn float() -> Self {
        Self::new(LogicalTypeKind::Float)
    }

    pub fn double() -> Self {
        Self::new(LogicalTypeKind::Double)
    }

    pub fn decimal(precision: u8, scale: u8) -> Self {
        Self::new(LogicalTypeKind::Decimal { precision, scale })
    }

    pub fn char(length: u32) -> Self {
        Self::new(LogicalTypeKind::Char(length))
    }

    pub fn varchar(length: u32) -> Self {
        Self::new(LogicalTypeKind::VarChar(length))
    }

    /// `STRING` is `VARCHAR` of maximum length.
    pub fn string() -> Self {
        Self::varchar(MAX_LENGTH)
    }

    pub fn binary(length: u32) -> Self {
        Self::new(LogicalTypeKind::Binary(length))
    }

    /// `BYTES` is `VARBINARY` of maximum length.
    pub fn bytes() -> Self {
        Self::new(LogicalTypeKind::VarBinary(MAX_LENGTH))
    }

    pub fn date() -> Self {
        Self::new(LogicalTypeKind::Date)
    }

    pub fn time(precision: u8) -> Self {
        Self::new(LogicalTypeKind::Time(precision))
    }

    pub fn timestamp(precision: u8) -> Self {
        Self::new(LogicalTypeKind::Timestamp(precision))
    }

    pub fn timestamp_ltz(precision: u8) -> Self {
        Self::new(LogicalTypeKind::TimestampLtz(precision))
    }

    pub fn array(element: LogicalType) -> Self {
        Self::new(LogicalTypeKind::Array(Box::new(element)))
    }

    pub fn map(key: LogicalType, value: LogicalType) -> Self {
        Self::new(LogicalTypeKind::Map(Box::new(key), Box::new(value)))
    }

    pub fn row(fields: Vec<RowField>) -> Self {
        Self::new(LogicalTypeKind::Row(fields))
    }

    pub fn raw(class_name: impl Into<String>) -> Self {
        Self::new(LogicalTypeKind::Raw(class_name.into()))
    }

    pub fn null() -> Self {
        Self::new(LogicalTypeKind::Null)
    }

    /// Copy with the given nullability.
    pub fn copy(&self, nullable: bool) -> Self {
        Self {
            kind: self.kind.clone(),
            nullable: nullable || self.kind == LogicalTypeKind::Null,
        }
    }

    /// Copy marked `NOT NULL`.
    pub fn not_null(self) -> Self {
        self.copy(false)
    }

    pub fn kind(&self) -> &LogicalTypeKind {
        &self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn root(&self) -> LogicalTypeRoot {
        match &self.kind {
            LogicalTypeKind::Boolean => LogicalTypeRoot::Boolean,
            LogicalTypeKind::TinyInt => LogicalTypeRoot::TinyInt,
            LogicalTypeKind::SmallInt => LogicalTypeRoot::SmallInt,
            LogicalTypeKind::Integer => LogicalTypeRoot::Integer,
            LogicalTypeKind::BigInt => LogicalTypeRoot::BigInt,
            LogicalTypeKind::Float => LogicalTypeRoot::Float,
            LogicalTypeKind::Double => LogicalTypeRoot::Double,
            LogicalTypeKind::Decimal { .. } => LogicalTypeRoot::Decimal,
            LogicalTypeKind::Char(_) => LogicalTypeRoot::Char,
            LogicalTypeKind::VarChar(_) => LogicalTypeRoot::VarChar,
            LogicalTypeKind::Binary(_) => LogicalTypeRoot::Binary,
            LogicalTypeKind::VarBinary(_) => LogicalTypeRoot::VarBinary,
            LogicalTypeKind::Date => LogicalTypeRoot::Date,
            LogicalTypeKind::Time(_) => LogicalTypeRoot::TimeWithoutTimeZone,
            LogicalTypeKind::Timestamp(_) => LogicalTypeRoot::TimestampWithoutTimeZone,
            LogicalTypeKind::TimestampLtz(_) => LogicalTypeRoot::TimestampWithLocalTimeZone,
            LogicalTypeKind::Array(_) => LogicalTypeRoot::Array,
            LogicalTypeKind::Map(..) => LogicalTypeRoot::Map,
            LogicalTypeKind::Row(_) => LogicalTypeRoot::Row,
            LogicalTypeKind::Raw(_) => LogicalTypeRoot::Raw,
            LogicalTypeKind::Null => LogicalTypeRoot::Null,
        }
    }

    pub fn is_timestamp_ltz(&self) -> bool {
        self.root() == LogicalTypeRoot::TimestampWithLocalTimeZone
    }

    /// Primitive backing the internal representation, if any.
    ///
    /// DATE and TIME are stored as `int` (days / millis of day).
    pub fn internal_primitive(&self) -> Option<PrimitiveKind> {
        match self.kind {
            LogicalTypeKind::Boolean => Some(PrimitiveKind::Boolean),
            LogicalTypeKind::TinyInt => Some(PrimitiveKind::Byte),
            LogicalTypeKind::SmallInt => Some(PrimitiveKind::Short),
            LogicalTypeKind::Integer | LogicalTypeKind::Date | LogicalTypeKind::Time(_) => {
                Some(PrimitiveKind::Int)
            }
            LogicalTypeKind::BigInt => Some(PrimitiveKind::Long),
            LogicalTypeKind::Float => Some(PrimitiveKind::Float),
            LogicalTypeKind::Double => Some(PrimitiveKind::Double),
            _ => None,
        }
    }

    /// Runtime class of the internal (columnar) representation.
    pub fn internal_class(&self) -> ExternalClass {
        if let Some(primitive) = self.internal_primitive() {
            return ExternalClass::Primitive(primitive);
        }
        let name = match self.kind {
            LogicalTypeKind::Decimal { .. } => classes::DECIMAL_DATA,
            LogicalTypeKind::Char(_) | LogicalTypeKind::VarChar(_) => classes::STRING_DATA,
            LogicalTypeKind::Binary(_) | LogicalTypeKind::VarBinary(_) => classes::BYTE_ARRAY,
            LogicalTypeKind::Timestamp(_) | LogicalTypeKind::TimestampLtz(_) => {
                classes::TIMESTAMP_DATA
            }
            LogicalTypeKind::Array(_) => classes::ARRAY_DATA,
            LogicalTypeKind::Map(..) => classes::MAP_DATA,
            LogicalTypeKind::Row(_) => classes::ROW_DATA,
            LogicalTypeKind::Raw(_) => classes::RAW_VALUE_DATA,
            _ => classes::OBJECT,
        };
        ExternalClass::object(name)
    }

    /// Canonical external class (what a UDF gets when it declares nothing else).
    pub fn default_conversion_class(&self) -> ExternalClass {
        if let Some(primitive) = self.internal_primitive() {
            return match self.kind {
                LogicalTypeKind::Date => ExternalClass::object(classes::LOCAL_DATE),
                LogicalTypeKind::Time(_) => ExternalClass::object(classes::LOCAL_TIME),
                _ => ExternalClass::Boxed(primitive),
            };
        }
        match &self.kind {
            LogicalTypeKind::Decimal { .. } => ExternalClass::object(classes::BIG_DECIMAL),
            LogicalTypeKind::Char(_) | LogicalTypeKind::VarChar(_) => {
                ExternalClass::object(classes::STRING)
            }
            LogicalTypeKind::Binary(_) | LogicalTypeKind::VarBinary(_) => {
                ExternalClass::object(classes::BYTE_ARRAY)
            }
            LogicalTypeKind::Timestamp(_) => ExternalClass::object(classes::LOCAL_DATE_TIME),
            LogicalTypeKind::TimestampLtz(_) => ExternalClass::object(classes::INSTANT),
            LogicalTypeKind::Array(element) => ExternalClass::Object(format!(
                "{}[]",
                element.default_conversion_class().type_term()
            )),
            LogicalTypeKind::Map(..) => ExternalClass::object(classes::MAP),
            LogicalTypeKind::Row(_) => ExternalClass::object(classes::ROW),
            LogicalTypeKind::Raw(class_name) => ExternalClass::Object(class_name.clone()),
            _ => ExternalClass::object(classes::OBJECT),
        }
    }

    /// Whether values of this type can be handed out as `class`.
    ///
    /// The same set of classes is accepted in the other direction.
    pub fn supports_output_conversion(&self, class: &ExternalClass) -> bool {
        if *class == self.internal_class() || *class == self.default_conversion_class() {
            return true;
        }
        if let Some(primitive) = self.internal_primitive() {
            if class.primitive_kind() == Some(primitive) {
                return true;
            }
        }
        let name = class.type_term();
        match &self.kind {
            LogicalTypeKind::Char(_) | LogicalTypeKind::VarChar(_) => name == classes::BYTE_ARRAY,
            LogicalTypeKind::Date => name == classes::SQL_DATE,
            LogicalTypeKind::Time(_) => {
                name == classes::SQL_TIME || class.primitive_kind() == Some(PrimitiveKind::Long)
            }
            LogicalTypeKind::Timestamp(_) => name == classes::SQL_TIMESTAMP,
            LogicalTypeKind::TimestampLtz(_) => {
                name == classes::SQL_TIMESTAMP || class.primitive_kind() == Some(PrimitiveKind::Long)
            }
            LogicalTypeKind::Array(element) => {
                name == classes::LIST
                    || class
                        .component_type()
                        .is_some_and(|component| element.supports_output_conversion(&component))
            }
            LogicalTypeKind::Null => !class.is_primitive(),
            _ => false,
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LogicalTypeKind::Boolean => write!(f, "BOOLEAN")?,
            LogicalTypeKind::TinyInt => write!(f, "TINYINT")?,
            LogicalTypeKind::SmallInt => write!(f, "SMALLINT")?,
            LogicalTypeKind::Integer => write!(f, "INT")?,
            LogicalTypeKind::BigInt => write!(f, "BIGINT")?,
            LogicalTypeKind::Float => write!(f, "FLOAT")?,
            LogicalTypeKind::Double => write!(f, "DOUBLE")?,
            LogicalTypeKind::Decimal { precision, scale } => {
                write!(f, "DECIMAL({}, {})", precision, scale)?
            }
            LogicalTypeKind::Char(length) => write!(f, "CHAR({})", length)?,
            LogicalTypeKind::VarChar(MAX_LENGTH) => write!(f, "STRING")?,
            LogicalTypeKind::VarChar(length) => write!(f, "VARCHAR({})", length)?,
            LogicalTypeKind::Binary(length) => write!(f, "BINARY({})", length)?,
            LogicalTypeKind::VarBinary(MAX_LENGTH) => write!(f, "BYTES")?,
            LogicalTypeKind::VarBinary(length) => write!(f, "VARBINARY({})", length)?,
            LogicalTypeKind::Date => write!(f, "DATE")?,
            LogicalTypeKind::Time(precision) => write!(f, "TIME({})", precision)?,
            LogicalTypeKind::Timestamp(precision) => write!(f, "TIMESTAMP({})", precision)?,
            LogicalTypeKind::TimestampLtz(precision) => {
                write!(f, "TIMESTAMP_LTZ({})", precision)?
            }
            LogicalTypeKind::Array(element) => write!(f, "ARRAY<{}>", element)?,
            LogicalTypeKind::Map(key, value) => write!(f, "MAP<{}, {}>", key, value)?,
            LogicalTypeKind::Row(fields) => {
                write!(f, "ROW<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", field.name, field.field_type)?;
                }
                write!(f, ">")?
            }
            LogicalTypeKind::Raw(class_name) => write!(f, "RAW('{}')", class_name)?,
            LogicalTypeKind::Null => return write!(f, "NULL"),
        }
        if !self.nullable {
            write!(f, " NOT NULL")?;
        }
        Ok(())
    }
}
