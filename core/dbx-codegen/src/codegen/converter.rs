//! Internal ↔ external conversion terms
//!
//! 내부 표현(컬럼형)과 UDF가 기대하는 외부 표현 사이의 변환 식을 생성합니다.
//! 구조형 타입(ARRAY/MAP/ROW/RAW)은 재사용 converter 필드를 거칩니다.

use super::context::CodegenContext;
use crate::error::{CodegenError, CodegenResult};
use crate::types::{
    DataType, ExternalClass, ExternalValue, LogicalType, LogicalTypeKind, PrimitiveKind,
    ScalarValue, classes,
};

/// Accessor yielding epoch milliseconds of a `TimestampData`.
pub const MILLISECOND_ACCESSOR: &str = "getMillisecond()";
/// Factory building a `TimestampData` from epoch milliseconds.
pub const FROM_EPOCH_MILLIS: &str = "TimestampData.fromEpochMillis";

/// Conversion library used by the call generators.
pub trait TypeConverter: Send + Sync {
    /// Expression turning internal `term` into `data_type`'s conversion class.
    fn internal_to_external(
        &self,
        ctx: &mut dyn CodegenContext,
        data_type: &DataType,
        term: &str,
    ) -> CodegenResult<String>;

    /// Expression turning external `term` (of `data_type`'s conversion class)
    /// into the internal representation.
    fn external_to_internal(
        &self,
        ctx: &mut dyn CodegenContext,
        data_type: &DataType,
        term: &str,
    ) -> CodegenResult<String>;

    /// Fold an internal literal into the canonical external value of `logical_type`.
    fn literal_to_external(
        &self,
        value: &ScalarValue,
        logical_type: &LogicalType,
    ) -> CodegenResult<ExternalValue>;

    /// Whether `logical_type` can be handed out as exactly `class`.
    fn supports_output_conversion(&self, logical_type: &LogicalType, class: &ExternalClass) -> bool {
        logical_type.supports_output_conversion(class)
    }
}

/// Built-in conversions for the engine's runtime classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTypeConverter;

impl StandardTypeConverter {
    pub fn new() -> Self {
        Self
    }

    fn unsupported(data_type: &DataType) -> CodegenError {
        CodegenError::conversion(
            data_type,
            format!(
                "{} cannot be converted to {}",
                data_type.logical_type(),
                data_type.conversion_class()
            ),
        )
    }

    fn check_supported(&self, data_type: &DataType) -> CodegenResult<()> {
        if self.supports_output_conversion(data_type.logical_type(), data_type.conversion_class()) {
            Ok(())
        } else {
            Err(Self::unsupported(data_type))
        }
    }

    /// Internal and external value share a primitive (boxing is implicit).
    fn is_identity(data_type: &DataType) -> bool {
        data_type.is_internal()
            || match (
                data_type.logical_type().internal_primitive(),
                data_type.conversion_class().primitive_kind(),
            ) {
                (Some(internal), Some(external)) => internal == external,
                _ => false,
            }
    }

    fn is_structured(logical_type: &LogicalType) -> bool {
        matches!(
            logical_type.kind(),
            LogicalTypeKind::Array(_)
                | LogicalTypeKind::Map(..)
                | LogicalTypeKind::Row(_)
                | LogicalTypeKind::Raw(_)
                | LogicalTypeKind::Null
        )
    }
}

impl TypeConverter for StandardTypeConverter {
    fn internal_to_external(
        &self,
        ctx: &mut dyn CodegenContext,
        data_type: &DataType,
        term: &str,
    ) -> CodegenResult<String> {
        self.check_supported(data_type)?;
        if Self::is_identity(data_type) {
            return Ok(term.to_string());
        }

        let logical = data_type.logical_type();
        let class = data_type.conversion_class();
        if Self::is_structured(logical) {
            let converter = ctx.add_reusable_converter(data_type);
            return Ok(format!("(({}) {}.toExternal({}))", class, converter, term));
        }

        let name = class.type_term();
        let kind = class.primitive_kind();
        let converted = match logical.kind() {
            LogicalTypeKind::Char(_) | LogicalTypeKind::VarChar(_) => match name {
                classes::STRING => format!("{}.toString()", term),
                classes::BYTE_ARRAY => format!("{}.toBytes()", term),
                _ => return Err(Self::unsupported(data_type)),
            },
            LogicalTypeKind::Decimal { .. } => format!("{}.toBigDecimal()", term),
            LogicalTypeKind::Date => match name {
                classes::LOCAL_DATE => format!("{}.toLocalDate({})", classes::DATE_TIME_UTILS, term),
                classes::SQL_DATE => format!("{}.toSQLDate({})", classes::DATE_TIME_UTILS, term),
                _ => return Err(Self::unsupported(data_type)),
            },
            LogicalTypeKind::Time(_) => match (name, kind) {
                (classes::LOCAL_TIME, _) => {
                    format!("{}.toLocalTime({})", classes::DATE_TIME_UTILS, term)
                }
                (classes::SQL_TIME, _) => format!("{}.toSQLTime({})", classes::DATE_TIME_UTILS, term),
                (_, Some(PrimitiveKind::Long)) => format!("((long) {})", term),
                _ => return Err(Self::unsupported(data_type)),
            },
            LogicalTypeKind::Timestamp(_) => match name {
                classes::LOCAL_DATE_TIME => format!("{}.toLocalDateTime()", term),
                classes::SQL_TIMESTAMP => format!("{}.toTimestamp()", term),
                _ => return Err(Self::unsupported(data_type)),
            },
            LogicalTypeKind::TimestampLtz(_) => match (name, kind) {
                (classes::INSTANT, _) => format!("{}.toInstant()", term),
                (classes::SQL_TIMESTAMP, _) => {
                    format!("java.sql.Timestamp.from({}.toInstant())", term)
                }
                (_, Some(PrimitiveKind::Long)) => format!("{}.{}", term, MILLISECOND_ACCESSOR),
                _ => return Err(Self::unsupported(data_type)),
            },
            _ => return Err(Self::unsupported(data_type)),
        };
        Ok(converted)
    }

    fn external_to_internal(
        &self,
        ctx: &mut dyn CodegenContext,
        data_type: &DataType,
        term: &str,
    ) -> CodegenResult<String> {
        self.check_supported(data_type)?;
        if Self::is_identity(data_type) {
            return Ok(term.to_string());
        }

        let logical = data_type.logical_type();
        let class = data_type.conversion_class();
        if Self::is_structured(logical) {
            let converter = ctx.add_reusable_converter(data_type);
            return Ok(format!(
                "(({}) {}.toInternal({}))",
                logical.internal_class(),
                converter,
                term
            ));
        }

        let name = class.type_term();
        let kind = class.primitive_kind();
        let converted = match logical.kind() {
            LogicalTypeKind::Char(_) | LogicalTypeKind::VarChar(_) => match name {
                classes::STRING => format!("{}.fromString({})", classes::STRING_DATA, term),
                classes::BYTE_ARRAY => format!("{}.fromBytes({})", classes::STRING_DATA, term),
                _ => return Err(Self::unsupported(data_type)),
            },
            LogicalTypeKind::Decimal { precision, scale } => format!(
                "{}.fromBigDecimal({}, {}, {})",
                classes::DECIMAL_DATA,
                term,
                precision,
                scale
            ),
            LogicalTypeKind::Date | LogicalTypeKind::Time(_) if kind.is_none() => {
                format!("{}.toInternal({})", classes::DATE_TIME_UTILS, term)
            }
            LogicalTypeKind::Time(_) if kind == Some(PrimitiveKind::Long) => {
                format!("((int) {})", term)
            }
            LogicalTypeKind::Timestamp(_) => match name {
                classes::LOCAL_DATE_TIME => {
                    format!("{}.fromLocalDateTime({})", classes::TIMESTAMP_DATA, term)
                }
                classes::SQL_TIMESTAMP => {
                    format!("{}.fromTimestamp({})", classes::TIMESTAMP_DATA, term)
                }
                _ => return Err(Self::unsupported(data_type)),
            },
            LogicalTypeKind::TimestampLtz(_) => match (name, kind) {
                (classes::INSTANT, _) => format!("{}.fromInstant({})", classes::TIMESTAMP_DATA, term),
                (classes::SQL_TIMESTAMP, _) => format!(
                    "{}.fromInstant({}.toInstant())",
                    classes::TIMESTAMP_DATA,
                    term
                ),
                (_, Some(PrimitiveKind::Long)) => format!("{}({})", FROM_EPOCH_MILLIS, term),
                _ => return Err(Self::unsupported(data_type)),
            },
            _ => return Err(Self::unsupported(data_type)),
        };
        Ok(converted)
    }

    fn literal_to_external(
        &self,
        value: &ScalarValue,
        logical_type: &LogicalType,
    ) -> CodegenResult<ExternalValue> {
        let external = match (value, logical_type.kind()) {
            (ScalarValue::Null, _) => ExternalValue::Null,
            (ScalarValue::Boolean(v), LogicalTypeKind::Boolean) => ExternalValue::Boolean(*v),
            (ScalarValue::Int8(v), LogicalTypeKind::TinyInt) => ExternalValue::Byte(*v),
            (ScalarValue::Int16(v), LogicalTypeKind::SmallInt) => ExternalValue::Short(*v),
            (ScalarValue::Int32(v), LogicalTypeKind::Integer) => ExternalValue::Int(*v),
            (ScalarValue::Int64(v), LogicalTypeKind::BigInt) => ExternalValue::Long(*v),
            (ScalarValue::Float32(v), LogicalTypeKind::Float) => ExternalValue::Float(*v),
            (ScalarValue::Float64(v), LogicalTypeKind::Double) => ExternalValue::Double(*v),
            (ScalarValue::Utf8(v), LogicalTypeKind::Char(_) | LogicalTypeKind::VarChar(_)) => {
                ExternalValue::String(v.clone())
            }
            (
                ScalarValue::Binary(v),
                LogicalTypeKind::Binary(_) | LogicalTypeKind::VarBinary(_),
            ) => ExternalValue::Bytes(v.clone()),
            (ScalarValue::Decimal128 { value, scale, .. }, LogicalTypeKind::Decimal { .. }) => {
                ExternalValue::BigDecimal {
                    unscaled: *value,
                    scale: *scale,
                }
            }
            (ScalarValue::Date32(days), LogicalTypeKind::Date) => ExternalValue::LocalDate(*days),
            (ScalarValue::Time32(millis), LogicalTypeKind::Time(_)) => {
                ExternalValue::LocalTime(*millis)
            }
            (ScalarValue::TimestampMillis(millis), LogicalTypeKind::Timestamp(_)) => {
                ExternalValue::LocalDateTime(*millis)
            }
            (ScalarValue::TimestampMillis(millis), LogicalTypeKind::TimestampLtz(_)) => {
                ExternalValue::Instant(*millis)
            }
            (value, _) => {
                return Err(CodegenError::Literal(format!(
                    "{:?} is not a literal of {}",
                    value, logical_type
                )));
            }
        };
        Ok(external)
    }
}
