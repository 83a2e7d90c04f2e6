//! Arrow schema ↔ logical type mapping
//!
//! 컬럼형 배치(Arrow)에서 들어오는 피연산자의 논리 타입을 결정합니다.

use std::sync::Arc;

use arrow::datatypes::{DataType as ArrowType, Field, Fields, TimeUnit};

use super::logical::{LogicalType, LogicalTypeKind, MAX_LENGTH, RowField};
use crate::error::{CodegenError, CodegenResult};

/// UTC is used for `TIMESTAMP_LTZ` columns written back to Arrow.
const LTZ_ARROW_TIMEZONE: &str = "UTC";

fn unit_precision(unit: &TimeUnit) -> u8 {
    match unit {
        TimeUnit::Second => 0,
        TimeUnit::Millisecond => 3,
        TimeUnit::Microsecond => 6,
        TimeUnit::Nanosecond => 9,
    }
}

fn precision_unit(precision: u8) -> TimeUnit {
    match precision {
        0 => TimeUnit::Second,
        1..=3 => TimeUnit::Millisecond,
        4..=6 => TimeUnit::Microsecond,
        _ => TimeUnit::Nanosecond,
    }
}

impl LogicalType {
    /// Logical type of an Arrow field, honoring its nullability.
    pub fn from_arrow_field(field: &Field) -> CodegenResult<LogicalType> {
        Self::from_arrow_type(field.data_type(), field.is_nullable())
    }

    pub fn from_arrow_type(data_type: &ArrowType, nullable: bool) -> CodegenResult<LogicalType> {
        let logical = match data_type {
            ArrowType::Null => LogicalType::null(),
            ArrowType::Boolean => LogicalType::boolean(),
            ArrowType::Int8 => LogicalType::tinyint(),
            ArrowType::Int16 => LogicalType::smallint(),
            ArrowType::Int32 => LogicalType::int(),
            ArrowType::Int64 => LogicalType::bigint(),
            ArrowType::Float32 => LogicalType::float(),
            ArrowType::Float64 => LogicalType::double(),
            ArrowType::Utf8 | ArrowType::LargeUtf8 => LogicalType::string(),
            ArrowType::Binary | ArrowType::LargeBinary => LogicalType::bytes(),
            ArrowType::FixedSizeBinary(length) => {
                if *length < 0 {
                    return Err(CodegenError::Arrow(format!(
                        "negative fixed-size binary length {} is not supported",
                        length
                    )));
                }
                LogicalType::binary(*length as u32)
            }
            ArrowType::Decimal128(precision, scale) => {
                if *scale < 0 {
                    return Err(CodegenError::Arrow(format!(
                        "negative decimal scale {} is not supported",
                        scale
                    )));
                }
                LogicalType::decimal(*precision, *scale as u8)
            }
            ArrowType::Date32 => LogicalType::date(),
            ArrowType::Time32(unit) | ArrowType::Time64(unit) => {
                LogicalType::time(unit_precision(unit))
            }
            ArrowType::Timestamp(unit, None) => LogicalType::timestamp(unit_precision(unit)),
            ArrowType::Timestamp(unit, Some(_)) => {
                LogicalType::timestamp_ltz(unit_precision(unit))
            }
            ArrowType::List(element) | ArrowType::LargeList(element) => {
                LogicalType::array(Self::from_arrow_field(element)?)
            }
            ArrowType::Map(entries, _) => match entries.data_type() {
                ArrowType::Struct(fields) if fields.len() == 2 => LogicalType::map(
                    Self::from_arrow_field(&fields[0])?,
                    Self::from_arrow_field(&fields[1])?,
                ),
                other => {
                    return Err(CodegenError::Arrow(format!(
                        "malformed map entries type {:?}",
                        other
                    )));
                }
            },
            ArrowType::Struct(fields) => LogicalType::row(
                fields
                    .iter()
                    .map(|f| Ok(RowField::new(f.name().clone(), Self::from_arrow_field(f)?)))
                    .collect::<CodegenResult<Vec<_>>>()?,
            ),
            other => {
                return Err(CodegenError::Arrow(format!(
                    "arrow type {:?} has no logical type",
                    other
                )));
            }
        };
        Ok(logical.copy(nullable))
    }

    /// Arrow type used to store values of this logical type.
    pub fn to_arrow_type(&self) -> CodegenResult<ArrowType> {
        let arrow_type = match self.kind() {
            LogicalTypeKind::Null => ArrowType::Null,
            LogicalTypeKind::Boolean => ArrowType::Boolean,
            LogicalTypeKind::TinyInt => ArrowType::Int8,
            LogicalTypeKind::SmallInt => ArrowType::Int16,
            LogicalTypeKind::Integer => ArrowType::Int32,
            LogicalTypeKind::BigInt => ArrowType::Int64,
            LogicalTypeKind::Float => ArrowType::Float32,
            LogicalTypeKind::Double => ArrowType::Float64,
            LogicalTypeKind::Char(_) | LogicalTypeKind::VarChar(_) => ArrowType::Utf8,
            LogicalTypeKind::Binary(length) if *length != MAX_LENGTH => {
                ArrowType::FixedSizeBinary(*length as i32)
            }
            LogicalTypeKind::Binary(_) | LogicalTypeKind::VarBinary(_) => ArrowType::Binary,
            LogicalTypeKind::Decimal { precision, scale } => {
                ArrowType::Decimal128(*precision, *scale as i8)
            }
            LogicalTypeKind::Date => ArrowType::Date32,
            LogicalTypeKind::Time(precision) => match precision_unit(*precision) {
                unit @ (TimeUnit::Second | TimeUnit::Millisecond) => ArrowType::Time32(unit),
                unit => ArrowType::Time64(unit),
            },
            LogicalTypeKind::Timestamp(precision) => {
                ArrowType::Timestamp(precision_unit(*precision), None)
            }
            LogicalTypeKind::TimestampLtz(precision) => ArrowType::Timestamp(
                precision_unit(*precision),
                Some(LTZ_ARROW_TIMEZONE.into()),
            ),
            LogicalTypeKind::Array(element) => ArrowType::List(Arc::new(Field::new(
                "item",
                element.to_arrow_type()?,
                element.is_nullable(),
            ))),
            LogicalTypeKind::Map(key, value) => {
                let entries = Fields::from(vec![
                    Field::new("key", key.to_arrow_type()?, false),
                    Field::new("value", value.to_arrow_type()?, value.is_nullable()),
                ]);
                ArrowType::Map(
                    Arc::new(Field::new("entries", ArrowType::Struct(entries), false)),
                    false,
                )
            }
            LogicalTypeKind::Row(fields) => ArrowType::Struct(
                fields
                    .iter()
                    .map(|f| {
                        Ok(Field::new(
                            f.name.clone(),
                            f.field_type.to_arrow_type()?,
                            f.field_type.is_nullable(),
                        ))
                    })
                    .collect::<CodegenResult<Vec<_>>>()?
                    .into(),
            ),
            LogicalTypeKind::Raw(class_name) => {
                return Err(CodegenError::Arrow(format!(
                    "RAW('{}') cannot be stored in an arrow column",
                    class_name
                )));
            }
        };
        Ok(arrow_type)
    }
}
