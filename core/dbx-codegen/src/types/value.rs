//! Literal values
//!
//! `ScalarValue`는 엔진 내부 표현의 리터럴, `ExternalValue`는 UDF가 보는 외부 표현입니다.

use std::fmt;

use arrow::datatypes::{DataType as ArrowType, TimeUnit};

/// A literal in internal representation.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Utf8(String),
    Binary(Vec<u8>),
    Decimal128 {
        value: i128,
        precision: u8,
        scale: u8,
    },
    /// Days since epoch
    Date32(i32),
    /// Milliseconds of day
    Time32(i32),
    /// Milliseconds since epoch
    TimestampMillis(i64),
}

impl ScalarValue {
    /// Get the Arrow DataType for this value.
    pub fn arrow_type(&self) -> ArrowType {
        match self {
            ScalarValue::Null => ArrowType::Null,
            ScalarValue::Boolean(_) => ArrowType::Boolean,
            ScalarValue::Int8(_) => ArrowType::Int8,
            ScalarValue::Int16(_) => ArrowType::Int16,
            ScalarValue::Int32(_) => ArrowType::Int32,
            ScalarValue::Int64(_) => ArrowType::Int64,
            ScalarValue::Float32(_) => ArrowType::Float32,
            ScalarValue::Float64(_) => ArrowType::Float64,
            ScalarValue::Utf8(_) => ArrowType::Utf8,
            ScalarValue::Binary(_) => ArrowType::Binary,
            ScalarValue::Decimal128 {
                precision, scale, ..
            } => ArrowType::Decimal128(*precision, *scale as i8),
            ScalarValue::Date32(_) => ArrowType::Date32,
            ScalarValue::Time32(_) => ArrowType::Time32(TimeUnit::Millisecond),
            ScalarValue::TimestampMillis(_) => ArrowType::Timestamp(TimeUnit::Millisecond, None),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }
}

/// A literal in the external representation a UDF receives.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalValue {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    /// `java.math.BigDecimal` as unscaled value and scale
    BigDecimal { unscaled: i128, scale: u8 },
    /// `java.time.LocalDate` as days since epoch
    LocalDate(i32),
    /// `java.time.LocalTime` as milliseconds of day
    LocalTime(i32),
    /// `java.time.LocalDateTime` as milliseconds since epoch
    LocalDateTime(i64),
    /// `java.time.Instant` as milliseconds since epoch
    Instant(i64),
}

impl fmt::Display for ExternalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalValue::Null => write!(f, "null"),
            ExternalValue::Boolean(v) => write!(f, "{}", v),
            ExternalValue::Byte(v) => write!(f, "{}", v),
            ExternalValue::Short(v) => write!(f, "{}", v),
            ExternalValue::Int(v) => write!(f, "{}", v),
            ExternalValue::Long(v) => write!(f, "{}L", v),
            ExternalValue::Float(v) => write!(f, "{}f", v),
            ExternalValue::Double(v) => write!(f, "{}d", v),
            ExternalValue::String(v) => write!(f, "{:?}", v),
            ExternalValue::Bytes(v) => write!(f, "x'{}'", hex(v)),
            ExternalValue::BigDecimal { unscaled, scale } => {
                write!(f, "{}", format_decimal(*unscaled, *scale))
            }
            ExternalValue::LocalDate(days) => write!(f, "LocalDate({})", days),
            ExternalValue::LocalTime(millis) => write!(f, "LocalTime({})", millis),
            ExternalValue::LocalDateTime(millis) => write!(f, "LocalDateTime({})", millis),
            ExternalValue::Instant(millis) => write!(f, "Instant({})", millis),
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn format_decimal(unscaled: i128, scale: u8) -> String {
    if scale == 0 {
        return unscaled.to_string();
    }
    let digits = unscaled.unsigned_abs().to_string();
    let scale = scale as usize;
    let padded = if digits.len() <= scale {
        format!("{}{}", "0".repeat(scale - digits.len() + 1), digits)
    } else {
        digits
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - scale);
    let sign = if unscaled < 0 { "-" } else { "" };
    format!("{}{}.{}", sign, int_part, frac_part)
}
