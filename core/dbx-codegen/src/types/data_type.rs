//! DataType: a logical type bridged to a conversion class

use std::fmt;

use super::external::{ExternalClass, PrimitiveKind, classes};
use super::logical::{LogicalType, LogicalTypeRoot};

/// Logical type plus the runtime class values are converted to/from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataType {
    logical_type: LogicalType,
    conversion_class: ExternalClass,
}

impl DataType {
    /// Data type using the canonical external class of `logical_type`.
    pub fn new(logical_type: LogicalType) -> Self {
        let conversion_class = logical_type.default_conversion_class();
        Self {
            logical_type,
            conversion_class,
        }
    }

    /// Same logical type, different conversion class.
    pub fn bridged_to(mut self, class: ExternalClass) -> Self {
        self.conversion_class = class;
        self
    }

    pub fn logical_type(&self) -> &LogicalType {
        &self.logical_type
    }

    pub fn conversion_class(&self) -> &ExternalClass {
        &self.conversion_class
    }

    /// Declared type is an opaque/generic container (`RAW`).
    pub fn is_generic(&self) -> bool {
        self.logical_type.root() == LogicalTypeRoot::Raw
    }

    /// Conversion class is the internal representation itself.
    pub fn is_internal(&self) -> bool {
        self.conversion_class == self.logical_type.internal_class()
    }

    /// Extract a data type from a runtime class of an eval signature.
    ///
    /// Classes without a known logical counterpart become `RAW`.
    pub fn from_class(class: &ExternalClass) -> DataType {
        let logical = match class {
            ExternalClass::Primitive(kind) => primitive_logical_type(*kind).not_null(),
            ExternalClass::Boxed(kind) => primitive_logical_type(*kind),
            ExternalClass::Object(name) => match name.as_str() {
                classes::STRING => LogicalType::string(),
                classes::BIG_DECIMAL => LogicalType::decimal(38, 18),
                classes::BYTE_ARRAY => LogicalType::bytes(),
                classes::LOCAL_DATE | classes::SQL_DATE => LogicalType::date(),
                classes::LOCAL_TIME | classes::SQL_TIME => LogicalType::time(0),
                classes::LOCAL_DATE_TIME | classes::SQL_TIMESTAMP => LogicalType::timestamp(9),
                classes::INSTANT => LogicalType::timestamp_ltz(9),
                _ => match class.component_type() {
                    Some(component) => {
                        LogicalType::array(DataType::from_class(&component).logical_type)
                    }
                    None => LogicalType::raw(name.clone()),
                },
            },
        };
        DataType {
            logical_type: logical,
            conversion_class: class.clone(),
        }
    }
}

fn primitive_logical_type(kind: PrimitiveKind) -> LogicalType {
    match kind {
        PrimitiveKind::Boolean => LogicalType::boolean(),
        PrimitiveKind::Byte => LogicalType::tinyint(),
        PrimitiveKind::Short => LogicalType::smallint(),
        PrimitiveKind::Int => LogicalType::int(),
        PrimitiveKind::Long => LogicalType::bigint(),
        PrimitiveKind::Float => LogicalType::float(),
        PrimitiveKind::Double => LogicalType::double(),
        PrimitiveKind::Char => LogicalType::char(1),
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.logical_type, self.conversion_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_class() {
        let data_type = DataType::new(LogicalType::string());
        assert_eq!(data_type.conversion_class().type_term(), classes::STRING);
        assert!(!data_type.is_internal());
        assert!(!data_type.is_generic());
    }

    #[test]
    fn from_primitive_class_is_not_null() {
        let data_type = DataType::from_class(&ExternalClass::Primitive(PrimitiveKind::Int));
        assert_eq!(data_type.logical_type(), &LogicalType::int().not_null());
        let boxed = DataType::from_class(&ExternalClass::Boxed(PrimitiveKind::Int));
        assert_eq!(boxed.logical_type(), &LogicalType::int());
    }

    #[test]
    fn from_unknown_class_is_generic() {
        let data_type = DataType::from_class(&ExternalClass::object("com.acme.Point"));
        assert!(data_type.is_generic());
        assert_eq!(data_type.to_string(), "RAW('com.acme.Point') <com.acme.Point>");
    }

    #[test]
    fn from_array_class() {
        let data_type = DataType::from_class(&ExternalClass::object("java.lang.String[]"));
        assert_eq!(
            data_type.logical_type(),
            &LogicalType::array(LogicalType::string())
        );
    }

    #[test]
    fn internal_bridging() {
        let ltz = LogicalType::timestamp_ltz(3);
        let data_type = DataType::new(ltz.clone()).bridged_to(ltz.internal_class());
        assert!(data_type.is_internal());
    }
}
