//! Scalar UDF descriptors
//!
//! Scalar UDF: 단일 값 → 단일 값 변환 함수. 코드 생성 시점에는 eval 메서드
//! 시그니처만 필요합니다.

use std::fmt;

use crate::types::{DataType, ExternalClass, ExternalValue, LogicalType};

/// One `eval` overload of a UDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalMethod {
    pub parameter_classes: Vec<ExternalClass>,
    pub result_class: ExternalClass,
    /// Last parameter is an array accepting any number of trailing operands
    pub is_variadic: bool,
}

impl EvalMethod {
    pub fn new(parameter_classes: Vec<ExternalClass>, result_class: ExternalClass) -> Self {
        Self {
            parameter_classes,
            result_class,
            is_variadic: false,
        }
    }

    /// Signature from canonical class names, e.g. `EvalMethod::parse(&["int"], "long")`.
    pub fn parse(parameter_classes: &[&str], result_class: &str) -> Self {
        Self::new(
            parameter_classes
                .iter()
                .map(|name| ExternalClass::parse(name))
                .collect(),
            ExternalClass::parse(result_class),
        )
    }

    pub fn variadic(mut self) -> Self {
        self.is_variadic = true;
        self
    }
}

impl fmt::Display for EvalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "eval(")?;
        let last = self.parameter_classes.len().saturating_sub(1);
        for (i, class) in self.parameter_classes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match class.component_type() {
                Some(component) if self.is_variadic && i == last => {
                    write!(f, "{}...", component)?
                }
                _ => write!(f, "{}", class)?,
            }
        }
        write!(f, "): {}", self.result_class)
    }
}

/// A user-defined scalar function as seen by the code generator.
pub trait ScalarFunction: Send + Sync {
    /// Unique per function instance; keys the reusable member field.
    fn identifier(&self) -> &str;

    /// Class of the function instance in generated code.
    fn class_name(&self) -> &str;

    /// Candidate `eval` overloads.
    fn eval_methods(&self) -> &[EvalMethod];

    /// Declared parameter types for a resolved overload.
    ///
    /// `None` derives them from the parameter classes.
    fn parameter_types(&self, _parameter_classes: &[ExternalClass]) -> Option<Vec<DataType>> {
        None
    }

    /// Result type inferred from literal arguments (`None` for non-literals).
    ///
    /// `None` derives it from the resolved result class.
    fn result_type(
        &self,
        _arguments: &[Option<ExternalValue>],
        _operand_types: &[LogicalType],
    ) -> Option<DataType> {
        None
    }
}

type ResultTypeInference =
    Box<dyn Fn(&[Option<ExternalValue>], &[LogicalType]) -> Option<DataType> + Send + Sync>;

/// Descriptor-backed [`ScalarFunction`].
pub struct ScalarUdf {
    identifier: String,
    class_name: String,
    methods: Vec<EvalMethod>,
    declared_parameter_types: Vec<(Vec<ExternalClass>, Vec<DataType>)>,
    result_type_inference: Option<ResultTypeInference>,
}

impl ScalarUdf {
    /// 새 Scalar UDF 생성
    pub fn new(identifier: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            class_name: class_name.into(),
            methods: Vec::new(),
            declared_parameter_types: Vec::new(),
            result_type_inference: None,
        }
    }

    pub fn with_method(mut self, method: EvalMethod) -> Self {
        self.methods.push(method);
        self
    }

    /// Declare parameter data types for the overload taking `parameter_classes`.
    pub fn with_parameter_types(
        mut self,
        parameter_classes: Vec<ExternalClass>,
        parameter_types: Vec<DataType>,
    ) -> Self {
        self.declared_parameter_types
            .push((parameter_classes, parameter_types));
        self
    }

    /// Fixed result type regardless of arguments.
    pub fn with_result_type(self, data_type: DataType) -> Self {
        self.with_result_type_inference(move |_, _| Some(data_type.clone()))
    }

    pub fn with_result_type_inference<F>(mut self, inference: F) -> Self
    where
        F: Fn(&[Option<ExternalValue>], &[LogicalType]) -> Option<DataType> + Send + Sync + 'static,
    {
        self.result_type_inference = Some(Box::new(inference));
        self
    }
}

impl ScalarFunction for ScalarUdf {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn eval_methods(&self) -> &[EvalMethod] {
        &self.methods
    }

    fn parameter_types(&self, parameter_classes: &[ExternalClass]) -> Option<Vec<DataType>> {
        self.declared_parameter_types
            .iter()
            .find(|(classes, _)| classes.as_slice() == parameter_classes)
            .map(|(_, types)| types.clone())
    }

    fn result_type(
        &self,
        arguments: &[Option<ExternalValue>],
        operand_types: &[LogicalType],
    ) -> Option<DataType> {
        self.result_type_inference
            .as_ref()
            .and_then(|inference| inference(arguments, operand_types))
    }
}

impl fmt::Debug for ScalarUdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarUdf")
            .field("identifier", &self.identifier)
            .field("class_name", &self.class_name)
            .field("methods", &self.methods)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveKind;

    #[test]
    fn test_eval_method_display() {
        let method = EvalMethod::parse(&["int", "java.lang.String"], "java.lang.Integer");
        assert_eq!(
            method.to_string(),
            "eval(int, java.lang.String): java.lang.Integer"
        );

        let varargs = EvalMethod::parse(&["java.lang.String", "int[]"], "int").variadic();
        assert_eq!(varargs.to_string(), "eval(java.lang.String, int...): int");
    }

    #[test]
    fn test_declared_parameter_types() {
        let int = ExternalClass::Primitive(PrimitiveKind::Int);
        let udf = ScalarUdf::new("f", "com.acme.F")
            .with_method(EvalMethod::new(vec![int.clone()], int.clone()))
            .with_parameter_types(
                vec![int.clone()],
                vec![DataType::new(LogicalType::int().not_null()).bridged_to(int.clone())],
            );

        assert!(udf.parameter_types(&[int.clone()]).is_some());
        assert!(udf.parameter_types(&[int.boxed()]).is_none());
    }

    #[test]
    fn test_result_type_inference() {
        let udf = ScalarUdf::new("f", "com.acme.F").with_result_type_inference(|args, _| {
            match args.first() {
                Some(Some(ExternalValue::Int(precision))) => {
                    Some(DataType::new(LogicalType::decimal(*precision as u8, 0)))
                }
                _ => None,
            }
        });

        let inferred = udf.result_type(&[Some(ExternalValue::Int(10))], &[LogicalType::int()]);
        assert_eq!(
            inferred.map(|t| t.logical_type().clone()),
            Some(LogicalType::decimal(10, 0))
        );
        assert!(udf.result_type(&[None], &[LogicalType::int()]).is_none());
    }
}
