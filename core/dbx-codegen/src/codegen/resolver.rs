//! Eval method resolution
//!
//! 피연산자 논리 타입에 맞는 eval 오버로드를 코드 생성 시점에 한 번 결정합니다.

use tracing::debug;

use super::function::{EvalMethod, ScalarFunction};
use crate::error::{CodegenError, CodegenResult};
use crate::types::{DataType, ExternalClass, LogicalType, classes};

/// Overload picked for one call site, with variadic parameters expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMethod {
    /// One class per operand
    pub parameter_classes: Vec<ExternalClass>,
    pub result_class: ExternalClass,
}

/// External signature of one call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSignature {
    pub parameter_classes: Vec<ExternalClass>,
    pub parameter_types: Vec<DataType>,
    pub result_class: ExternalClass,
}

impl ResolvedSignature {
    /// Attach parameter types: the function's declared ones, or otherwise the
    /// operand type bridged to each parameter class.
    ///
    /// 피연산자 타입을 유지해야 TIMESTAMP_LTZ → `java.lang.Long` 같은 경우가
    /// class 기본 타입(BIGINT)으로 잘못 해석되지 않습니다.
    pub fn new(
        function: &dyn ScalarFunction,
        method: ResolvedMethod,
        operand_types: &[LogicalType],
    ) -> Self {
        let parameter_types = function
            .parameter_types(&method.parameter_classes)
            .unwrap_or_else(|| {
                method
                    .parameter_classes
                    .iter()
                    .zip(operand_types)
                    .map(|(class, operand_type)| Self::bridged_parameter(operand_type, class))
                    .collect()
            });
        Self {
            parameter_classes: method.parameter_classes,
            parameter_types,
            result_class: method.result_class,
        }
    }

    fn bridged_parameter(operand_type: &LogicalType, class: &ExternalClass) -> DataType {
        if class.type_term() != classes::OBJECT && operand_type.supports_output_conversion(class)
        {
            DataType::new(operand_type.clone()).bridged_to(class.clone())
        } else {
            DataType::from_class(class)
        }
    }
}

/// Picks the eval method of a function for given operand types.
pub trait MethodResolver: Send + Sync {
    fn resolve_eval_method(
        &self,
        function: &dyn ScalarFunction,
        operand_types: &[LogicalType],
    ) -> CodegenResult<ResolvedMethod>;
}

/// Resolves against the signatures a function declares.
///
/// Each parameter is scored against its operand; the best total wins and
/// ties go to the method declared first.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureResolver;

impl SignatureResolver {
    pub fn new() -> Self {
        Self
    }

    /// How well `class` receives an operand of `operand_type`; `None` if it cannot.
    fn parameter_score(operand_type: &LogicalType, class: &ExternalClass) -> Option<u32> {
        if class.type_term() == classes::OBJECT {
            return Some(0);
        }
        if !operand_type.supports_output_conversion(class) {
            return None;
        }
        let score = if class.is_primitive() {
            if operand_type.is_nullable() { 1 } else { 3 }
        } else if *class == operand_type.default_conversion_class() {
            if operand_type.is_nullable() { 3 } else { 2 }
        } else {
            1
        };
        Some(score)
    }

    /// Parameter classes aligned to `operand_count` operands, if the arity fits.
    fn expand(method: &EvalMethod, operand_count: usize) -> Option<Vec<ExternalClass>> {
        let declared = method.parameter_classes.len();
        if !method.is_variadic {
            return (declared == operand_count).then(|| method.parameter_classes.clone());
        }
        let fixed = declared.checked_sub(1)?;
        if operand_count < fixed {
            return None;
        }
        let component = method.parameter_classes[fixed].component_type()?;
        let mut expanded = method.parameter_classes[..fixed].to_vec();
        expanded.extend(std::iter::repeat_n(component, operand_count - fixed));
        Some(expanded)
    }

    fn score(operand_types: &[LogicalType], parameter_classes: &[ExternalClass]) -> Option<u32> {
        operand_types
            .iter()
            .zip(parameter_classes)
            .map(|(operand_type, class)| Self::parameter_score(operand_type, class))
            .sum()
    }
}

impl MethodResolver for SignatureResolver {
    fn resolve_eval_method(
        &self,
        function: &dyn ScalarFunction,
        operand_types: &[LogicalType],
    ) -> CodegenResult<ResolvedMethod> {
        let mut best: Option<(u32, &EvalMethod, Vec<ExternalClass>)> = None;

        for method in function.eval_methods() {
            let Some(parameter_classes) = Self::expand(method, operand_types.len()) else {
                continue;
            };
            let Some(score) = Self::score(operand_types, &parameter_classes) else {
                continue;
            };
            if best.as_ref().is_none_or(|(best_score, _, _)| score > *best_score) {
                best = Some((score, method, parameter_classes));
            }
        }

        match best {
            Some((score, method, parameter_classes)) => {
                debug!(
                    target: "codegen",
                    function = %function.identifier(),
                    method = %method,
                    score,
                    "resolved eval method"
                );
                Ok(ResolvedMethod {
                    parameter_classes,
                    result_class: method.result_class.clone(),
                })
            }
            None => {
                let operands = operand_types
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let candidates = function
                    .eval_methods()
                    .iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(CodegenError::Resolution {
                    function: function.identifier().to_string(),
                    message: format!(
                        "no eval method accepts ({}); candidates: [{}]",
                        operands, candidates
                    ),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::function::ScalarUdf;
    use crate::types::PrimitiveKind;

    fn int() -> ExternalClass {
        ExternalClass::Primitive(PrimitiveKind::Int)
    }

    #[test]
    fn test_prefers_primitive_for_not_null_operand() {
        let udf = ScalarUdf::new("f", "F")
            .with_method(EvalMethod::parse(&["java.lang.Integer"], "int"))
            .with_method(EvalMethod::parse(&["int"], "int"));

        let resolved = SignatureResolver
            .resolve_eval_method(&udf, &[LogicalType::int().not_null()])
            .unwrap();
        assert_eq!(resolved.parameter_classes, vec![int()]);

        let resolved = SignatureResolver
            .resolve_eval_method(&udf, &[LogicalType::int()])
            .unwrap();
        assert_eq!(resolved.parameter_classes, vec![int().boxed()]);
    }

    #[test]
    fn test_ltz_accepts_long() {
        let udf = ScalarUdf::new("f", "F").with_method(EvalMethod::parse(&["long"], "long"));
        let resolved = SignatureResolver
            .resolve_eval_method(&udf, &[LogicalType::timestamp_ltz(3).not_null()])
            .unwrap();
        assert!(resolved.parameter_classes[0].is_primitive_long());
        assert!(resolved.result_class.is_primitive_long());
    }

    #[test]
    fn test_variadic_expansion() {
        let udf = ScalarUdf::new("concat", "Concat").with_method(
            EvalMethod::parse(&["java.lang.String", "java.lang.String[]"], "java.lang.String")
                .variadic(),
        );
        let string = LogicalType::string();
        let resolved = SignatureResolver
            .resolve_eval_method(&udf, &[string.clone(), string.clone(), string.clone()])
            .unwrap();
        assert_eq!(resolved.parameter_classes.len(), 3);
        assert!(
            resolved
                .parameter_classes
                .iter()
                .all(|c| c.type_term() == "java.lang.String")
        );

        let resolved = SignatureResolver
            .resolve_eval_method(&udf, &[string])
            .unwrap();
        assert_eq!(resolved.parameter_classes.len(), 1);
    }

    #[test]
    fn test_object_parameter_accepts_anything() {
        let udf = ScalarUdf::new("f", "F")
            .with_method(EvalMethod::parse(&["java.lang.Object"], "java.lang.String"));
        assert!(
            SignatureResolver
                .resolve_eval_method(&udf, &[LogicalType::array(LogicalType::int())])
                .is_ok()
        );
    }

    #[test]
    fn test_no_match_lists_candidates() {
        let udf = ScalarUdf::new("f", "F").with_method(EvalMethod::parse(&["int"], "int"));
        let err = SignatureResolver
            .resolve_eval_method(&udf, &[LogicalType::string()])
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'f'"));
        assert!(message.contains("(STRING)"));
        assert!(message.contains("eval(int): int"));
    }

    #[test]
    fn test_signature_derives_parameter_types() {
        let udf = ScalarUdf::new("f", "F").with_method(EvalMethod::parse(&["com.acme.Point"], "int"));
        let method = ResolvedMethod {
            parameter_classes: vec![ExternalClass::object("com.acme.Point")],
            result_class: int(),
        };
        let signature = ResolvedSignature::new(&udf, method, &[LogicalType::string()]);
        assert!(signature.parameter_types[0].is_generic());
    }

    #[test]
    fn test_signature_keeps_operand_type() {
        let udf = ScalarUdf::new("f", "F")
            .with_method(EvalMethod::parse(&["java.lang.Long"], "java.lang.Long"));
        let operand = LogicalType::timestamp_ltz(3);
        let method = SignatureResolver
            .resolve_eval_method(&udf, std::slice::from_ref(&operand))
            .unwrap();
        let signature = ResolvedSignature::new(&udf, method, std::slice::from_ref(&operand));
        assert_eq!(signature.parameter_types[0].logical_type(), &operand);
        assert_eq!(
            signature.parameter_types[0].conversion_class(),
            &ExternalClass::parse("java.lang.Long")
        );
    }

    #[test]
    fn test_ltz_rejects_int() {
        let udf = ScalarUdf::new("f", "F")
            .with_method(EvalMethod::parse(&["int"], "int"))
            .with_method(EvalMethod::parse(&["java.lang.Integer"], "int"));
        let err = SignatureResolver
            .resolve_eval_method(&udf, &[LogicalType::timestamp_ltz(3).not_null()])
            .unwrap_err();
        assert!(matches!(err, CodegenError::Resolution { .. }));
    }
}
